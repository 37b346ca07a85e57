// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Shared defaults: palette, margins, class tokens.

use peniko::Color;
use plinth_core::Insets;

/// Group class tokens used on the drawing surface.
///
/// Layers and the canvas address groups by these tokens, so re-renders can
/// remove and recreate exactly the subtree they own.
pub mod class {
    /// The root canvas group.
    pub const CANVAS: &str = "plinth-canvas";
    /// An axis group; the axis name is appended as `plinth-axis-<name>`.
    pub const AXIS: &str = "plinth-axis";
    /// The grid-line group, behind the chart content.
    pub const GRID: &str = "plinth-grid";
    /// The group all chart layers draw under.
    pub const CHARTS_AREA: &str = "plinth-charts-area";
    /// A chart layer's own group; the layer index is appended.
    pub const LAYER: &str = "plinth-layer";
    /// The interaction-zone group.
    pub const ZONES: &str = "plinth-zones";
}

/// Default margins around the drawing area, in surface units.
pub fn default_margins() -> Insets {
    Insets::uniform(20.0)
}

/// The default series palette.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::from_rgb8(0x17, 0x62, 0x98),
        Color::from_rgb8(0x81, 0x2e, 0x8f),
        Color::from_rgb8(0xff, 0x7f, 0x0e),
        Color::from_rgb8(0xff, 0xbb, 0x78),
        Color::from_rgb8(0x2c, 0xa0, 0x2c),
        Color::from_rgb8(0x98, 0xdf, 0x8a),
        Color::from_rgb8(0xd6, 0x27, 0x28),
        Color::from_rgb8(0xff, 0x98, 0x96),
    ]
}

/// Shared color lookup, indexed by series or layer position.
///
/// Mirrors an ordinal color scale: indices past the end of the palette wrap
/// around rather than failing, so a palette shorter than the series count
/// degrades to color reuse.
#[derive(Clone, Debug)]
pub struct ColorScale {
    colors: Vec<Color>,
}

impl ColorScale {
    /// Creates a color scale over the given palette.
    ///
    /// An empty palette falls back to the default one.
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            return Self {
                colors: default_palette(),
            };
        }
        Self { colors }
    }

    /// Returns the color for index `i`, wrapping past the palette end.
    pub fn color(&self, i: usize) -> Color {
        if i >= self.colors.len() {
            tracing::warn!(
                index = i,
                palette = self.colors.len(),
                "palette exhausted, reusing colors"
            );
        }
        self.colors[i % self.colors.len()]
    }

    /// Number of distinct colors before reuse starts.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette is empty; always `false` after construction.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new(default_palette())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_palette_wraps_instead_of_failing() {
        let scale = ColorScale::new(vec![Color::BLACK, Color::WHITE]);
        assert_eq!(scale.color(0), scale.color(2));
        assert_eq!(scale.color(1), scale.color(5));
    }
}
