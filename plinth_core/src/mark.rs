// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Drawable mark values.
//!
//! A mark is the unit a chart layer emits onto the [`crate::Surface`]: a
//! rectangle, a stroked/filled path, or a text run. Marks carry a stable
//! identity so interaction code can find and mutate a previously-drawn mark
//! without re-rendering its whole group.

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

use crate::transition::Transition;

/// Stable mark identity.
///
/// Identity survives re-renders of the owning group, which lets hover
/// handlers address "the bar for row 3 of layer 1" across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id from a layer slot and a row within it.
    ///
    /// The layer occupies the high 32 bits, so per-row ids never collide
    /// across layers.
    pub const fn for_slot(layer: u32, row: u32) -> Self {
        Self(((layer as u64) << 32) | row as u64)
    }
}

/// Horizontal text anchoring, matching the SVG `text-anchor` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor at the start of the text run.
    #[default]
    Start,
    /// Anchor at the middle of the text run.
    Middle,
    /// Anchor at the end of the text run.
    End,
}

/// Vertical text baseline, matching the SVG `dominant-baseline` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The usual Latin baseline.
    #[default]
    Alphabetic,
    /// Centered on the midline.
    Middle,
    /// Hanging baseline (top-anchored).
    Hanging,
}

/// An axis-aligned filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Geometry in surface coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// A filled and/or stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path geometry in surface coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0.0` means no stroke is drawn.
    pub stroke_width: f64,
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in surface coordinates.
    pub pos: Point,
    /// The text content.
    pub text: String,
    /// Font size in surface units.
    pub font_size: f64,
    /// Horizontal anchoring.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
}

/// The drawable content of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A filled rectangle.
    Rect(RectMark),
    /// A filled/stroked path.
    Path(PathMark),
    /// A text run.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns the geometric bounds of the payload, if it has any.
    ///
    /// Text bounds are unknown without shaping and return `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }
}

/// A drawable mark with identity, ordering, and an optional entrance
/// transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Rendering order within the owning group; higher draws later.
    pub z_index: i32,
    /// Uniform opacity in `[0, 1]`.
    pub opacity: f64,
    /// Optional entrance transition. `None` means the mark appears at its
    /// final state immediately.
    pub transition: Option<Transition>,
    /// Drawable content.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark from a payload with default ordering and opacity.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            opacity: 1.0,
            transition: None,
            payload,
        }
    }

    /// Convenience for a filled rectangle mark.
    pub fn rect(id: MarkId, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Rect(RectMark {
                rect,
                fill: fill.into(),
            }),
        )
    }

    /// Convenience for a stroked line-segment mark.
    pub fn line(id: MarkId, p0: Point, p1: Point, stroke: impl Into<Brush>, width: f64) -> Self {
        let mut path = BezPath::new();
        path.move_to(p0);
        path.line_to(p1);
        Self::new(
            id,
            MarkPayload::Path(PathMark {
                path,
                fill: Color::TRANSPARENT.into(),
                stroke: stroke.into(),
                stroke_width: width,
            }),
        )
    }

    /// Convenience for a filled path mark with no stroke.
    pub fn path(id: MarkId, path: BezPath, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Path(PathMark {
                path,
                fill: fill.into(),
                stroke: Color::TRANSPARENT.into(),
                stroke_width: 0.0,
            }),
        )
    }

    /// Convenience for a text mark with default anchoring.
    pub fn text(id: MarkId, pos: Point, text: impl Into<String>, font_size: f64) -> Self {
        Self::new(
            id,
            MarkPayload::Text(TextMark {
                pos,
                text: text.into(),
                font_size,
                anchor: TextAnchor::default(),
                baseline: TextBaseline::default(),
                fill: Brush::default(),
                angle: 0.0,
            }),
        )
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the uniform opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Attaches an entrance transition.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Sets the stroke of a path payload; a no-op for other payloads.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.stroke = stroke.into();
            p.stroke_width = width;
        }
        self
    }

    /// Sets the anchor of a text payload; a no-op for other payloads.
    pub fn with_anchor(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
            t.baseline = baseline;
        }
        self
    }

    /// Sets the fill paint of any payload kind.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
        }
        self
    }
}
