// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Coordinate scales.
//!
//! Two scale kinds cover this engine: a linear domain/range map and an
//! ordinal band scale over string categories with rounded band layout
//! (integral step and band width, leftover span centered as outer padding).

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate (zero-span) domain maps everything to the range start.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Replaces the domain, keeping the range.
    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Replaces the range, keeping the domain.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }
}

/// A discrete band scale over named categories with rounded band layout.
///
/// Band and step widths are rounded down to whole units and the leftover
/// span is split evenly at both ends, so adjacent bands land on pixel
/// boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl OrdinalScale {
    /// Creates a band scale over `domain` categories covering `range`.
    ///
    /// `padding` is the inner/outer padding as a fraction of the step.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            domain,
            range,
            padding: padding.max(0.0),
        }
    }

    /// Returns the category list.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Whether the scale has no categories.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Replaces the range, keeping the domain.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        let span = (self.range.1 - self.range.0).abs();
        (span / (n + self.padding)).floor()
    }

    /// Returns the rounded band width.
    pub fn band_width(&self) -> f64 {
        (self.step() * (1.0 - self.padding)).round()
    }

    /// Returns the start position of the band at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let n = self.domain.len() as f64;
        let span = (self.range.1 - self.range.0).abs();
        let step = self.step();
        let start = self.range.0.min(self.range.1);
        // Center the rounding leftover as outer padding.
        let leftover = span - step * n;
        start + (leftover / 2.0).round() + step * index as f64
    }

    /// Returns the start position of a named category's band.
    pub fn map(&self, category: &str) -> Option<f64> {
        let index = self.domain.iter().position(|c| c == category)?;
        Some(self.position(index))
    }
}

/// A scale instance held by an axis.
#[derive(Clone, Debug, PartialEq)]
pub enum Scale {
    /// Discrete band scale.
    Ordinal(OrdinalScale),
    /// Continuous linear scale.
    Linear(LinearScale),
}

impl Scale {
    /// Returns the linear scale, if this is one.
    pub fn as_linear(&self) -> Option<&LinearScale> {
        match self {
            Self::Linear(s) => Some(s),
            Self::Ordinal(_) => None,
        }
    }

    /// Returns the linear scale mutably, if this is one.
    pub fn as_linear_mut(&mut self) -> Option<&mut LinearScale> {
        match self {
            Self::Linear(s) => Some(s),
            Self::Ordinal(_) => None,
        }
    }

    /// Returns the ordinal scale, if this is one.
    pub fn as_ordinal(&self) -> Option<&OrdinalScale> {
        match self {
            Self::Ordinal(s) => Some(s),
            Self::Linear(_) => None,
        }
    }
}

impl From<LinearScale> for Scale {
    fn from(value: LinearScale) -> Self {
        Self::Linear(value)
    }
}

impl From<OrdinalScale> for Scale {
    fn from(value: OrdinalScale) -> Self {
        Self::Ordinal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn linear_maps_endpoints_to_range() {
        let s = LinearScale::new((0.0, 100.0), (200.0, 0.0));
        assert_eq!(s.map(0.0), 200.0);
        assert_eq!(s.map(100.0), 0.0);
        assert_eq!(s.map(50.0), 100.0);
    }

    #[test]
    fn degenerate_linear_domain_maps_to_range_start() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 10.0));
        assert_eq!(s.map(5.0), 0.0);
        assert_eq!(s.map(999.0), 0.0);
    }

    #[test]
    fn band_positions_are_integral_and_monotonic() {
        let s = OrdinalScale::new(categories(&["a", "b", "c"]), (0.0, 313.0), 0.05);
        let xs: Vec<f64> = (0..3).map(|i| s.position(i)).collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
        for x in &xs {
            assert_eq!(x.fract(), 0.0, "band start {x} is not integral");
        }
        assert_eq!(s.band_width().fract(), 0.0);
        assert!(s.band_width() > 0.0);
    }

    #[test]
    fn bands_fit_inside_the_range() {
        let s = OrdinalScale::new(categories(&["a", "b", "c", "d"]), (0.0, 100.0), 0.05);
        let last = s.position(3) + s.band_width();
        assert!(last <= 100.0);
        assert!(s.position(0) >= 0.0);
    }

    #[test]
    fn map_finds_categories_by_name() {
        let s = OrdinalScale::new(categories(&["Jan", "Feb"]), (0.0, 100.0), 0.0);
        assert_eq!(s.map("Jan"), Some(s.position(0)));
        assert_eq!(s.map("Feb"), Some(s.position(1)));
        assert_eq!(s.map("Mar"), None);
    }

    #[test]
    fn empty_domain_yields_zero_band() {
        let s = OrdinalScale::new(Vec::new(), (0.0, 100.0), 0.05);
        assert_eq!(s.band_width(), 0.0);
        assert!(s.is_empty());
    }
}
