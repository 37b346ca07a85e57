// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Container measurement.
//!
//! The charting layer takes exactly one measurement from its host: the size
//! of the container it draws into. [`Viewport`] abstracts that call so the
//! engine can run against a browser element, a native window, or a fixed
//! test size alike.

use std::cell::Cell;
use std::rc::Rc;

/// A width/height pair in surface coordinate units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in surface units.
    pub width: f64,
    /// Height in surface units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-side margins around the drawing area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Insets {
    /// Creates uniform margins.
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// A measurable drawing container.
pub trait Viewport {
    /// Returns the container's current outer size.
    fn size(&self) -> Size;
}

/// An interior-mutable viewport for hosts and tests.
///
/// Clones share the same cell, so a host can hold one handle, hand another
/// to the chart, and simulate a window resize by calling
/// [`SharedViewport::set_size`].
#[derive(Clone, Debug)]
pub struct SharedViewport {
    size: Rc<Cell<Size>>,
}

impl SharedViewport {
    /// Creates a viewport with the given initial size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Rc::new(Cell::new(Size::new(width, height))),
        }
    }

    /// Updates the measured size. Takes effect on the next measurement.
    pub fn set_size(&self, width: f64, height: f64) {
        self.size.set(Size::new(width, height));
    }
}

impl Viewport for SharedViewport {
    fn size(&self) -> Size {
        self.size.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_resizes() {
        let a = SharedViewport::new(100.0, 50.0);
        let b = a.clone();
        a.set_size(200.0, 80.0);
        assert_eq!(b.size(), Size::new(200.0, 80.0));
    }
}
