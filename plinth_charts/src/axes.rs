// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! The named-axis manager.
//!
//! Axes are stored behind shared handles: reading an axis returns the live
//! object, so the canvas, the orchestrator, and every chart layer observe
//! the same scale instance at all times. Mutation happens through the
//! handle; the manager itself never triggers a redraw. Callers fire
//! `axis_updated` after writing.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::scale::{LinearScale, OrdinalScale, Scale};

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed above the plot area.
    Top,
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A vertical axis placed to the right of the plot area.
    Right,
}

/// The mutable state of one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisState {
    /// The axis scale.
    pub scale: Scale,
    /// Axis placement.
    pub orient: AxisOrient,
    /// Tick length in surface units; reused as a layout inset when
    /// positioning perpendicular axes and content.
    pub tick_size: f64,
    /// Tick positions in domain units; empty for category axes, which tick
    /// at band centers instead.
    pub tick_values: Vec<f64>,
}

impl AxisState {
    /// Creates an axis with no ticks configured.
    pub fn new(scale: impl Into<Scale>, orient: AxisOrient) -> Self {
        Self {
            scale: scale.into(),
            orient,
            tick_size: 0.0,
            tick_values: Vec::new(),
        }
    }

    /// Sets the tick length.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Sets explicit tick positions.
    pub fn with_tick_values(mut self, tick_values: Vec<f64>) -> Self {
        self.tick_values = tick_values;
        self
    }
}

/// A shared handle to one axis. Clones refer to the same live state.
#[derive(Clone, Debug)]
pub struct Axis {
    state: Rc<RefCell<AxisState>>,
}

impl Axis {
    /// Wraps an axis state in a shared handle.
    pub fn new(state: AxisState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Borrows the live state.
    ///
    /// Panics if the state is already mutably borrowed; callers never hold
    /// a borrow across a render or dispatch call.
    pub fn state(&self) -> Ref<'_, AxisState> {
        self.state.borrow()
    }

    /// Mutably borrows the live state. Mutations are visible to every
    /// holder of this axis.
    pub fn state_mut(&self) -> RefMut<'_, AxisState> {
        self.state.borrow_mut()
    }

    /// The axis orientation.
    pub fn orient(&self) -> AxisOrient {
        self.state.borrow().orient
    }

    /// The tick length.
    pub fn tick_size(&self) -> f64 {
        self.state.borrow().tick_size
    }

    /// A copy of the linear scale, if the axis has one.
    pub fn linear_scale(&self) -> Option<LinearScale> {
        self.state.borrow().scale.as_linear().copied()
    }

    /// A copy of the ordinal scale, if the axis has one.
    pub fn ordinal_scale(&self) -> Option<OrdinalScale> {
        self.state.borrow().scale.as_ordinal().cloned()
    }
}

/// A keyed container of named axes, one per chart instance.
///
/// Absence of an axis is a valid state; a canvas type may configure only
/// "x", only "y", or none at all.
#[derive(Clone, Default)]
pub struct AxesManager {
    axes: Rc<RefCell<HashMap<String, Axis>>>,
}

impl AxesManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the axis registered under `name`, if any. The returned
    /// handle is live: mutations through it are visible to all holders.
    pub fn axis(&self, name: &str) -> Option<Axis> {
        self.axes.borrow().get(name).cloned()
    }

    /// Registers or replaces the axis under `name`.
    pub fn set_axis(&self, name: impl Into<String>, state: AxisState) {
        self.axes
            .borrow_mut()
            .insert(name.into(), Axis::new(state));
    }

    /// The configured axis names, sorted for deterministic iteration.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.axes.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of configured axes.
    pub fn len(&self) -> usize {
        self.axes.borrow().len()
    }

    /// Whether no axis is configured.
    pub fn is_empty(&self) -> bool {
        self.axes.borrow().is_empty()
    }
}

impl fmt::Debug for AxesManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxesManager")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_handles_share_live_state() {
        let axes = AxesManager::new();
        axes.set_axis(
            "y",
            AxisState::new(LinearScale::new((0.0, 1.0), (100.0, 0.0)), AxisOrient::Left),
        );

        let reader = axes.axis("y").expect("y axis exists");
        let writer = axes.axis("y").expect("y axis exists");
        if let Some(s) = writer.state_mut().scale.as_linear_mut() {
            s.set_domain((0.0, 500.0));
        }
        assert_eq!(
            reader.linear_scale().expect("linear scale").domain(),
            (0.0, 500.0)
        );
    }

    #[test]
    fn missing_axis_is_a_valid_state() {
        let axes = AxesManager::new();
        assert!(axes.axis("x").is_none());
        assert!(axes.is_empty());
    }

    #[test]
    fn set_axis_replaces_the_descriptor() {
        let axes = AxesManager::new();
        axes.set_axis(
            "x",
            AxisState::new(LinearScale::new((0.0, 1.0), (0.0, 1.0)), AxisOrient::Bottom)
                .with_tick_size(5.0),
        );
        axes.set_axis(
            "x",
            AxisState::new(LinearScale::new((0.0, 1.0), (0.0, 1.0)), AxisOrient::Top),
        );
        let x = axes.axis("x").expect("x axis exists");
        assert_eq!(x.orient(), AxisOrient::Top);
        assert_eq!(x.tick_size(), 0.0);
        assert_eq!(axes.len(), 1);
    }
}
