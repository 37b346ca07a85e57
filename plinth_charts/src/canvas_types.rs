// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! The concrete axis configurations.
//!
//! Each canvas type owns one way of mapping raw data to screen coordinates
//! and writes all of its scale state into the shared [`AxesManager`]:
//!
//! - [`OrdinalBands`]: category bands along the bottom, a linear value axis
//!   on the left. Bar, dots, and benchmark layers run on this one.
//! - [`LinearSpans`]: a linear value axis along the bottom, category bands
//!   on the left. Horizontal bar layers run on this one.
//! - [`FreeCanvas`]: no axes at all, for donut layers.

use kurbo::Point;
use peniko::Color;
use plinth_core::{Mark, MarkId};

use crate::axes::{AxesManager, AxisOrient, AxisState};
use crate::canvas::{Canvas, GRID_SLOT};
use crate::chart::{CanvasType, ChartOptions, DomainUpdate};
use crate::data::RawData;
use crate::defer::{Deferred, Scheduler};
use crate::domain;
use crate::event::{EventBus, Signal};
use crate::scale::{LinearScale, OrdinalScale};

const GRID_COLOR: Color = Color::from_rgb8(0xe6, 0xe6, 0xe6);
const GRID_EDGE_COLOR: Color = Color::from_rgb8(0xb4, 0xb4, 0xb4);
const TICK_COUNT: usize = 4;

/// Ordinal category bands on "x", a linear value scale on "y".
#[derive(Clone, Copy, Debug, Default)]
pub struct OrdinalBands;

impl OrdinalBands {
    /// Values on this configuration round their domain maximum up to the
    /// next multiple of this.
    pub const ROUND_TO: f64 = 100.0;

    /// Creates the configuration.
    pub fn new() -> Self {
        Self
    }
}

impl CanvasType for OrdinalBands {
    fn class_name(&self) -> &'static str {
        "ordinal-bands"
    }

    fn set_axes(&self, canvas: &Canvas, axes: &AxesManager, options: &ChartOptions) {
        let dims = canvas.dimensions();
        let plot_width = (dims.width - options.tick_size - options.tick_space).max(0.0);

        axes.set_axis(
            "x",
            AxisState::new(
                OrdinalScale::new(options.categories.clone(), (0.0, plot_width), 0.05),
                AxisOrient::Bottom,
            ),
        );

        // Keep a previously computed domain across resizes; only the range
        // tracks the container.
        let prior = axes.axis("y").and_then(|a| a.linear_scale());
        let domain = prior.map_or((0.0, 1.0), |s| s.domain());
        axes.set_axis(
            "y",
            AxisState::new(
                LinearScale::new(domain, (dims.height, 0.0)),
                AxisOrient::Left,
            )
            .with_tick_size(options.tick_size)
            .with_tick_values(domain::tick_values(domain, TICK_COUNT)),
        );
    }

    fn update_axes(
        &self,
        axes: &AxesManager,
        data: &RawData,
        events: &EventBus,
        scheduler: &Scheduler,
    ) -> Deferred<DomainUpdate> {
        recompute_value_axis(axes, data, events, scheduler, "y", Self::ROUND_TO)
    }

    fn after_axis_rendered(&self, canvas: &Canvas, axes: &AxesManager) {
        let Some(grid) = canvas.grid_group() else {
            return;
        };
        let Some(y_axis) = axes.axis("y") else {
            return;
        };
        let Some(y) = y_axis.linear_scale() else {
            return;
        };
        let ticks = y_axis.state().tick_values.clone();
        let width = axes
            .axis("x")
            .and_then(|a| a.ordinal_scale())
            .map_or(canvas.dimensions().width, |s| s.range().1 - s.range().0);

        let marks = ticks
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let pos = y.map(*v);
                grid_line(
                    i,
                    Point::new(0.0, pos),
                    Point::new(width, pos),
                    i == 0 || i + 1 == ticks.len(),
                )
            })
            .collect();
        canvas.with_surface(|s| s.set_marks(grid, marks));
    }
}

/// A linear value scale on "x", ordinal category bands on "y".
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearSpans;

impl LinearSpans {
    /// Values on this configuration round their domain maximum up to the
    /// next multiple of this.
    pub const ROUND_TO: f64 = 10.0;

    /// Creates the configuration.
    pub fn new() -> Self {
        Self
    }
}

impl CanvasType for LinearSpans {
    fn class_name(&self) -> &'static str {
        "linear-spans"
    }

    fn set_axes(&self, canvas: &Canvas, axes: &AxesManager, options: &ChartOptions) {
        let dims = canvas.dimensions();
        let plot_width = (dims.width - options.tick_size - options.tick_space).max(0.0);

        let prior = axes.axis("x").and_then(|a| a.linear_scale());
        let domain = prior.map_or((0.0, 1.0), |s| s.domain());
        axes.set_axis(
            "x",
            AxisState::new(
                LinearScale::new(domain, (0.0, plot_width)),
                AxisOrient::Bottom,
            )
            .with_tick_values(domain::tick_values(domain, TICK_COUNT)),
        );

        axes.set_axis(
            "y",
            AxisState::new(
                OrdinalScale::new(options.categories.clone(), (0.0, dims.height), 0.0),
                AxisOrient::Left,
            )
            .with_tick_size(options.tick_size),
        );
    }

    fn update_axes(
        &self,
        axes: &AxesManager,
        data: &RawData,
        events: &EventBus,
        scheduler: &Scheduler,
    ) -> Deferred<DomainUpdate> {
        recompute_value_axis(axes, data, events, scheduler, "x", Self::ROUND_TO)
    }

    fn after_axis_rendered(&self, canvas: &Canvas, axes: &AxesManager) {
        let Some(grid) = canvas.grid_group() else {
            return;
        };
        let Some(x_axis) = axes.axis("x") else {
            return;
        };
        let Some(x) = x_axis.linear_scale() else {
            return;
        };
        let ticks = x_axis.state().tick_values.clone();
        let height = axes
            .axis("y")
            .and_then(|a| a.ordinal_scale())
            .map_or(canvas.dimensions().height, |s| s.range().1 - s.range().0);

        let marks = ticks
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let pos = x.map(*v);
                grid_line(
                    i,
                    Point::new(pos, 0.0),
                    Point::new(pos, height),
                    i == 0 || i + 1 == ticks.len(),
                )
            })
            .collect();
        canvas.with_surface(|s| s.set_marks(grid, marks));
    }
}

/// No axes; layers place themselves freely on the canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeCanvas;

impl FreeCanvas {
    /// Creates the configuration.
    pub fn new() -> Self {
        Self
    }
}

impl CanvasType for FreeCanvas {
    fn class_name(&self) -> &'static str {
        "free"
    }

    fn set_axes(&self, _canvas: &Canvas, _axes: &AxesManager, _options: &ChartOptions) {}

    fn update_axes(
        &self,
        _axes: &AxesManager,
        _data: &RawData,
        _events: &EventBus,
        scheduler: &Scheduler,
    ) -> Deferred<DomainUpdate> {
        let deferred = Deferred::new(scheduler);
        deferred.resolve_later(|| DomainUpdate { changed: false });
        deferred
    }
}

/// Schedules a recompute of the named linear value axis from the full
/// accumulator.
///
/// The queued task reads the accumulator as of its run turn, writes the
/// resulting domain and tick values into the axis, and fires `axis_updated`
/// when the domain actually moved.
fn recompute_value_axis(
    axes: &AxesManager,
    data: &RawData,
    events: &EventBus,
    scheduler: &Scheduler,
    axis_name: &'static str,
    round_to: f64,
) -> Deferred<DomainUpdate> {
    let deferred = Deferred::new(scheduler);
    let axes = axes.clone();
    let data = data.clone();
    let events = events.clone();
    deferred.resolve_later(move || {
        let snapshot = data.snapshot();
        let values = domain::all_values(&snapshot);
        let new_domain = domain::value_domain(&values, round_to);
        tracing::debug!(axis = axis_name, ?new_domain, series = snapshot.len(), "domain recompute");

        let Some(axis) = axes.axis(axis_name) else {
            return DomainUpdate { changed: false };
        };
        let changed;
        {
            let mut state = axis.state_mut();
            let prior = state.scale.as_linear().map(|s| s.domain());
            changed = prior != Some(new_domain);
            if let Some(scale) = state.scale.as_linear_mut() {
                scale.set_domain(new_domain);
            }
            state.tick_values = domain::tick_values(new_domain, TICK_COUNT);
        }
        // The borrow is released; listeners may read the axis freely.
        if changed {
            events.trigger(&Signal::AxisUpdated);
        }
        DomainUpdate { changed }
    });
    deferred
}

fn grid_line(i: usize, p0: Point, p1: Point, edge: bool) -> Mark {
    let color = if edge { GRID_EDGE_COLOR } else { GRID_COLOR };
    Mark::line(MarkId::for_slot(GRID_SLOT, i as u32), p0, p1, color, 1.0)
}
