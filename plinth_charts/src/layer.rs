// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! The chart-layer contract.
//!
//! A chart layer is one renderer instance stacked on a shared canvas. It
//! owns its own surface group, reads the shared axes and palette, and never
//! touches another layer's data or index range. Render must be idempotent:
//! the canvas calls it once at add time and again on every redraw.

use std::cell::RefCell;
use std::rc::Rc;

use crate::axes::AxesManager;
use crate::canvas::Canvas;
use crate::config::ColorScale;
use crate::data::{LayerData, Series};
use crate::event::{EventBus, LayerKind};

/// Per-render options.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Whether entrance animation descriptors should be attached. Reflows
    /// (resize, domain change) render without them so the user does not see
    /// a re-animation.
    pub animation: bool,
}

impl RenderOptions {
    /// Options for a layer's first paint.
    pub fn first_paint() -> Self {
        Self { animation: true }
    }

    /// Options for a reflow render; jumps straight to final visual state.
    pub fn reflow() -> Self {
        Self { animation: false }
    }
}

/// Caller-supplied options for one `add` call.
#[derive(Clone, Debug)]
pub struct LayerOptions {
    /// The data the layer renders.
    pub data: LayerData,
    /// The layer's visual kind.
    pub kind: LayerKind,
    /// For donut layers: the name of the series whose values drive the
    /// sector shares. Defaults to the first series.
    pub value_series: Option<String>,
    /// For donut layers: the ring thickness in surface units.
    pub inner_radius: f64,
}

impl LayerOptions {
    /// Creates options for a layer of `kind` rendering `data`.
    pub fn new(kind: LayerKind, data: LayerData) -> Self {
        Self {
            data,
            kind,
            value_series: None,
            inner_radius: 50.0,
        }
    }

    /// Selects the series driving a donut's sector shares.
    pub fn with_value_series(mut self, name: impl Into<String>) -> Self {
        self.value_series = Some(name.into());
        self
    }

    /// Sets a donut's ring thickness.
    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = inner_radius;
        self
    }
}

/// Everything a chart layer is constructed with. All handles are shared
/// with the owning chart; the layer is a reader of scale state, never a
/// writer.
#[derive(Clone, Debug)]
pub struct LayerParams {
    /// The layer's own data slice, with accumulator indices assigned.
    pub data: Vec<Series>,
    /// The shared canvas.
    pub canvas: Canvas,
    /// The shared axes manager.
    pub axes: AxesManager,
    /// The options this layer was added with.
    pub options: LayerOptions,
    /// The shared palette.
    pub colors: ColorScale,
    /// The per-chart event bus.
    pub events: EventBus,
    /// The layer's visual kind.
    pub kind: LayerKind,
    /// The layer's index on the canvas; the correlation key for hover
    /// events and the default palette position.
    pub index: usize,
}

/// The contract every chart layer satisfies.
pub trait ChartLayer {
    /// Constructs the layer from its parameters.
    fn new(params: LayerParams) -> Self
    where
        Self: Sized;

    /// Draws (or redraws) the layer into its surface group.
    fn render(&mut self, options: &RenderOptions);

    /// The pointer entered this layer's interaction zone `zone`.
    fn on_zone_mouseover(&mut self, zone: usize);

    /// The pointer left this layer's interaction zone `zone`.
    fn on_zone_mouseout(&mut self, zone: usize);
}

/// A shared handle to a chart layer on the canvas.
pub type LayerHandle = Rc<RefCell<dyn ChartLayer>>;

/// The class token unique to the layer at `index`; renderers remove their
/// previous group by this token before redrawing.
pub fn layer_class(index: usize) -> String {
    format!("{}-{index}", crate::config::class::LAYER)
}
