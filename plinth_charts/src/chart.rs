// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! The chart orchestrator.
//!
//! A [`Chart`] ties one canvas type to one canvas, one axes manager, one
//! event bus, one task queue, and one raw-data accumulator. Everything is
//! injected by reference into the layers it constructs; nothing is global,
//! so several charts coexist on one page without cross-talk.
//!
//! `add` is the interesting path: the new layer's data is merged into the
//! accumulator first, then the canvas type recomputes the shared scale
//! domains on a queue turn, and only after that recompute resolves is the
//! layer rendered. Back-to-back adds therefore settle to the union domain
//! of everything added so far, and a layer is never painted against a stale
//! scale.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use kurbo::Point;
use peniko::Color;
use plinth_core::{Insets, SharedViewport};

use crate::axes::AxesManager;
use crate::canvas::{Canvas, CanvasOptions};
use crate::config::{self, ColorScale};
use crate::data::RawData;
use crate::defer::{Deferred, Scheduler};
use crate::error::ChartError;
use crate::event::{EventBus, LayerKey, Signal, SignalKind};
use crate::layer::{ChartLayer, LayerHandle, LayerOptions, LayerParams};

/// Chart-level configuration.
#[derive(Clone, Debug, Default)]
pub struct ChartOptions {
    /// The container to draw into. Required; a chart without one cannot be
    /// measured and fails construction.
    pub viewport: Option<SharedViewport>,
    /// The category names shared by every series on the chart.
    pub categories: Vec<String>,
    /// Tick length for the value axis, in surface units.
    pub tick_size: f64,
    /// Gap between the value-axis ticks and the plot, in surface units.
    pub tick_space: f64,
    /// Series palette override.
    pub palette: Option<Vec<Color>>,
    /// Margin override.
    pub margins: Option<Insets>,
}

impl ChartOptions {
    /// Creates options with the default tick layout and no viewport.
    pub fn new() -> Self {
        Self {
            viewport: None,
            categories: Vec::new(),
            tick_size: 40.0,
            tick_space: 10.0,
            palette: None,
            margins: None,
        }
    }

    /// Sets the container to draw into.
    pub fn with_viewport(mut self, viewport: SharedViewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Sets the category names.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value-axis tick length.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Sets the gap between value-axis ticks and the plot.
    pub fn with_tick_space(mut self, tick_space: f64) -> Self {
        self.tick_space = tick_space;
        self
    }

    /// Overrides the series palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Overrides the margins.
    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = Some(margins);
        self
    }
}

/// The outcome of a domain recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainUpdate {
    /// Whether any scale domain actually changed. Unchanged domains let the
    /// caller skip a full redraw of already-attached layers.
    pub changed: bool,
}

/// A concrete axis configuration: how raw data maps to screen coordinates.
///
/// One canvas type per chart; it owns no state of its own and writes all
/// scale state into the shared [`AxesManager`].
pub trait CanvasType {
    /// A short class token naming the configuration, used on the surface.
    fn class_name(&self) -> &'static str;

    /// (Re)creates this configuration's axes against the current canvas
    /// dimensions. Runs at construction and again on every recalculate, so
    /// ranges track the container size.
    fn set_axes(&self, canvas: &Canvas, axes: &AxesManager, options: &ChartOptions);

    /// Recomputes scale domains from the full raw-data accumulator.
    ///
    /// The work runs on a later queue turn and must read the accumulator
    /// then, not at call time. Implementations that change a domain write
    /// it into the axes and fire `axis_updated` before resolving. An empty
    /// accumulator resolves with the documented default domain rather than
    /// failing.
    fn update_axes(
        &self,
        axes: &AxesManager,
        data: &RawData,
        events: &EventBus,
        scheduler: &Scheduler,
    ) -> Deferred<DomainUpdate>;

    /// Hook run after every `axis_rendered`; canvas types draw their grid
    /// lines here. Default: nothing.
    fn after_axis_rendered(&self, canvas: &Canvas, axes: &AxesManager) {
        let _ = (canvas, axes);
    }
}

/// One chart instance: a canvas type plus the shared collaborators it
/// injects into every layer.
pub struct Chart {
    canvas_type: Rc<dyn CanvasType>,
    options: ChartOptions,
    canvas: Canvas,
    axes: AxesManager,
    events: EventBus,
    scheduler: Scheduler,
    data: RawData,
    colors: ColorScale,
    count: Cell<usize>,
    hovered: Cell<Option<usize>>,
}

impl Chart {
    /// Builds a chart.
    ///
    /// Fails fast when `options` carries no viewport; no canvas is built in
    /// that case. Construction schedules the initial domain recompute; call
    /// [`Chart::settle`] (or drive the scheduler externally) to run it.
    pub fn new(
        canvas_type: impl CanvasType + 'static,
        options: ChartOptions,
    ) -> Result<Self, ChartError> {
        let Some(viewport) = options.viewport.clone() else {
            return Err(ChartError::MissingViewport);
        };
        let events = EventBus::new();
        let axes = AxesManager::new();
        let canvas = Canvas::new(CanvasOptions {
            viewport,
            margins: options.margins.unwrap_or_else(config::default_margins),
            axes: axes.clone(),
            events: events.clone(),
        });
        let colors = match &options.palette {
            Some(palette) => ColorScale::new(palette.clone()),
            None => ColorScale::default(),
        };

        let chart = Self {
            canvas_type: Rc::new(canvas_type),
            options,
            canvas,
            axes,
            events,
            scheduler: Scheduler::new(),
            data: RawData::new(),
            colors,
            count: Cell::new(0),
            hovered: Cell::new(None),
        };

        {
            let canvas_type = Rc::clone(&chart.canvas_type);
            let weak = chart.canvas.downgrade();
            let axes = chart.axes.clone();
            chart.events.subscribe(SignalKind::AxisRendered, move |_| {
                if let Some(canvas) = weak.upgrade() {
                    canvas_type.after_axis_rendered(&canvas, &axes);
                }
            });
        }

        chart.recalculate();
        Ok(chart)
    }

    /// Adds a chart layer rendering `options.data`.
    ///
    /// The data is merged into the accumulator and the layer constructed
    /// immediately; rendering happens after the scheduled domain recompute
    /// resolves. When that recompute changed a domain, already-attached
    /// layers are redrawn first so every layer is painted against the same
    /// scales.
    ///
    /// Returns a handle to the constructed layer; the chart keeps its own.
    pub fn add<L: ChartLayer + 'static>(&self, options: LayerOptions) -> Rc<RefCell<L>> {
        let data = self.data.merge(&options.data);
        let index = self.count.get();
        self.count.set(index + 1);
        let kind = options.kind;
        tracing::debug!(?kind, index, series = data.len(), "adding chart layer");

        let layer = Rc::new(RefCell::new(L::new(LayerParams {
            data,
            canvas: self.canvas.clone(),
            axes: self.axes.clone(),
            options,
            colors: self.colors.clone(),
            events: self.events.clone(),
            kind,
            index,
        })));

        // Hover wiring is scoped to this layer's index. Weak, so the bus
        // does not keep the layer alive.
        let key = LayerKey { kind, index };
        {
            let layer = Rc::downgrade(&layer);
            self.events
                .subscribe_keyed(SignalKind::ZoneMouseover, key, move |signal| {
                    if let (Some(layer), Some(zone)) = (layer.upgrade(), signal.zone_index()) {
                        layer.borrow_mut().on_zone_mouseover(zone);
                    }
                });
        }
        {
            let layer = Rc::downgrade(&layer);
            self.events
                .subscribe_keyed(SignalKind::ZoneMouseout, key, move |signal| {
                    if let (Some(layer), Some(zone)) = (layer.upgrade(), signal.zone_index()) {
                        layer.borrow_mut().on_zone_mouseout(zone);
                    }
                });
        }

        let update = self
            .canvas_type
            .update_axes(&self.axes, &self.data, &self.events, &self.scheduler);
        let canvas = self.canvas.clone();
        let handle: LayerHandle = layer.clone();
        update.then(move |update: DomainUpdate| {
            if update.changed {
                canvas.redraw();
            }
            canvas.add(handle);
        });

        layer
    }

    /// Re-derives axis configuration against the current container size and
    /// schedules a domain recompute; the canvas redraws once it resolves.
    pub fn recalculate(&self) {
        tracing::debug!("recalculating chart scales");
        self.canvas.refresh_dimensions();
        self.canvas_type
            .set_axes(&self.canvas, &self.axes, &self.options);
        let update = self
            .canvas_type
            .update_axes(&self.axes, &self.data, &self.events, &self.scheduler);
        let canvas = self.canvas.clone();
        update.then(move |_| canvas.redraw());
    }

    /// The host observed a container resize.
    pub fn viewport_resized(&self) {
        self.recalculate();
    }

    /// The pointer moved to `point`, in container coordinates. Zone entry
    /// and exit signals are derived from the transition since the last call.
    pub fn pointer_moved(&self, point: Point) {
        let zone = self.canvas.zone_at(point);
        let previous = self.hovered.get();
        if zone == previous {
            return;
        }
        if let Some(old) = previous {
            self.events.trigger(&Signal::ZoneMouseout(old));
        }
        if let Some(new) = zone {
            self.events.trigger(&Signal::ZoneMouseover(new));
        }
        self.hovered.set(zone);
    }

    /// The pointer left the container.
    pub fn pointer_left(&self) {
        if let Some(old) = self.hovered.take() {
            self.events.trigger(&Signal::ZoneMouseout(old));
        }
    }

    /// Runs the task queue until every scheduled recompute and render has
    /// settled. Returns the number of tasks run.
    pub fn settle(&self) -> usize {
        self.scheduler.run_until_idle()
    }

    /// The color assigned to series or layer position `i`.
    pub fn color(&self, i: usize) -> Color {
        self.colors.color(i)
    }

    /// The shared canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The shared axes manager.
    pub fn axes(&self) -> &AxesManager {
        &self.axes
    }

    /// The per-chart event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The raw-data accumulator.
    pub fn data(&self) -> &RawData {
        &self.data
    }

    /// The chart-level options this chart was built with.
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Serializes the current surface to SVG.
    pub fn to_svg_string(&self) -> String {
        self.canvas.to_svg_string()
    }
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("canvas_type", &self.canvas_type.class_name())
            .field("layers", &self.count.get())
            .field("series", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullType;

    impl CanvasType for NullType {
        fn class_name(&self) -> &'static str {
            "null"
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

    #[test]
    fn missing_viewport_fails_before_building_a_canvas() {
        let err = Chart::new(NullType, ChartOptions::new());
        assert!(matches!(err, Err(ChartError::MissingViewport)));
    }

    #[test]
    fn construction_schedules_the_initial_recompute() {
        let chart = Chart::new(
            NullType,
            ChartOptions::new().with_viewport(SharedViewport::new(300.0, 200.0)),
        )
        .expect("viewport provided");
        // The recompute task plus the redraw continuation.
        assert!(chart.settle() >= 2);
        assert_eq!(chart.settle(), 0);
    }

    #[test]
    fn pointer_transitions_fire_exit_before_entry() {
        let chart = Chart::new(
            NullType,
            ChartOptions::new().with_viewport(SharedViewport::new(300.0, 200.0)),
        )
        .expect("viewport provided");
        chart.settle();

        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [SignalKind::ZoneMouseover, SignalKind::ZoneMouseout] {
            let log = Rc::clone(&log);
            chart.events().subscribe(kind, move |signal| {
                log.borrow_mut().push(*signal);
            });
        }

        // No zones are configured, so motion inside the canvas never fires.
        chart.pointer_moved(Point::new(50.0, 50.0));
        chart.pointer_left();
        assert!(log.borrow().is_empty());
    }
}
