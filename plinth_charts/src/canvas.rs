// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! The shared canvas.
//!
//! The canvas owns the drawing surface, dimension bookkeeping, and the
//! ordered list of attached chart layers (insertion order is z-order, and
//! is never reordered). It orchestrates axis rendering: tick sizes for all
//! axes are measured before any axis is positioned, because each axis's
//! placement depends on the insets of the others. Axis, grid, and
//! charts-area groups are removed and recreated wholesale on every pass, so
//! repeated renders never accumulate duplicate structure.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use plinth_core::{
    GroupId, Insets, Mark, MarkId, SharedViewport, Size, Surface, TextAnchor, TextBaseline,
    Viewport,
};

use crate::axes::{AxesManager, AxisOrient, AxisState};
use crate::config::class;
use crate::event::{EventBus, Signal, SignalKind};
use crate::layer::{LayerHandle, RenderOptions};
use crate::scale::Scale;

/// Mark-id slot reserved for axis marks.
const AXIS_SLOT: u32 = u32::MAX - 1;
/// Mark-id slot reserved for interaction zones.
const ZONE_SLOT: u32 = u32::MAX;
/// Mark-id slot reserved for grid lines drawn by canvas types.
pub const GRID_SLOT: u32 = u32::MAX - 2;

const AXIS_FONT_SIZE: f64 = 10.0;

/// Options for building a canvas.
#[derive(Clone, Debug)]
pub struct CanvasOptions {
    /// The container to measure.
    pub viewport: SharedViewport,
    /// Margins between the container edge and the drawing area.
    pub margins: Insets,
    /// The shared axes manager.
    pub axes: AxesManager,
    /// The per-chart event bus.
    pub events: EventBus,
}

#[derive(Clone, Copy, Debug, Default)]
struct TickSizes {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
}

impl TickSizes {
    fn get(&self, orient: AxisOrient) -> f64 {
        match orient {
            AxisOrient::Top => self.top,
            AxisOrient::Bottom => self.bottom,
            AxisOrient::Left => self.left,
            AxisOrient::Right => self.right,
        }
    }

    fn set(&mut self, orient: AxisOrient, size: f64) {
        match orient {
            AxisOrient::Top => self.top = size,
            AxisOrient::Bottom => self.bottom = size,
            AxisOrient::Left => self.left = size,
            AxisOrient::Right => self.right = size,
        }
    }
}

struct CanvasInner {
    surface: Surface,
    viewport: SharedViewport,
    margins: Insets,
    dimensions: Size,
    axes: AxesManager,
    events: EventBus,
    layers: Vec<LayerHandle>,
    tick_sizes: TickSizes,
    /// Interaction-zone hit rectangles in absolute surface coordinates.
    zones: Vec<Rect>,
    canvas_group: GroupId,
}

/// A clonable handle to the shared canvas.
#[derive(Clone)]
pub struct Canvas {
    inner: Rc<RefCell<CanvasInner>>,
}

impl Canvas {
    /// Builds the canvas: measures the container, creates the root canvas
    /// group with nested grid and charts-area groups, and wires
    /// `axis_updated` to re-render axes automatically.
    pub fn new(options: CanvasOptions) -> Self {
        let dimensions = measure(&options.viewport, options.margins);
        let mut surface = Surface::new();
        let canvas_group = surface.group(class::CANVAS);
        surface.set_translate(
            canvas_group,
            Vec2::new(options.margins.left, options.margins.top),
        );
        surface.group_under(canvas_group, class::GRID);
        surface.group_under(canvas_group, class::CHARTS_AREA);

        let events = options.events.clone();
        let canvas = Self {
            inner: Rc::new(RefCell::new(CanvasInner {
                surface,
                viewport: options.viewport,
                margins: options.margins,
                dimensions,
                axes: options.axes,
                events: options.events,
                layers: Vec::new(),
                tick_sizes: TickSizes::default(),
                zones: Vec::new(),
                canvas_group,
            })),
        };

        let weak = canvas.downgrade();
        events.subscribe(SignalKind::AxisUpdated, move |_| {
            if let Some(canvas) = weak.upgrade() {
                canvas.add_axes();
            }
        });

        canvas
    }

    /// Returns a non-owning handle for use in event subscriptions, which
    /// must not keep the canvas alive.
    pub fn downgrade(&self) -> WeakCanvas {
        WeakCanvas {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// The current drawing-area dimensions (container minus margins).
    pub fn dimensions(&self) -> Size {
        self.inner.borrow().dimensions
    }

    /// The configured margins.
    pub fn margins(&self) -> Insets {
        self.inner.borrow().margins
    }

    /// Re-measures the container and updates the drawing-area dimensions.
    pub fn refresh_dimensions(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.dimensions = measure(&inner.viewport, inner.margins);
        let group = inner.canvas_group;
        let translate = Vec2::new(inner.margins.left, inner.margins.top);
        inner.surface.set_translate(group, translate);
    }

    /// Renders `layer` immediately and appends it to the layer list.
    pub fn add(&self, layer: LayerHandle) -> &Self {
        layer.borrow_mut().render(&RenderOptions::first_paint());
        self.inner.borrow_mut().layers.push(layer);
        self
    }

    /// Recomputes dimensions, re-renders axes, and re-renders every
    /// attached layer in insertion order without entrance animation.
    pub fn redraw(&self) {
        tracing::debug!(layers = self.layer_count(), "canvas redraw");
        self.refresh_dimensions();
        self.add_axes();
        let layers: Vec<LayerHandle> = self.inner.borrow().layers.clone();
        for layer in layers {
            layer.borrow_mut().render(&RenderOptions::reflow());
        }
    }

    /// Draws every configured axis, then recreates the grid, charts-area,
    /// and interaction-zone groups, and finally fires `axis_rendered`.
    ///
    /// Idempotent: prior axis structure is cleared before drawing, so
    /// repeated calls with unchanged axes produce identical structure.
    pub fn add_axes(&self) {
        {
            let mut inner = self.inner.borrow_mut();

            // Measure every axis before positioning any of them; each
            // axis's placement depends on the insets of the others.
            let names = inner.axes.names();
            let mut tick_sizes = TickSizes::default();
            for name in &names {
                if let Some(axis) = inner.axes.axis(name) {
                    tick_sizes.set(axis.orient(), axis.tick_size());
                }
            }
            inner.tick_sizes = tick_sizes;
            let left = tick_sizes.get(AxisOrient::Left);
            let right = tick_sizes.get(AxisOrient::Right);
            let dims = inner.dimensions;

            inner.surface.remove_class(class::AXIS);
            let root = inner.canvas_group;
            for (pos, name) in names.iter().enumerate() {
                let Some(axis) = inner.axes.axis(name) else {
                    continue;
                };
                let state = axis.state().clone();
                let translate = match state.orient {
                    AxisOrient::Left => Vec2::new(left, 0.0),
                    AxisOrient::Bottom => Vec2::new(left, dims.height),
                    AxisOrient::Right => Vec2::new(dims.width - right, 0.0),
                    AxisOrient::Top => Vec2::new(left, 0.0),
                };
                let marks = axis_marks(pos, &state, dims);
                let group = inner
                    .surface
                    .group_under(root, &format!("{} {}-{name}", class::AXIS, class::AXIS));
                inner.surface.set_translate(group, translate);
                inner.surface.set_marks(group, marks);
            }

            // Recreate the content groups so stale per-type structure
            // never leaks across a recompute.
            inner.surface.remove_class(class::GRID);
            inner.surface.remove_class(class::CHARTS_AREA);
            let grid = inner.surface.group_under(root, class::GRID);
            inner.surface.set_translate(grid, Vec2::new(left, 0.0));
            let area = inner.surface.group_under(root, class::CHARTS_AREA);
            inner.surface.set_translate(area, Vec2::new(left, 0.0));

            rebuild_zones(&mut inner, left);
        }
        let events = self.inner.borrow().events.clone();
        events.trigger(&Signal::AxisRendered);
    }

    /// The measured tick size for an orientation; `0` when no axis with
    /// that orientation is configured.
    pub fn tick_size(&self, orient: AxisOrient) -> f64 {
        self.inner.borrow().tick_sizes.get(orient)
    }

    /// The interaction zone containing `point` (in container coordinates),
    /// if any.
    pub fn zone_at(&self, point: Point) -> Option<usize> {
        self.inner
            .borrow()
            .zones
            .iter()
            .position(|z| z.contains(point))
    }

    /// Number of interaction zones currently built.
    pub fn zone_count(&self) -> usize {
        self.inner.borrow().zones.len()
    }

    /// Number of attached layers.
    pub fn layer_count(&self) -> usize {
        self.inner.borrow().layers.len()
    }

    /// The attached layers, in insertion order.
    pub fn layers(&self) -> Vec<LayerHandle> {
        self.inner.borrow().layers.clone()
    }

    /// Runs `f` with mutable access to the drawing surface.
    ///
    /// The borrow is released before `f`'s result is returned; callers must
    /// not re-enter canvas methods from within `f`.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> R {
        f(&mut self.inner.borrow_mut().surface)
    }

    /// The group chart layers draw under, if axes have been rendered.
    pub fn charts_area(&self) -> Option<GroupId> {
        self.inner.borrow().surface.find(class::CHARTS_AREA)
    }

    /// The grid group, if axes have been rendered.
    pub fn grid_group(&self) -> Option<GroupId> {
        self.inner.borrow().surface.find(class::GRID)
    }

    /// Serializes the full surface (drawing area plus margins) to SVG.
    pub fn to_svg_string(&self) -> String {
        let inner = self.inner.borrow();
        let size = Size::new(
            inner.dimensions.width + inner.margins.left + inner.margins.right,
            inner.dimensions.height + inner.margins.top + inner.margins.bottom,
        );
        inner.surface.to_svg_string(size)
    }
}

/// A non-owning [`Canvas`] handle.
#[derive(Clone)]
pub struct WeakCanvas {
    inner: Weak<RefCell<CanvasInner>>,
}

impl WeakCanvas {
    /// Upgrades back to a strong handle if the canvas still exists.
    pub fn upgrade(&self) -> Option<Canvas> {
        self.inner.upgrade().map(|inner| Canvas { inner })
    }
}

impl fmt::Debug for WeakCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakCanvas")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Canvas")
            .field("dimensions", &inner.dimensions)
            .field("layers", &inner.layers.len())
            .field("zones", &inner.zones.len())
            .finish()
    }
}

fn measure(viewport: &SharedViewport, margins: Insets) -> Size {
    let outer = viewport.size();
    Size::new(
        (outer.width - margins.left - margins.right).max(0.0),
        (outer.height - margins.top - margins.bottom).max(0.0),
    )
}

/// Rebuilds the per-category interaction zones from the ordinal "x" axis.
///
/// Zones are invisible hit rectangles, one per category, spanning from the
/// top of the plot down to the y position of zero. Canvases without an
/// ordinal "x" axis have no zones.
fn rebuild_zones(inner: &mut CanvasInner, left: f64) {
    inner.surface.remove_class(class::ZONES);
    inner.zones.clear();

    let Some(x) = inner.axes.axis("x").and_then(|a| a.ordinal_scale()) else {
        return;
    };
    let Some(y) = inner.axes.axis("y").and_then(|a| a.linear_scale()) else {
        return;
    };

    let root = inner.canvas_group;
    let group = inner.surface.group_under(root, class::ZONES);
    inner.surface.set_translate(group, Vec2::new(left, 0.0));

    let height = y.map(0.0);
    let band = x.band_width();
    let origin = Vec2::new(inner.margins.left + left, inner.margins.top);
    for i in 0..x.len() {
        let rect = Rect::new(x.position(i), 0.0, x.position(i) + band, height);
        inner.surface.push_mark(
            group,
            Mark::rect(MarkId::for_slot(ZONE_SLOT, i as u32), rect, Color::TRANSPARENT)
                .with_opacity(0.0),
        );
        inner.zones.push(rect + origin);
    }
}

/// Generates the marks for one axis: domain line, tick marks, and labels.
///
/// `pos` keeps mark ids distinct across axes; marks are positioned relative
/// to the axis group's translation.
fn axis_marks(pos: usize, state: &AxisState, dims: Size) -> Vec<Mark> {
    let base = (pos as u32) * 1000;
    let id = |i: u32| MarkId::for_slot(AXIS_SLOT, base + i);
    let tick = state.tick_size;
    let mut out = Vec::new();

    match (&state.scale, state.orient) {
        (Scale::Linear(scale), AxisOrient::Left | AxisOrient::Right) => {
            let dir = if state.orient == AxisOrient::Left {
                -1.0
            } else {
                1.0
            };
            out.push(Mark::line(
                id(0),
                Point::new(0.0, 0.0),
                Point::new(0.0, dims.height),
                Color::BLACK,
                1.0,
            ));
            for (i, v) in state.tick_values.iter().enumerate() {
                let y = scale.map(*v);
                if tick > 0.0 {
                    out.push(Mark::line(
                        id(1 + i as u32),
                        Point::new(0.0, y),
                        Point::new(dir * tick, y),
                        Color::BLACK,
                        1.0,
                    ));
                }
                out.push(
                    Mark::text(
                        id(500 + i as u32),
                        Point::new(dir * (tick + 4.0), y + 12.0),
                        format_value(*v),
                        AXIS_FONT_SIZE,
                    )
                    .with_anchor(
                        if state.orient == AxisOrient::Left {
                            TextAnchor::Start
                        } else {
                            TextAnchor::End
                        },
                        TextBaseline::Alphabetic,
                    ),
                );
            }
        }
        (Scale::Linear(scale), AxisOrient::Bottom | AxisOrient::Top) => {
            let dir = if state.orient == AxisOrient::Bottom {
                1.0
            } else {
                -1.0
            };
            out.push(Mark::line(
                id(0),
                Point::new(0.0, 0.0),
                Point::new(dims.width, 0.0),
                Color::BLACK,
                1.0,
            ));
            for (i, v) in state.tick_values.iter().enumerate() {
                let x = scale.map(*v);
                if tick > 0.0 {
                    out.push(Mark::line(
                        id(1 + i as u32),
                        Point::new(x, 0.0),
                        Point::new(x, dir * tick),
                        Color::BLACK,
                        1.0,
                    ));
                }
                out.push(
                    Mark::text(
                        id(500 + i as u32),
                        Point::new(x, dir * (tick + 14.0)),
                        format_value(*v),
                        AXIS_FONT_SIZE,
                    )
                    .with_anchor(TextAnchor::Middle, TextBaseline::Alphabetic),
                );
            }
        }
        (Scale::Ordinal(scale), AxisOrient::Bottom | AxisOrient::Top) => {
            let dir = if state.orient == AxisOrient::Bottom {
                1.0
            } else {
                -1.0
            };
            let span = scale.range().1 - scale.range().0;
            out.push(Mark::line(
                id(0),
                Point::new(0.0, 0.0),
                Point::new(span, 0.0),
                Color::BLACK,
                1.0,
            ));
            let band = scale.band_width();
            for (i, category) in scale.domain().iter().enumerate() {
                let x = scale.position(i) + band / 2.0;
                out.push(
                    Mark::text(
                        id(500 + i as u32),
                        Point::new(x, dir * (tick + 14.0)),
                        category.clone(),
                        AXIS_FONT_SIZE,
                    )
                    .with_anchor(TextAnchor::Middle, TextBaseline::Alphabetic),
                );
            }
        }
        (Scale::Ordinal(scale), AxisOrient::Left | AxisOrient::Right) => {
            let dir = if state.orient == AxisOrient::Left {
                -1.0
            } else {
                1.0
            };
            let span = scale.range().1 - scale.range().0;
            out.push(Mark::line(
                id(0),
                Point::new(0.0, 0.0),
                Point::new(0.0, span),
                Color::BLACK,
                1.0,
            ));
            let band = scale.band_width();
            for (i, category) in scale.domain().iter().enumerate() {
                let y = scale.position(i) + band / 2.0;
                out.push(
                    Mark::text(
                        id(500 + i as u32),
                        Point::new(dir * (tick + 4.0), y),
                        category.clone(),
                        AXIS_FONT_SIZE,
                    )
                    .with_anchor(
                        if state.orient == AxisOrient::Left {
                            TextAnchor::End
                        } else {
                            TextAnchor::Start
                        },
                        TextBaseline::Middle,
                    ),
                );
            }
        }
    }
    out
}

fn format_value(v: f64) -> String {
    if v == v.trunc() {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}
