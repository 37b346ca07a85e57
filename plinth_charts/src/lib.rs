// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! A layered charting engine.
//!
//! Plinth takes tabular data (named categories crossed with named value
//! series) and renders bar, dot, benchmark-marker, horizontal-bar, and
//! donut layers onto a shared [`Canvas`], with shared axis scaling,
//! per-category hover interactions, and container-resize responsiveness.
//!
//! The moving parts, leaf to root:
//!
//! - [`Scale`]s map data to screen coordinates; the [`AxesManager`] holds
//!   them behind live shared handles.
//! - The [`EventBus`] carries the four chart signals between collaborators.
//! - The [`Canvas`] owns the drawing surface, axis rendering, and the
//!   ordered layer list.
//! - A [`CanvasType`] decides which axes exist and how domains are
//!   recomputed; a [`ChartLayer`] renders one dataset onto the canvas.
//! - The [`Chart`] orchestrator wires all of the above together and owns
//!   the raw-data accumulator and task queue.
//!
//! ```
//! use plinth_charts::{
//!     BarLayer, Chart, ChartOptions, LayerData, LayerKind, LayerOptions,
//!     OrdinalBands, Series,
//! };
//! use plinth_core::SharedViewport;
//!
//! let viewport = SharedViewport::new(640.0, 360.0);
//! let chart = Chart::new(
//!     OrdinalBands::new(),
//!     ChartOptions::new()
//!         .with_viewport(viewport)
//!         .with_categories(["Jan", "Feb", "Mar"]),
//! )?;
//! chart.add::<BarLayer>(LayerOptions::new(
//!     LayerKind::Bar,
//!     LayerData::One(Series::new("sales", vec![120.0, 90.0, 160.0])),
//! ));
//! chart.settle();
//! let svg = chart.to_svg_string();
//! # assert!(svg.contains("plinth-layer-0"));
//! # Ok::<(), plinth_charts::ChartError>(())
//! ```

mod axes;
mod bar;
mod benchmark;
mod canvas;
mod canvas_types;
mod chart;
mod config;
mod data;
mod defer;
mod domain;
mod donut;
mod dots;
mod error;
mod event;
mod horizontal;
mod layer;
mod scale;

#[cfg(test)]
mod compose_tests;

pub use axes::{AxesManager, Axis, AxisOrient, AxisState};
pub use bar::BarLayer;
pub use benchmark::BenchmarkLayer;
pub use canvas::{Canvas, CanvasOptions, WeakCanvas, GRID_SLOT};
pub use canvas_types::{FreeCanvas, LinearSpans, OrdinalBands};
pub use chart::{CanvasType, Chart, ChartOptions, DomainUpdate};
pub use config::{class, default_margins, default_palette, ColorScale};
pub use data::{LayerData, RawData, Series, SeriesKind};
pub use defer::{Deferred, Scheduler};
pub use domain::{all_values, has_negative, tick_values, value_domain};
pub use donut::DonutLayer;
pub use dots::DotsLayer;
pub use error::ChartError;
pub use event::{EventBus, LayerKey, LayerKind, Signal, SignalKind};
pub use horizontal::HorizontalBarLayer;
pub use layer::{
    layer_class, ChartLayer, LayerHandle, LayerOptions, LayerParams, RenderOptions,
};
pub use scale::{LinearScale, OrdinalScale, Scale};
