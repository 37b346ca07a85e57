// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Whole-engine tests: orchestrator, canvas, axes, and layers together.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use plinth_core::SharedViewport;

use crate::axes::AxesManager;
use crate::canvas_types::OrdinalBands;
use crate::chart::{Chart, ChartOptions};
use crate::data::{LayerData, Series};
use crate::event::LayerKind;
use crate::layer::{ChartLayer, LayerOptions, LayerParams, RenderOptions};
use crate::{BarLayer, BenchmarkLayer};

thread_local! {
    /// (layer index, animation flag, observed y domain) per render call.
    static RENDER_LOG: RefCell<Vec<(usize, bool, (f64, f64))>> = RefCell::new(Vec::new());
    /// (layer index, "over"/"out", zone) per hover callback.
    static ZONE_LOG: RefCell<Vec<(usize, &'static str, usize)>> = RefCell::new(Vec::new());
}

fn reset_logs() {
    RENDER_LOG.with(|l| l.borrow_mut().clear());
    ZONE_LOG.with(|l| l.borrow_mut().clear());
}

fn render_log() -> Vec<(usize, bool, (f64, f64))> {
    RENDER_LOG.with(|l| l.borrow().clone())
}

fn zone_log() -> Vec<(usize, &'static str, usize)> {
    ZONE_LOG.with(|l| l.borrow().clone())
}

/// A layer that draws nothing and records every call it receives.
struct ProbeLayer {
    axes: AxesManager,
    index: usize,
}

impl ChartLayer for ProbeLayer {
    fn new(params: LayerParams) -> Self {
        Self {
            axes: params.axes,
            index: params.index,
        }
    }

    fn render(&mut self, options: &RenderOptions) {
        let domain = self
            .axes
            .axis("y")
            .and_then(|a| a.linear_scale())
            .map_or((f64::NAN, f64::NAN), |s| s.domain());
        RENDER_LOG.with(|l| l.borrow_mut().push((self.index, options.animation, domain)));
    }

    fn on_zone_mouseover(&mut self, zone: usize) {
        ZONE_LOG.with(|l| l.borrow_mut().push((self.index, "over", zone)));
    }

    fn on_zone_mouseout(&mut self, zone: usize) {
        ZONE_LOG.with(|l| l.borrow_mut().push((self.index, "out", zone)));
    }
}

fn bands_chart(viewport: &SharedViewport) -> Chart {
    Chart::new(
        OrdinalBands::new(),
        ChartOptions::new()
            .with_viewport(viewport.clone())
            .with_categories(["Jan", "Feb", "Mar"]),
    )
    .expect("viewport provided")
}

fn probe_options(name: &str, values: Vec<f64>) -> LayerOptions {
    LayerOptions::new(LayerKind::Bar, LayerData::One(Series::new(name, values)))
}

#[test]
fn domains_settle_to_the_union_of_all_added_data() {
    reset_logs();
    let viewport = SharedViewport::new(440.0, 240.0);
    let chart = bands_chart(&viewport);
    chart.add::<ProbeLayer>(probe_options("s1", vec![10.0, 20.0, 15.0]));
    chart.add::<ProbeLayer>(probe_options("s2", vec![5.0, 250.0, 40.0]));
    chart.settle();

    let y = chart
        .axes()
        .axis("y")
        .and_then(|a| a.linear_scale())
        .expect("y axis");
    assert_eq!(y.domain(), (0.0, 300.0));

    // Neither layer was ever painted against a stale domain.
    for (_, _, domain) in render_log() {
        assert_eq!(domain, (0.0, 300.0));
    }
}

#[test]
fn layers_render_only_after_their_domain_recompute_resolves() {
    reset_logs();
    let viewport = SharedViewport::new(440.0, 240.0);
    let chart = bands_chart(&viewport);
    chart.settle();

    chart.add::<ProbeLayer>(probe_options("s1", vec![10.0, 20.0, 15.0]));
    chart.settle();
    chart.add::<ProbeLayer>(probe_options("s2", vec![5.0, 250.0, 40.0]));
    chart.settle();

    // First paint of layer 0 at the post-first-add domain, a reflow of
    // layer 0 when the second add widens it, then layer 1's first paint.
    assert_eq!(
        render_log(),
        vec![
            (0, true, (0.0, 100.0)),
            (0, false, (0.0, 300.0)),
            (1, true, (0.0, 300.0)),
        ]
    );
}

#[test]
fn redraw_rerenders_every_layer_once_in_add_order() {
    reset_logs();
    let viewport = SharedViewport::new(440.0, 240.0);
    let chart = bands_chart(&viewport);
    let first = chart.add::<ProbeLayer>(probe_options("s1", vec![10.0, 20.0, 15.0]));
    chart.add::<ProbeLayer>(probe_options("s2", vec![30.0, 40.0, 50.0]));
    chart.add::<ProbeLayer>(probe_options("s3", vec![60.0, 70.0, 80.0]));
    chart.settle();
    reset_logs();

    chart.canvas().redraw();

    let log = render_log();
    assert_eq!(log.len(), 3);
    assert_eq!(
        log.iter().map(|(i, anim, _)| (*i, *anim)).collect::<Vec<_>>(),
        vec![(0, false), (1, false), (2, false)]
    );
    assert_eq!(chart.canvas().layer_count(), 3);

    // Same object identity as before the redraw.
    let kept = chart.canvas().layers();
    assert!(std::ptr::eq(
        Rc::as_ptr(&kept[0]).cast::<u8>(),
        Rc::as_ptr(&first).cast::<u8>(),
    ));
}

#[test]
fn zone_signals_reach_only_the_matching_layer_index() {
    reset_logs();
    let viewport = SharedViewport::new(440.0, 240.0);
    let chart = bands_chart(&viewport);
    chart.add::<ProbeLayer>(probe_options("s1", vec![10.0, 20.0, 15.0]));
    chart.add::<ProbeLayer>(probe_options("s2", vec![30.0, 40.0, 50.0]));
    chart.settle();
    reset_logs();

    // Plot is 400x200 with margins 20 and a 40-unit left tick inset; zone 1
    // covers roughly x in [178, 286] at any plot height.
    chart.pointer_moved(Point::new(200.0, 100.0));
    assert_eq!(zone_log(), vec![(1, "over", 1)]);

    chart.pointer_moved(Point::new(100.0, 100.0));
    assert_eq!(
        zone_log(),
        vec![(1, "over", 1), (1, "out", 1), (0, "over", 0)]
    );

    chart.pointer_left();
    assert_eq!(
        zone_log(),
        vec![
            (1, "over", 1),
            (1, "out", 1),
            (0, "over", 0),
            (0, "out", 0),
        ]
    );
}

#[test]
fn empty_chart_settles_to_the_default_domain() {
    let viewport = SharedViewport::new(440.0, 240.0);
    let chart = bands_chart(&viewport);
    chart.settle();

    let y = chart
        .axes()
        .axis("y")
        .and_then(|a| a.linear_scale())
        .expect("y axis");
    assert_eq!(y.domain(), (0.0, 1.0));
}

#[test]
fn resize_reflows_every_layer_without_reinstantiating() {
    reset_logs();
    let viewport = SharedViewport::new(440.0, 240.0);
    let chart = bands_chart(&viewport);
    let layer = chart.add::<ProbeLayer>(probe_options("s1", vec![10.0, 20.0, 15.0]));
    chart.settle();
    reset_logs();

    viewport.set_size(640.0, 340.0);
    chart.viewport_resized();
    chart.settle();

    assert_eq!(chart.canvas().dimensions().width, 600.0);
    let log = render_log();
    assert_eq!(log.len(), 1);
    assert_eq!((log[0].0, log[0].1), (0, false));

    let kept = chart.canvas().layers();
    assert_eq!(kept.len(), 1);
    assert!(std::ptr::eq(
        Rc::as_ptr(&kept[0]).cast::<u8>(),
        Rc::as_ptr(&layer).cast::<u8>(),
    ));
}

#[test]
fn stacked_real_layers_share_one_canvas_and_survive_resize() {
    let viewport = SharedViewport::new(440.0, 240.0);
    let chart = bands_chart(&viewport);
    chart.add::<BarLayer>(LayerOptions::new(
        LayerKind::Bar,
        LayerData::Many(vec![
            Series::new("2024", vec![120.0, 90.0, 160.0]),
            Series::new("2025", vec![140.0, 110.0, 150.0]),
        ]),
    ));
    chart.add::<BenchmarkLayer>(LayerOptions::new(
        LayerKind::Benchmark,
        LayerData::One(Series::new("target", vec![150.0, 150.0, 150.0])),
    ));
    chart.settle();

    assert_eq!(chart.canvas().layer_count(), 2);
    let svg = chart.to_svg_string();
    assert!(svg.contains("plinth-canvas"));
    assert!(svg.contains("plinth-axis-y"));
    assert!(svg.contains("plinth-layer-0"));
    assert!(svg.contains("plinth-layer-1"));

    viewport.set_size(800.0, 400.0);
    chart.viewport_resized();
    chart.settle();
    assert_eq!(chart.canvas().layer_count(), 2);
    assert_eq!(chart.canvas().zone_count(), 3);
}
