// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Chart demos for `plinth_charts`.
//!
//! Everything runs headlessly: charts draw onto the retained surface and
//! the report embeds SVG snapshots of the result.

mod html;

use kurbo::Point;
use peniko::Color;
use plinth_charts::{
    BarLayer, BenchmarkLayer, Chart, ChartOptions, DonutLayer, DotsLayer, FreeCanvas,
    HorizontalBarLayer, LayerData, LayerKind, LayerOptions, LinearSpans, OrdinalBands, Series,
    SeriesKind,
};
use plinth_core::SharedViewport;

fn main() {
    let sections = vec![
        grouped_bars_demo(),
        hover_demo(),
        resize_demo(),
        horizontal_demo(),
        donut_demo(),
    ];

    let report = html::render_report("Plinth charts demo", &sections);
    std::fs::write("plinth_charts_demo.html", report).expect("write plinth_charts_demo.html");
    println!("wrote plinth_charts_demo.html");
}

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

fn sales_chart(viewport: &SharedViewport) -> Chart {
    let chart = Chart::new(
        OrdinalBands::new(),
        ChartOptions::new()
            .with_viewport(viewport.clone())
            .with_categories(MONTHS),
    )
    .expect("viewport provided");

    chart.add::<BarLayer>(LayerOptions::new(
        LayerKind::Bar,
        LayerData::Many(vec![
            Series::new("2024", vec![120.0, 90.0, 160.0, 140.0, 180.0, 150.0]),
            Series::new("2025", vec![140.0, 110.0, 150.0, 170.0, 160.0, 190.0]),
        ]),
    ));
    chart.add::<BenchmarkLayer>(LayerOptions::new(
        LayerKind::Benchmark,
        LayerData::One(
            Series::new("target", vec![150.0; 6]).with_kind(SeriesKind::Benchmark),
        ),
    ));
    chart.add::<DotsLayer>(LayerOptions::new(
        LayerKind::Dots,
        LayerData::One(
            Series::new("forecast", vec![130.0, 100.0, 155.0, 160.0, 170.0, 175.0])
                .with_kind(SeriesKind::Dots),
        ),
    ));
    chart.settle();
    chart
}

fn grouped_bars_demo() -> html::HtmlSection {
    let viewport = SharedViewport::new(640.0, 360.0);
    let chart = sales_chart(&viewport);

    html::HtmlSection {
        title: "Grouped bars + benchmark + dots",
        description: "Three layers stacked on one canvas: grouped bars per month, a benchmark \
                      marker line, and forecast dots. All three read the same shared y scale, so \
                      the domain covers the union of every series.",
        svg: chart.to_svg_string(),
    }
}

fn hover_demo() -> html::HtmlSection {
    let viewport = SharedViewport::new(640.0, 360.0);
    let chart = sales_chart(&viewport);

    // Park the pointer over the third month's zone and snapshot the
    // highlighted state.
    chart.pointer_moved(Point::new(300.0, 180.0));

    html::HtmlSection {
        title: "Hover state",
        description: "The pointer sits over one category's interaction zone; the targeted layer \
                      dims its other categories in response.",
        svg: chart.to_svg_string(),
    }
}

fn resize_demo() -> html::HtmlSection {
    let viewport = SharedViewport::new(640.0, 360.0);
    let chart = sales_chart(&viewport);

    viewport.set_size(420.0, 260.0);
    chart.viewport_resized();
    chart.settle();

    html::HtmlSection {
        title: "After resize",
        description: "The same chart after the container shrank: scales re-range, axes and grid \
                      re-render, and every layer reflows without entrance animation.",
        svg: chart.to_svg_string(),
    }
}

fn horizontal_demo() -> html::HtmlSection {
    let viewport = SharedViewport::new(640.0, 300.0);
    let chart = Chart::new(
        LinearSpans::new(),
        ChartOptions::new()
            .with_viewport(viewport)
            .with_categories(["north", "south", "east", "west"]),
    )
    .expect("viewport provided");

    chart.add::<HorizontalBarLayer>(LayerOptions::new(
        LayerKind::Horizontal,
        LayerData::One(Series::new("change", vec![34.0, -12.0, 8.0, 21.0])),
    ));
    chart.settle();

    html::HtmlSection {
        title: "Horizontal bars",
        description: "Values on a linear x scale growing left or right from the zero line; \
                      negative values get a distinct fill.",
        svg: chart.to_svg_string(),
    }
}

fn donut_demo() -> html::HtmlSection {
    let viewport = SharedViewport::new(360.0, 360.0);
    let chart = Chart::new(
        FreeCanvas::new(),
        ChartOptions::new().with_viewport(viewport).with_palette(vec![
            Color::from_rgb8(0x1f, 0x77, 0xb4),
            Color::from_rgb8(0xff, 0x7f, 0x0e),
            Color::from_rgb8(0x2c, 0xa0, 0x2c),
            Color::from_rgb8(0x94, 0x67, 0xbd),
        ]),
    )
    .expect("viewport provided");

    chart.add::<DonutLayer>(
        LayerOptions::new(
            LayerKind::Donut,
            LayerData::One(Series::new("channels", vec![44.0, 28.0, 18.0, 10.0])),
        )
        .with_inner_radius(60.0),
    );
    chart.settle();

    html::HtmlSection {
        title: "Donut",
        description: "Sectors sized by each value's share of the series total, starting at \
                      twelve o'clock and proceeding clockwise, with a center label.",
        svg: chart.to_svg_string(),
    }
}
