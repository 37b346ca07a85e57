// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Horizontal bars.
//!
//! Runs on the [`crate::canvas_types::LinearSpans`] configuration: one bar
//! per category growing left or right from the zero line. Negative values
//! get a distinct fill.

use kurbo::Rect;
use peniko::Color;
use plinth_core::{Mark, MarkId, Transition};

use crate::axes::AxesManager;
use crate::canvas::Canvas;
use crate::config::{class, ColorScale};
use crate::data::Series;
use crate::layer::{layer_class, ChartLayer, LayerParams, RenderOptions};
use crate::scale::OrdinalScale;

const BAR_PADDING: f64 = 6.0;
const ENTRANCE_MS: f64 = 400.0;
const NEGATIVE_COLOR: Color = Color::from_rgb8(0xd6, 0x27, 0x28);

/// A horizontal-bar chart layer.
#[derive(Debug)]
pub struct HorizontalBarLayer {
    data: Vec<Series>,
    canvas: Canvas,
    axes: AxesManager,
    colors: ColorScale,
    index: usize,
}

impl ChartLayer for HorizontalBarLayer {
    fn new(params: LayerParams) -> Self {
        Self {
            data: params.data,
            canvas: params.canvas,
            axes: params.axes,
            colors: params.colors,
            index: params.index,
        }
    }

    fn render(&mut self, options: &RenderOptions) {
        let Some(x) = self.axes.axis("x").and_then(|a| a.linear_scale()) else {
            return;
        };
        let Some(y) = self.axes.axis("y").and_then(|a| a.ordinal_scale()) else {
            return;
        };
        let Some(area) = self.canvas.charts_area() else {
            return;
        };

        let zero = x.map(0.0);
        let names: Vec<String> = self.data.iter().map(|s| s.name.clone()).collect();
        let inner = OrdinalScale::new(names, (0.0, y.band_width()), 0.0);

        let mut marks = Vec::new();
        for i in 0..y.len() {
            let y0 = y.position(i);
            for (j, series) in self.data.iter().enumerate() {
                let Some(v) = series.values.get(i) else {
                    continue;
                };
                let end = x.map(*v);
                let top = y0 + inner.position(j) + BAR_PADDING / 2.0;
                let bottom = top + (inner.band_width() - BAR_PADDING).max(0.0);
                let rect = Rect::new(zero.min(end), top, zero.max(end), bottom);
                let fill = if *v < 0.0 {
                    NEGATIVE_COLOR
                } else {
                    self.colors.color(series.index)
                };
                let id = MarkId::for_slot(
                    self.index as u32,
                    (i * self.data.len() + j) as u32,
                );
                let mut mark = Mark::rect(id, rect, fill);
                if options.animation {
                    mark = mark.with_transition(Transition::new(ENTRANCE_MS));
                }
                marks.push(mark);
            }
        }

        let own = layer_class(self.index);
        let group_class = format!("{} {own} {}-horizontal", class::LAYER, class::LAYER);
        self.canvas.with_surface(|s| {
            s.remove_class(&own);
            let group = s.group_under(area, &group_class);
            s.set_marks(group, marks);
        });
    }

    // This configuration builds no interaction zones; the hooks are part of
    // the contract but never fire.
    fn on_zone_mouseover(&mut self, _zone: usize) {}

    fn on_zone_mouseout(&mut self, _zone: usize) {}
}

#[cfg(test)]
mod tests {
    use plinth_core::{MarkPayload, SharedViewport};

    use super::*;
    use crate::canvas_types::LinearSpans;
    use crate::chart::{Chart, ChartOptions};
    use crate::data::LayerData;
    use crate::event::LayerKind;
    use crate::layer::LayerOptions;

    fn chart() -> Chart {
        Chart::new(
            LinearSpans::new(),
            ChartOptions::new()
                .with_viewport(SharedViewport::new(440.0, 240.0))
                .with_categories(["north", "south"]),
        )
        .expect("viewport provided")
    }

    #[test]
    fn bars_grow_from_the_zero_line() {
        let chart = chart();
        chart.add::<HorizontalBarLayer>(LayerOptions::new(
            LayerKind::Horizontal,
            LayerData::One(Series::new("delta", vec![8.0, -4.0])),
        ));
        chart.settle();

        let x = chart
            .axes()
            .axis("x")
            .and_then(|a| a.linear_scale())
            .expect("x");
        let zero = x.map(0.0);

        let own = layer_class(0);
        chart.canvas().with_surface(|s| {
            let group = s.find(&own).expect("layer group");
            let marks = s.marks(group);
            assert_eq!(marks.len(), 2);
            let positive = marks[0].payload.bounds().expect("bounds");
            let negative = marks[1].payload.bounds().expect("bounds");
            assert_eq!(positive.x0, zero);
            assert!(positive.x1 > zero);
            assert_eq!(negative.x1, zero);
            assert!(negative.x0 < zero);
        });
    }

    #[test]
    fn negative_values_get_the_negative_fill() {
        let chart = chart();
        chart.add::<HorizontalBarLayer>(LayerOptions::new(
            LayerKind::Horizontal,
            LayerData::One(Series::new("delta", vec![8.0, -4.0])),
        ));
        chart.settle();

        let own = layer_class(0);
        chart.canvas().with_surface(|s| {
            let group = s.find(&own).expect("layer group");
            let marks = s.marks(group);
            let MarkPayload::Rect(negative) = &marks[1].payload else {
                panic!("bar is not a rect");
            };
            assert_eq!(negative.fill, NEGATIVE_COLOR.into());
        });
    }

    #[test]
    fn bars_keep_the_vertical_padding() {
        let chart = chart();
        chart.add::<HorizontalBarLayer>(LayerOptions::new(
            LayerKind::Horizontal,
            LayerData::One(Series::new("delta", vec![8.0, 4.0])),
        ));
        chart.settle();

        let y = chart
            .axes()
            .axis("y")
            .and_then(|a| a.ordinal_scale())
            .expect("y");
        let own = layer_class(0);
        chart.canvas().with_surface(|s| {
            let group = s.find(&own).expect("layer group");
            let bounds = s.marks(group)[0].payload.bounds().expect("bounds");
            assert_eq!(bounds.height(), y.band_width() - BAR_PADDING);
            assert_eq!(bounds.y0, y.position(0) + BAR_PADDING / 2.0);
        });
    }
}
