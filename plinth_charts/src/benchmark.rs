// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Benchmark markers.
//!
//! A thin horizontal bar per category at the value's height, spanning the
//! category band. Hovering a category's zone turns its marker green.

use kurbo::Rect;
use peniko::{Brush, Color};
use plinth_core::{Mark, MarkId, MarkPayload, Transition};

use crate::axes::AxesManager;
use crate::canvas::Canvas;
use crate::config::{class, ColorScale};
use crate::data::Series;
use crate::layer::{layer_class, ChartLayer, LayerParams, RenderOptions};

const MARKER_HEIGHT: f64 = 5.0;
const MARKER_RAISE: f64 = 2.0;
const ENTRANCE_MS: f64 = 300.0;
const HOVER_COLOR: Color = Color::from_rgb8(0x2c, 0xa0, 0x2c);

/// A benchmark-marker chart layer.
#[derive(Debug)]
pub struct BenchmarkLayer {
    data: Vec<Series>,
    canvas: Canvas,
    axes: AxesManager,
    colors: ColorScale,
    index: usize,
    category_marks: Vec<Vec<MarkId>>,
}

impl BenchmarkLayer {
    fn set_category_fill(&self, zone: usize, fill: Option<Color>) {
        let Some(ids) = self.category_marks.get(zone) else {
            return;
        };
        let base: Vec<Brush> = self
            .data
            .iter()
            .map(|series| Brush::from(self.colors.color(series.index)))
            .collect();
        self.canvas.with_surface(|s| {
            for (j, id) in ids.iter().enumerate() {
                let Some(mark) = s.mark_mut(*id) else {
                    continue;
                };
                if let MarkPayload::Rect(rect) = &mut mark.payload {
                    rect.fill = match fill {
                        Some(color) => Brush::from(color),
                        None => base[j].clone(),
                    };
                }
            }
        });
    }
}

impl ChartLayer for BenchmarkLayer {
    fn new(params: LayerParams) -> Self {
        Self {
            data: params.data,
            canvas: params.canvas,
            axes: params.axes,
            colors: params.colors,
            index: params.index,
            category_marks: Vec::new(),
        }
    }

    fn render(&mut self, options: &RenderOptions) {
        let Some(x) = self.axes.axis("x").and_then(|a| a.ordinal_scale()) else {
            return;
        };
        let Some(y) = self.axes.axis("y").and_then(|a| a.linear_scale()) else {
            return;
        };
        let Some(area) = self.canvas.charts_area() else {
            return;
        };

        let band = x.band_width();
        let mut category_marks = vec![Vec::new(); x.len()];
        let mut marks = Vec::new();
        for (i, records) in category_marks.iter_mut().enumerate() {
            let x0 = x.position(i);
            for (j, series) in self.data.iter().enumerate() {
                let Some(v) = series.values.get(i) else {
                    continue;
                };
                let top = y.map(*v) - MARKER_RAISE;
                let rect = Rect::new(x0, top, x0 + band, top + MARKER_HEIGHT);
                let id = MarkId::for_slot(
                    self.index as u32,
                    (i * self.data.len() + j) as u32,
                );
                let mut mark = Mark::rect(id, rect, self.colors.color(series.index));
                if options.animation {
                    mark = mark.with_transition(Transition::new(ENTRANCE_MS));
                }
                marks.push(mark);
                records.push(id);
            }
        }

        let own = layer_class(self.index);
        let group_class = format!("{} {own} {}-benchmarks", class::LAYER, class::LAYER);
        self.canvas.with_surface(|s| {
            s.remove_class(&own);
            let group = s.group_under(area, &group_class);
            s.set_marks(group, marks);
        });
        self.category_marks = category_marks;
    }

    fn on_zone_mouseover(&mut self, zone: usize) {
        self.set_category_fill(zone, Some(HOVER_COLOR));
    }

    fn on_zone_mouseout(&mut self, zone: usize) {
        self.set_category_fill(zone, None);
    }
}

#[cfg(test)]
mod tests {
    use plinth_core::SharedViewport;

    use super::*;
    use crate::canvas_types::OrdinalBands;
    use crate::chart::{Chart, ChartOptions};
    use crate::data::{LayerData, SeriesKind};
    use crate::event::LayerKind;
    use crate::layer::LayerOptions;

    fn chart_with_layer() -> (Chart, std::rc::Rc<std::cell::RefCell<BenchmarkLayer>>) {
        let chart = Chart::new(
            OrdinalBands::new(),
            ChartOptions::new()
                .with_viewport(SharedViewport::new(440.0, 240.0))
                .with_categories(["Jan", "Feb"]),
        )
        .expect("viewport provided");
        let layer = chart.add::<BenchmarkLayer>(LayerOptions::new(
            LayerKind::Benchmark,
            LayerData::One(
                Series::new("target", vec![60.0, 70.0]).with_kind(SeriesKind::Benchmark),
            ),
        ));
        chart.settle();
        (chart, layer)
    }

    #[test]
    fn markers_are_fixed_height_band_spans() {
        let (chart, layer) = chart_with_layer();
        let id = layer.borrow().category_marks[0][0];
        chart.canvas().with_surface(|s| {
            let mark = s.mark_mut(id).expect("marker");
            let bounds = mark.payload.bounds().expect("rect bounds");
            assert_eq!(bounds.height(), MARKER_HEIGHT);
        });
    }

    #[test]
    fn hover_recolors_and_restores_the_marker() {
        let (chart, layer) = chart_with_layer();
        let original = chart.color(0);
        let id = layer.borrow().category_marks[1][0];

        layer.borrow_mut().on_zone_mouseover(1);
        chart.canvas().with_surface(|s| {
            let mark = s.mark_mut(id).expect("marker");
            if let MarkPayload::Rect(rect) = &mark.payload {
                assert_eq!(rect.fill, Brush::from(HOVER_COLOR));
            } else {
                panic!("marker is not a rect");
            }
        });

        layer.borrow_mut().on_zone_mouseout(1);
        chart.canvas().with_surface(|s| {
            let mark = s.mark_mut(id).expect("marker");
            if let MarkPayload::Rect(rect) = &mark.payload {
                assert_eq!(rect.fill, Brush::from(original));
            } else {
                panic!("marker is not a rect");
            }
        });
    }
}
