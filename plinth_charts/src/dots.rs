// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Dot markers.
//!
//! One circle per value, centered on its category band. The radius scales
//! with the screen position of the value, so dots near the plot bottom read
//! larger than dots near the top.

use kurbo::{Circle, Point, Shape};
use plinth_core::{Mark, MarkId, Transition};

use crate::axes::AxesManager;
use crate::canvas::Canvas;
use crate::config::{class, ColorScale};
use crate::data::Series;
use crate::layer::{layer_class, ChartLayer, LayerParams, RenderOptions};

const RADIUS_FACTOR: f64 = 0.3;
const ENTRANCE_MS: f64 = 300.0;
const DIMMED_OPACITY: f64 = 0.4;
const PATH_TOLERANCE: f64 = 0.1;

/// A dot-marker chart layer.
#[derive(Debug)]
pub struct DotsLayer {
    data: Vec<Series>,
    canvas: Canvas,
    axes: AxesManager,
    colors: ColorScale,
    index: usize,
    category_marks: Vec<Vec<MarkId>>,
}

impl ChartLayer for DotsLayer {
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
            let cx = x.position(i) + band / 2.0;
            for (j, series) in self.data.iter().enumerate() {
                let Some(v) = series.values.get(i) else {
                    continue;
                };
                let cy = y.map(*v);
                let radius = (RADIUS_FACTOR * cy).max(0.0);
                let circle = Circle::new(Point::new(cx, cy), radius);
                let id = MarkId::for_slot(
                    self.index as u32,
                    (i * self.data.len() + j) as u32,
                );
                let mut mark = Mark::path(
                    id,
                    circle.to_path(PATH_TOLERANCE),
                    self.colors.color(series.index),
                );
                if options.animation {
                    mark = mark.with_transition(Transition::new(ENTRANCE_MS));
                }
                marks.push(mark);
                records.push(id);
            }
        }

        let own = layer_class(self.index);
        let group_class = format!("{} {own} {}-dots", class::LAYER, class::LAYER);
        self.canvas.with_surface(|s| {
            s.remove_class(&own);
            let group = s.group_under(area, &group_class);
            s.set_marks(group, marks);
        });
        self.category_marks = category_marks;
    }

    fn on_zone_mouseover(&mut self, zone: usize) {
        let category_marks = &self.category_marks;
        self.canvas.with_surface(|s| {
            for (i, ids) in category_marks.iter().enumerate() {
                let opacity = if i == zone { 1.0 } else { DIMMED_OPACITY };
                for id in ids {
                    if let Some(mark) = s.mark_mut(*id) {
                        mark.opacity = opacity;
                    }
                }
            }
        });
    }

    fn on_zone_mouseout(&mut self, _zone: usize) {
        let category_marks = &self.category_marks;
        self.canvas.with_surface(|s| {
            for id in category_marks.iter().flatten() {
                if let Some(mark) = s.mark_mut(*id) {
                    mark.opacity = 1.0;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use plinth_core::{MarkPayload, SharedViewport};

    use super::*;
    use crate::canvas_types::OrdinalBands;
    use crate::chart::{Chart, ChartOptions};
    use crate::data::{LayerData, SeriesKind};
    use crate::event::LayerKind;
    use crate::layer::LayerOptions;

    #[test]
    fn renders_one_circle_per_category() {
        let chart = Chart::new(
            OrdinalBands::new(),
            ChartOptions::new()
                .with_viewport(SharedViewport::new(440.0, 240.0))
                .with_categories(["Jan", "Feb"]),
        )
        .expect("viewport provided");
        chart.add::<DotsLayer>(LayerOptions::new(
            LayerKind::Dots,
            LayerData::One(Series::new("d", vec![10.0, 90.0]).with_kind(SeriesKind::Dots)),
        ));
        chart.settle();

        let own = layer_class(0);
        chart.canvas().with_surface(|s| {
            let group = s.find(&own).expect("layer group");
            let marks = s.marks(group);
            assert_eq!(marks.len(), 2);
            assert!(marks
                .iter()
                .all(|m| matches!(m.payload, MarkPayload::Path(_))));
        });
    }

    #[test]
    fn radius_tracks_the_screen_position() {
        let chart = Chart::new(
            OrdinalBands::new(),
            ChartOptions::new()
                .with_viewport(SharedViewport::new(440.0, 240.0))
                .with_categories(["Jan", "Feb"]),
        )
        .expect("viewport provided");
        chart.add::<DotsLayer>(LayerOptions::new(
            LayerKind::Dots,
            LayerData::One(Series::new("d", vec![10.0, 90.0])),
        ));
        chart.settle();

        // The lower value sits nearer the plot bottom, so its circle has
        // the larger bounding box.
        let own = layer_class(0);
        chart.canvas().with_surface(|s| {
            let group = s.find(&own).expect("layer group");
            let marks = s.marks(group);
            let low = marks[0].payload.bounds().expect("bounds");
            let high = marks[1].payload.bounds().expect("bounds");
            assert!(low.height() > high.height());
        });
    }
}
