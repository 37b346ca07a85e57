// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Grouped vertical bars.
//!
//! One outer band per category, one inner band per series within it. Bars
//! reach from the value down to the plot bottom; the hovered category keeps
//! full opacity while the rest are dimmed.

use kurbo::Rect;
use plinth_core::{Mark, MarkId, Transition};

use crate::axes::AxesManager;
use crate::canvas::Canvas;
use crate::config::{class, ColorScale};
use crate::data::Series;
use crate::layer::{layer_class, ChartLayer, LayerParams, RenderOptions};
use crate::scale::OrdinalScale;

const ENTRANCE_MS: f64 = 400.0;
const STAGGER_MS: f64 = 40.0;
const DIMMED_OPACITY: f64 = 0.5;

/// A grouped-bar chart layer.
#[derive(Debug)]
pub struct BarLayer {
    data: Vec<Series>,
    canvas: Canvas,
    axes: AxesManager,
    colors: ColorScale,
    index: usize,
    /// Mark ids per category, for hover retargeting.
    category_marks: Vec<Vec<MarkId>>,
}

impl ChartLayer for BarLayer {
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

        let plot_bottom = y.range().0;
        let names: Vec<String> = self.data.iter().map(|s| s.name.clone()).collect();
        let inner = OrdinalScale::new(names, (0.0, x.band_width()), 0.0);

        let mut category_marks = vec![Vec::new(); x.len()];
        let mut marks = Vec::new();
        for (i, records) in category_marks.iter_mut().enumerate() {
            let x0 = x.position(i);
            for (j, series) in self.data.iter().enumerate() {
                let Some(v) = series.values.get(i) else {
                    continue;
                };
                let top = y.map(*v);
                let left = x0 + inner.position(j);
                let rect = Rect::new(
                    left,
                    top.min(plot_bottom),
                    left + inner.band_width(),
                    top.max(plot_bottom),
                );
                let id = MarkId::for_slot(
                    self.index as u32,
                    (i * self.data.len() + j) as u32,
                );
                let mut mark = Mark::rect(id, rect, self.colors.color(series.index));
                if options.animation {
                    mark = mark.with_transition(
                        Transition::new(ENTRANCE_MS).with_delay(STAGGER_MS * i as f64),
                    );
                }
                marks.push(mark);
                records.push(id);
            }
        }

        let own = layer_class(self.index);
        let group_class = format!("{} {own} {}-bars", class::LAYER, class::LAYER);
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
    use plinth_core::SharedViewport;

    use super::*;
    use crate::canvas_types::OrdinalBands;
    use crate::chart::{Chart, ChartOptions};
    use crate::data::LayerData;
    use crate::layer::LayerOptions;
    use crate::event::LayerKind;

    fn chart() -> Chart {
        Chart::new(
            OrdinalBands::new(),
            ChartOptions::new()
                .with_viewport(SharedViewport::new(440.0, 240.0))
                .with_categories(["Jan", "Feb", "Mar"]),
        )
        .expect("viewport provided")
    }

    #[test]
    fn renders_one_bar_per_series_per_category() {
        let chart = chart();
        let layer = chart.add::<BarLayer>(LayerOptions::new(
            LayerKind::Bar,
            LayerData::Many(vec![
                Series::new("a", vec![10.0, 20.0, 30.0]),
                Series::new("b", vec![5.0, 15.0, 25.0]),
            ]),
        ));
        chart.settle();

        assert_eq!(layer.borrow().category_marks.len(), 3);
        assert!(layer.borrow().category_marks.iter().all(|c| c.len() == 2));
        let own = layer_class(0);
        assert!(chart.canvas().with_surface(|s| s.find(&own).is_some()));
    }

    #[test]
    fn rerender_does_not_duplicate_groups() {
        let chart = chart();
        chart.add::<BarLayer>(LayerOptions::new(
            LayerKind::Bar,
            LayerData::One(Series::new("a", vec![10.0, 20.0, 30.0])),
        ));
        chart.settle();
        chart.canvas().redraw();

        let own = layer_class(0);
        let groups = chart
            .canvas()
            .with_surface(|s| s.groups_with_class(&own).len());
        assert_eq!(groups, 1);
    }

    #[test]
    fn hover_dims_the_other_categories() {
        let chart = chart();
        let layer = chart.add::<BarLayer>(LayerOptions::new(
            LayerKind::Bar,
            LayerData::One(Series::new("a", vec![10.0, 20.0, 30.0])),
        ));
        chart.settle();

        layer.borrow_mut().on_zone_mouseover(1);
        let (hovered, other) = {
            let layer = layer.borrow();
            let hovered = layer.category_marks[1][0];
            let other = layer.category_marks[0][0];
            (hovered, other)
        };
        chart.canvas().with_surface(|s| {
            assert_eq!(s.mark_mut(hovered).expect("mark").opacity, 1.0);
            assert_eq!(s.mark_mut(other).expect("mark").opacity, DIMMED_OPACITY);
        });

        layer.borrow_mut().on_zone_mouseout(1);
        chart.canvas().with_surface(|s| {
            assert_eq!(s.mark_mut(other).expect("mark").opacity, 1.0);
        });
    }

    #[test]
    fn reflow_renders_carry_no_transition() {
        let chart = chart();
        chart.add::<BarLayer>(LayerOptions::new(
            LayerKind::Bar,
            LayerData::One(Series::new("a", vec![10.0])),
        ));
        chart.settle();
        chart.canvas().redraw();

        let own = layer_class(0);
        chart.canvas().with_surface(|s| {
            let group = s.find(&own).expect("layer group");
            assert!(s.marks(group).iter().all(|m| m.transition.is_none()));
        });
    }
}
