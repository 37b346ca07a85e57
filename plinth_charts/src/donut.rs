// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Donut sectors.
//!
//! Runs on the [`crate::canvas_types::FreeCanvas`] configuration. Sectors
//! start at twelve o'clock and proceed clockwise, sized by each value's
//! share of the series total, with the series name as a center label.

use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Circle, Point, Shape};
use plinth_core::{Mark, MarkId, TextAnchor, TextBaseline, Transition};

use crate::canvas::Canvas;
use crate::config::{class, ColorScale};
use crate::data::Series;
use crate::layer::{layer_class, ChartLayer, LayerParams, RenderOptions};

const ENTRANCE_MS: f64 = 500.0;
const LABEL_FONT_SIZE: f64 = 16.0;
const LABEL_SLOT: u32 = 500;
const DIMMED_OPACITY: f64 = 0.6;
const PATH_TOLERANCE: f64 = 0.1;

/// A donut chart layer.
#[derive(Debug)]
pub struct DonutLayer {
    data: Vec<Series>,
    canvas: Canvas,
    colors: ColorScale,
    index: usize,
    value_series: Option<String>,
    ring_width: f64,
    sector_marks: Vec<MarkId>,
}

impl DonutLayer {
    fn value_series(&self) -> Option<&Series> {
        match &self.value_series {
            Some(name) => self.data.iter().find(|s| &s.name == name),
            None => self.data.first(),
        }
    }
}

impl ChartLayer for DonutLayer {
    fn new(params: LayerParams) -> Self {
        Self {
            data: params.data,
            canvas: params.canvas,
            colors: params.colors,
            index: params.index,
            value_series: params.options.value_series.clone(),
            ring_width: params.options.inner_radius,
            sector_marks: Vec::new(),
        }
    }

    fn render(&mut self, options: &RenderOptions) {
        let Some(area) = self.canvas.charts_area() else {
            return;
        };
        let Some(series) = self.value_series().cloned() else {
            return;
        };

        let dims = self.canvas.dimensions();
        let center = Point::new(dims.width / 2.0, dims.height / 2.0);
        let outer = dims.width.min(dims.height) / 2.0;
        let inner = (outer - self.ring_width).max(0.0);
        let total: f64 = series.values.iter().map(|v| v.abs()).sum();

        let mut sector_marks = Vec::new();
        let mut marks = Vec::new();
        if total > 0.0 {
            let mut start = -FRAC_PI_2;
            for (i, v) in series.values.iter().enumerate() {
                let sweep = v.abs() / total * TAU;
                let sector = Circle::new(center, outer).segment(inner, start, sweep);
                start += sweep;
                let id = MarkId::for_slot(self.index as u32, i as u32);
                let mut mark = Mark::path(
                    id,
                    sector.to_path(PATH_TOLERANCE),
                    self.colors.color(i),
                );
                if options.animation {
                    mark = mark.with_transition(Transition::new(ENTRANCE_MS));
                }
                marks.push(mark);
                sector_marks.push(id);
            }
        }
        marks.push(
            Mark::text(
                MarkId::for_slot(self.index as u32, LABEL_SLOT),
                center,
                series.name.clone(),
                LABEL_FONT_SIZE,
            )
            .with_anchor(TextAnchor::Middle, TextBaseline::Middle),
        );

        let own = layer_class(self.index);
        let group_class = format!("{} {own} {}-donut", class::LAYER, class::LAYER);
        self.canvas.with_surface(|s| {
            s.remove_class(&own);
            let group = s.group_under(area, &group_class);
            s.set_marks(group, marks);
        });
        self.sector_marks = sector_marks;
    }

    fn on_zone_mouseover(&mut self, zone: usize) {
        let sector_marks = &self.sector_marks;
        self.canvas.with_surface(|s| {
            for (i, id) in sector_marks.iter().enumerate() {
                if let Some(mark) = s.mark_mut(*id) {
                    mark.opacity = if i == zone { 1.0 } else { DIMMED_OPACITY };
                }
            }
        });
    }

    fn on_zone_mouseout(&mut self, _zone: usize) {
        let sector_marks = &self.sector_marks;
        self.canvas.with_surface(|s| {
            for id in sector_marks {
                if let Some(mark) = s.mark_mut(*id) {
                    mark.opacity = 1.0;
                }
            }
        });
    }
}
