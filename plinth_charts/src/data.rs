// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! The tabular data model and the raw-data accumulator.

use std::cell::RefCell;
use std::rc::Rc;

/// What a series represents visually; carried with the data so compound
/// datasets can route each series to the right layer kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeriesKind {
    /// A grouped-bar series.
    #[default]
    Bar,
    /// A benchmark-marker series.
    Benchmark,
    /// A dots series.
    Dots,
}

/// One named value series.
///
/// Index `k` of `values` corresponds to the chart's category `k`; every
/// series on a chart has the same length as the category list.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Series name.
    pub name: String,
    /// One value per category.
    pub values: Vec<f64>,
    /// Visual kind of the series.
    pub kind: SeriesKind,
    /// Position in the raw-data accumulator. Assigned at insertion; zero
    /// until the series is added to a chart.
    pub index: usize,
}

impl Series {
    /// Creates a bar series.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            kind: SeriesKind::default(),
            index: 0,
        }
    }

    /// Sets the series kind.
    pub fn with_kind(mut self, kind: SeriesKind) -> Self {
        self.kind = kind;
        self
    }
}

/// The data rendered by one chart layer: a single series or a group.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerData {
    /// One series (dots, benchmark, horizontal bars, donut).
    One(Series),
    /// Several series drawn as one logical group (grouped bars).
    Many(Vec<Series>),
}

impl LayerData {
    /// The contained series as a slice-like vector, in order.
    pub fn series(&self) -> Vec<Series> {
        match self {
            Self::One(s) => vec![s.clone()],
            Self::Many(list) => list.clone(),
        }
    }
}

/// The per-chart raw-data accumulator.
///
/// Every series added to the chart lands here with a monotonically
/// increasing index; the accumulator only grows. Domain recomputes read the
/// whole accumulator, never a per-add delta, so back-to-back adds settle to
/// the union domain. The handle is shared: deferred recompute tasks read the
/// accumulator at run time, not at the time they were scheduled.
#[derive(Clone, Debug, Default)]
pub struct RawData {
    series: Rc<RefCell<Vec<Series>>>,
}

impl RawData {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every series of `data`, assigning each the next sequential
    /// index. Returns the indexed series for the caller to hand to the
    /// layer.
    pub fn merge(&self, data: &LayerData) -> Vec<Series> {
        let mut all = self.series.borrow_mut();
        let mut merged = data.series();
        for series in &mut merged {
            series.index = all.len();
            all.push(series.clone());
        }
        merged
    }

    /// A point-in-time copy of the full accumulator.
    pub fn snapshot(&self) -> Vec<Series> {
        self.series.borrow().clone()
    }

    /// Number of series accumulated so far.
    pub fn len(&self) -> usize {
        self.series.borrow().len()
    }

    /// Whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.series.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_assigns_sequential_indices_across_adds() {
        let raw = RawData::new();
        let first = raw.merge(&LayerData::Many(vec![
            Series::new("a", vec![1.0]),
            Series::new("b", vec![2.0]),
        ]));
        let second = raw.merge(&LayerData::One(Series::new("c", vec![3.0])));

        assert_eq!(first[0].index, 0);
        assert_eq!(first[1].index, 1);
        assert_eq!(second[0].index, 2);
        assert_eq!(raw.len(), 3);
    }
}
