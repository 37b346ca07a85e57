// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Value-domain and tick-value helpers.
//!
//! These free functions compute the overall `[min, max]` range a linear
//! scale must cover to fit a set of series, plus the tick positions drawn
//! along it.

use crate::data::Series;

/// Flattens every value of every series into one list.
pub fn all_values(data: &[Series]) -> Vec<f64> {
    data.iter().flat_map(|s| s.values.iter().copied()).collect()
}

/// Whether any value is negative.
pub fn has_negative(values: &[f64]) -> bool {
    values.iter().any(|v| *v < 0.0)
}

/// Computes the `[min, max]` domain covering `values`.
///
/// The maximum is rounded up to the next multiple of `round_to`; the
/// minimum is the negated maximum when negatives are present, else zero.
/// An empty list yields the default domain `(0, 1)` rather than NaN.
pub fn value_domain(values: &[f64], round_to: f64) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max = (max / round_to).ceil() * round_to;
    let min = if has_negative(values) { -max } else { 0.0 };
    (min, max)
}

/// Returns `count + 1` evenly spaced tick values covering `domain`,
/// inclusive of both ends.
pub fn tick_values(domain: (f64, f64), count: usize) -> Vec<f64> {
    let (d0, d1) = domain;
    let min = d0.min(d1);
    let max = d0.max(d1);
    let distance = max - min;
    if distance == 0.0 || count == 0 {
        return vec![min];
    }
    let step = distance / count as f64;
    let mut out = Vec::with_capacity(count + 1);
    let mut v = min;
    while v < max {
        out.push(v);
        v += step;
    }
    out.push(v);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_yield_default_domain() {
        assert_eq!(value_domain(&[], 100.0), (0.0, 1.0));
    }

    #[test]
    fn max_rounds_up_to_the_requested_multiple() {
        assert_eq!(value_domain(&[10.0, 20.0, 33.0], 100.0), (0.0, 100.0));
        assert_eq!(value_domain(&[10.0, 20.0, 33.0], 10.0), (0.0, 40.0));
        assert_eq!(value_domain(&[250.0], 100.0), (0.0, 300.0));
    }

    #[test]
    fn negatives_make_the_domain_symmetric() {
        assert_eq!(value_domain(&[-5.0, 80.0], 100.0), (-100.0, 100.0));
    }

    #[test]
    fn ticks_cover_both_ends_with_default_steps() {
        let ticks = tick_values((0.0, 100.0), 4);
        assert_eq!(ticks, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn degenerate_domain_yields_single_tick() {
        assert_eq!(tick_values((5.0, 5.0), 4), vec![5.0]);
    }

    #[test]
    fn all_values_flattens_every_series() {
        let data = vec![
            Series::new("a", vec![1.0, 2.0]),
            Series::new("b", vec![3.0]),
        ];
        assert_eq!(all_values(&data), vec![1.0, 2.0, 3.0]);
    }
}
