// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Error taxonomy.
//!
//! Only configuration problems surface as errors. Degraded-output conditions
//! (empty data, exhausted palette, zero configured axes) are handled locally
//! with documented defaults and never reach this type.

use thiserror::Error;

/// Errors surfaced when building a chart.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// The options carry no viewport, so the canvas cannot be measured.
    #[error("chart options carry no viewport to measure")]
    MissingViewport,
}
