// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Drawing substrate for the `plinth` charting layer.
//!
//! This crate is the "platform" half of plinth:
//! - **Marks** are plain drawable values (rects, paths, text).
//! - The **Surface** is a retained tree of classed groups holding marks,
//!   playing the role an SVG node tree plays in a browser.
//! - **Viewport** abstracts container measurement, the only input the
//!   charting layer takes from the outside world besides data.
//!
//! Chart semantics (scales, axes, layers, events) live in `plinth_charts`;
//! this crate knows nothing about data or domains.

mod mark;
mod surface;
mod svg;
mod transition;
mod viewport;

pub use mark::{Mark, MarkId, MarkPayload, PathMark, RectMark, TextAnchor, TextBaseline, TextMark};
pub use surface::{GroupId, Surface};
pub use transition::{Transition, ValueTransition};
pub use viewport::{Insets, SharedViewport, Size, Viewport};
