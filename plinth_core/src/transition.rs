// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Entrance transitions.
//!
//! Marks can carry a [`Transition`] describing how they should animate in.
//! The surface itself does not animate; a renderer that wants motion drives
//! a [`ValueTransition`] per animated property and redraws as it steps.

/// Describes how a mark animates when it first appears.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Delay before the transition starts, in milliseconds.
    pub delay: f64,
    /// Duration of the transition, in milliseconds.
    pub duration: f64,
}

impl Transition {
    /// Creates a transition that starts immediately.
    pub const fn new(duration: f64) -> Self {
        Self {
            delay: 0.0,
            duration,
        }
    }

    /// Sets the start delay.
    pub const fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// A linear interpolation between two values over a fixed duration.
///
/// Drive it with [`ValueTransition::step`] once per frame; the value clamps
/// at the end state once the duration has elapsed.
#[derive(Clone, Copy, Debug)]
pub struct ValueTransition {
    start: f64,
    end: f64,
    duration: f64,
    elapsed: f64,
}

impl ValueTransition {
    /// Creates a transition from `start` to `end` over `duration`
    /// milliseconds.
    pub fn new(start: f64, end: f64, duration: f64) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advances the transition by `dt` milliseconds.
    pub fn step(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// The current interpolated value.
    pub fn value(&self) -> f64 {
        if self.duration <= 0.0 {
            return self.end;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.start + (self.end - self.start) * t
    }

    /// Whether the transition has reached its end state.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
