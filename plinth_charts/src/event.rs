// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! The per-chart event bus.
//!
//! One bus per chart instance, passed by reference to every collaborator;
//! nothing is global, so two charts on one page never cross-talk. Dispatch
//! is synchronous and in subscription order. Subscriptions can be scoped to
//! a [`LayerKey`]: zone signals carrying index `k` then reach only the
//! subscriber keyed with index `k`, which is how each chart layer hears only
//! its own interaction zone.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

/// The visual kind of a chart layer; part of a subscription's scope key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Grouped vertical bars.
    Bar,
    /// Benchmark markers.
    Benchmark,
    /// Dots.
    Dots,
    /// Horizontal bars.
    Horizontal,
    /// Donut sectors.
    Donut,
}

/// Structured scope for a layer's subscriptions: kind plus layer index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerKey {
    /// The layer's visual kind.
    pub kind: LayerKind,
    /// The layer's index on the canvas.
    pub index: usize,
}

/// The signal kinds a bus carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// A scale domain changed; axes should be redrawn.
    AxisUpdated,
    /// Axis groups are current; zone wiring and post-axis passes may run.
    AxisRendered,
    /// The pointer entered an interaction zone.
    ZoneMouseover,
    /// The pointer left an interaction zone.
    ZoneMouseout,
}

/// A dispatched signal with its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// A scale domain changed.
    AxisUpdated,
    /// Axis groups are current.
    AxisRendered,
    /// The pointer entered zone `0`-based index.
    ZoneMouseover(usize),
    /// The pointer left the zone.
    ZoneMouseout(usize),
}

impl Signal {
    /// The signal's kind.
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::AxisUpdated => SignalKind::AxisUpdated,
            Self::AxisRendered => SignalKind::AxisRendered,
            Self::ZoneMouseover(_) => SignalKind::ZoneMouseover,
            Self::ZoneMouseout(_) => SignalKind::ZoneMouseout,
        }
    }

    /// The zone index, for zone signals.
    pub fn zone_index(&self) -> Option<usize> {
        match self {
            Self::ZoneMouseover(i) | Self::ZoneMouseout(i) => Some(*i),
            _ => None,
        }
    }
}

#[derive(Clone)]
struct Subscription {
    kind: SignalKind,
    key: Option<LayerKey>,
    handler: Rc<dyn Fn(&Signal)>,
}

/// A clonable handle to one chart's event bus.
#[derive(Clone, Default)]
pub struct EventBus {
    subscriptions: Rc<RefCell<SmallVec<[Subscription; 8]>>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an unscoped subscription for one signal kind.
    pub fn subscribe(&self, kind: SignalKind, handler: impl Fn(&Signal) + 'static) {
        self.subscriptions.borrow_mut().push(Subscription {
            kind,
            key: None,
            handler: Rc::new(handler),
        });
    }

    /// Appends a layer-scoped subscription.
    ///
    /// Scoped subscriptions only fire for zone signals whose index matches
    /// the key's index; signals without an index fire unconditionally.
    pub fn subscribe_keyed(
        &self,
        kind: SignalKind,
        key: LayerKey,
        handler: impl Fn(&Signal) + 'static,
    ) {
        self.subscriptions.borrow_mut().push(Subscription {
            kind,
            key: Some(key),
            handler: Rc::new(handler),
        });
    }

    /// Dispatches `signal` to every matching subscriber, synchronously and
    /// in subscription order. Zero subscribers is a no-op.
    ///
    /// The subscriber list is snapshotted first, so a handler may subscribe
    /// during dispatch without affecting the current round.
    pub fn trigger(&self, signal: &Signal) {
        let kind = signal.kind();
        let matching: Vec<Rc<dyn Fn(&Signal)>> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.kind == kind)
            .filter(|s| match (s.key, signal.zone_index()) {
                (Some(key), Some(zone)) => key.index == zone,
                _ => true,
            })
            .map(|s| Rc::clone(&s.handler))
            .collect();
        for handler in matching {
            handler(signal);
        }
    }

    /// Number of registered subscriptions, scoped and unscoped.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}
