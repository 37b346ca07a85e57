// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! A cooperative task queue and one-shot deferred values.
//!
//! Domain recomputes are asynchronous by contract even though today's
//! computation is synchronous: downstream code sequences after them, and
//! the contract keeps the door open for cross-frame or remote domain
//! sources. [`Deferred`] models that one-shot completion; [`Scheduler`] is
//! the single-threaded queue that stands in for the host event loop.
//! Continuations always run on a later queue turn, never inline, so the
//! ordering a caller observes does not depend on whether a deferred was
//! already resolved when `then` was called.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

/// A FIFO task queue; one per chart instance.
#[derive(Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<VecDeque<Task>>>,
}

impl Scheduler {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task to run on a later turn.
    pub fn post(&self, task: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(task));
    }

    /// Runs queued tasks, including ones they enqueue, until the queue is
    /// empty. Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.queue.borrow_mut().pop_front();
            let Some(task) = task else {
                break;
            };
            task();
            ran += 1;
        }
        ran
    }

    /// Whether the queue is empty.
    pub fn is_idle(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.queue.borrow().len())
            .finish()
    }
}

struct DeferredState<T> {
    scheduler: Scheduler,
    resolved: bool,
    value: Option<T>,
    callback: Option<Box<dyn FnOnce(T)>>,
}

/// A one-shot value resolved on a later queue turn.
///
/// Supports a single continuation. There is no cancellation and no timeout;
/// a deferred that never resolves simply never runs its continuation.
pub struct Deferred<T> {
    state: Rc<RefCell<DeferredState<T>>>,
}

// Handle semantics regardless of whether T is Clone; a derive would add a
// `T: Clone` bound.
impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: 'static> Deferred<T> {
    /// Creates an unresolved deferred bound to `scheduler`.
    pub fn new(scheduler: &Scheduler) -> Self {
        Self {
            state: Rc::new(RefCell::new(DeferredState {
                scheduler: scheduler.clone(),
                resolved: false,
                value: None,
                callback: None,
            })),
        }
    }

    /// Resolves with `value`. If a continuation is attached, it is posted
    /// to the queue; it never runs inline. Resolving twice is a contract
    /// violation and panics.
    pub fn resolve(&self, value: T) {
        let mut state = self.state.borrow_mut();
        assert!(!state.resolved, "deferred resolved twice");
        state.resolved = true;
        if let Some(callback) = state.callback.take() {
            state.scheduler.post(move || callback(value));
        } else {
            state.value = Some(value);
        }
    }

    /// Attaches the continuation. If the deferred is already resolved, the
    /// continuation is posted to the queue; it never runs inline.
    ///
    /// Only one continuation is supported; attaching a second one panics.
    pub fn then(&self, callback: impl FnOnce(T) + 'static) {
        let mut state = self.state.borrow_mut();
        assert!(state.callback.is_none(), "deferred already has a continuation");
        if let Some(value) = state.value.take() {
            let callback = Box::new(callback);
            state.scheduler.post(move || callback(value));
        } else {
            state.callback = Some(Box::new(callback));
        }
    }

    /// Resolves on a later queue turn with the value `make` produces then.
    ///
    /// This is the usual shape of a domain recompute: the work itself is
    /// queued, so it observes state as of its run turn, not its call turn.
    pub fn resolve_later(&self, make: impl FnOnce() -> T + 'static) {
        let this = self.clone();
        let scheduler = self.state.borrow().scheduler.clone();
        scheduler.post(move || this.resolve(make()));
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Deferred")
            .field("resolved", &state.resolved)
            .field("has_continuation", &state.callback.is_some())
            .finish()
    }
}
