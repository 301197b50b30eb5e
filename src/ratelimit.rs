//! # Rate Limiters
//!
//! Debounce and throttle as small stateful objects driven by explicit
//! timestamps. The host event loop passes `Instant`s in; nothing here
//! sleeps or spawns.
//!
//! - [`Debouncer`] holds the arguments of the latest call and releases them
//!   once `wait` has passed with no newer call.
//! - [`Throttle`] lets the first call through and drops every call in the
//!   following `limit` window.
//!
//! [`Debounced`] and [`Throttled`] wrap a callback around each of them.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<A> {
    wait: Duration,
    pending: Option<(A, Instant)>,
}

impl<A> Debouncer<A> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Record a call. Replaces any pending call and restarts the timer.
    pub fn call(&mut self, args: A, now: Instant) {
        self.pending = Some((args, now + self.wait));
    }

    /// Release the pending arguments if the wait has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        let due = self.deadline()?;
        if now >= due {
            self.flush()
        } else {
            None
        }
    }

    /// Release the pending arguments immediately.
    pub fn flush(&mut self) -> Option<A> {
        self.pending.take().map(|(args, _)| args)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }
}

#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            last_fired: None,
        }
    }

    /// Returns `true` if a call at `now` may run. A `true` result opens a new
    /// window; calls inside it return `false` and are not remembered.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        let open = match self.last_fired {
            Some(last) => now.saturating_duration_since(last) >= self.limit,
            None => true,
        };
        if open {
            self.last_fired = Some(now);
        }
        open
    }

    /// When the current window closes, if one is open.
    pub fn reopens_at(&self) -> Option<Instant> {
        self.last_fired.map(|last| last + self.limit)
    }

    /// Close the current window so the next call passes.
    pub fn cancel(&mut self) {
        self.last_fired = None;
    }
}

/// A callback that runs only after calls stop arriving for `wait`.
pub struct Debounced<F, A> {
    func: F,
    inner: Debouncer<A>,
}

impl<F, A> Debounced<F, A>
where
    F: FnMut(A),
{
    pub fn new(func: F, wait: Duration) -> Self {
        Self {
            func,
            inner: Debouncer::new(wait),
        }
    }

    pub fn call(&mut self, args: A, now: Instant) {
        self.inner.call(args, now);
    }

    /// Run the callback if its wait has elapsed. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.inner.poll(now) {
            Some(args) => {
                (self.func)(args);
                true
            }
            None => false,
        }
    }

    /// Run a pending call now. Returns whether anything ran.
    pub fn flush(&mut self) -> bool {
        match self.inner.flush() {
            Some(args) => {
                (self.func)(args);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

/// A callback that runs at most once per `limit`.
pub struct Throttled<F> {
    func: F,
    inner: Throttle,
}

impl<F> Throttled<F> {
    pub fn new(func: F, limit: Duration) -> Self {
        Self {
            func,
            inner: Throttle::new(limit),
        }
    }

    /// Run the callback with `args` unless inside the window. Returns
    /// whether it ran.
    pub fn call<A>(&mut self, args: A, now: Instant) -> bool
    where
        F: FnMut(A),
    {
        if self.inner.try_acquire(now) {
            (self.func)(args);
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}
