//! Cancellation signals polled between expansion steps.
//!
//! The engine never manages timers; it only asks `is_cancelled()`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A pollable stop signal.
pub trait Cancel {
    fn is_cancelled(&self) -> bool;
}

/// Never fires; the search runs until its space is exhausted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Never;

impl Cancel for Never {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Fires once the wall clock passes a fixed instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    #[inline]
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    #[inline]
    pub fn after(budget: Duration) -> Self {
        Self::at(Instant::now() + budget)
    }
}

impl Cancel for Deadline {
    #[inline]
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.at
    }
}

impl Cancel for AtomicBool {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Fires when either signal fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyOf<A, B>(pub A, pub B);

impl<A: Cancel, B: Cancel> Cancel for AnyOf<A, B> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled() || self.1.is_cancelled()
    }
}

impl<C: Cancel + ?Sized> Cancel for &C {
    #[inline]
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<C: Cancel + ?Sized> Cancel for Arc<C> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<C: Cancel + ?Sized> Cancel for Box<C> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
