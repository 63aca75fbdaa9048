//! Circular simulation time.
//!
//! # Design
//!
//! Simulation time is an `f64` confined to `[0, horizon)`.  Every absolute
//! time stored anywhere in the simulator (arrival times, window ends, service
//! completions) is wrapped into that range, so long runs never accumulate
//! unbounded floating-point magnitudes.
//!
//! The price is that "is `a` before `b`?" has no meaning on its own; it is
//! only meaningful relative to a reference point.  All ordering therefore
//! goes through two functions:
//!
//!   forward_delta(from, to) = to - from            if to >= from
//!                           = to + (horizon - from) otherwise
//!
//!   in_window(t, start, end) = forward_delta(start, t) < forward_delta(start, end)
//!
//! Every pending event lies at a forward delta of at least zero from the
//! clock, and windows are strictly shorter than the horizon, so these two
//! functions order events correctly across the wrap point.

use std::fmt;

/// Default modulus of the circular time domain.
pub const DEFAULT_HORIZON: f64 = 1_000_000.0;

// ── Horizon ──────────────────────────────────────────────────────────────────

/// The modulus of the circular time domain.
///
/// Constructed through [`Horizon::new`], which rejects non-positive and
/// non-finite values, so every method may assume `0 < horizon < ∞`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Horizon(f64);

impl Horizon {
    /// Returns `None` unless `value` is finite and strictly positive.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Horizon(value))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Map any finite time into `[0, horizon)`.
    #[inline]
    pub fn wrap(self, t: f64) -> f64 {
        let w = t.rem_euclid(self.0);
        // rem_euclid can round up to exactly the modulus for tiny negatives.
        if w >= self.0 { 0.0 } else { w }
    }

    /// Forward distance from `from` to `to` on the circle.
    #[inline]
    pub fn forward_delta(self, from: f64, to: f64) -> f64 {
        forward_delta(from, to, self.0)
    }

    /// `true` if `t` lies in the half-open window `[start, end)`.
    #[inline]
    pub fn in_window(self, t: f64, start: f64, end: f64) -> bool {
        in_window(t, start, end, self.0)
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon(DEFAULT_HORIZON)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

// ── Free functions ───────────────────────────────────────────────────────────

/// Forward distance from `from` to `to` on a circle of circumference
/// `horizon`.  Both arguments are expected in `[0, horizon)`.
#[inline]
pub fn forward_delta(from: f64, to: f64, horizon: f64) -> f64 {
    if to >= from {
        to - from
    } else {
        to + (horizon - from)
    }
}

/// `true` if `t` falls in the half-open circular window `[start, end)`.
///
/// A window with `end == start` is empty.
#[inline]
pub fn in_window(t: f64, start: f64, end: f64, horizon: f64) -> bool {
    forward_delta(start, t, horizon) < forward_delta(start, end, horizon)
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The OLT's current simulation time.
#[derive(Clone, Debug)]
pub struct SimClock {
    now:     f64,
    horizon: Horizon,
    /// Number of times the clock has passed the wrap point.
    laps:    u64,
}

impl SimClock {
    pub fn new(horizon: Horizon) -> Self {
        Self { now: 0.0, horizon, laps: 0 }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    #[inline]
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub fn laps(&self) -> u64 {
        self.laps
    }

    /// Jump to the absolute (wrapped) time `t`, which must not lie behind the
    /// current time.
    #[inline]
    pub fn advance_to(&mut self, t: f64) {
        let t = self.horizon.wrap(t);
        if t < self.now {
            self.laps += 1;
        }
        self.now = t;
    }

    /// Forward distance from now to `t`.
    #[inline]
    pub fn until(&self, t: f64) -> f64 {
        self.horizon.forward_delta(self.now, t)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.6} (lap {})", self.now, self.laps)
    }
}
