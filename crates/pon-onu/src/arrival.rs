//! Exponential message-arrival process.

use pon_core::{Horizon, OnuConfig, OnuRng};

/// A self-scheduling Poisson point process.
///
/// The next arrival is only known once the previous one has fired, so the
/// process holds exactly one pending arrival: its time and the length of the
/// message it will carry.  [`tick`][Self::tick] replaces both.
pub struct ArrivalProcess {
    mean_arrival_period: f64,
    mean_message_length: f64,
    next_arrival_time:   f64,
    next_message_length: f64,
    horizon:             Horizon,
    rng:                 OnuRng,
}

impl ArrivalProcess {
    /// Create the process and schedule its first arrival after time zero.
    pub fn new(config: &OnuConfig, horizon: Horizon, rng: OnuRng) -> Self {
        let mut process = Self {
            mean_arrival_period: config.mean_arrival_period,
            mean_message_length: config.mean_message_length,
            next_arrival_time:   0.0,
            next_message_length: 0.0,
            horizon,
            rng,
        };
        process.tick();
        process
    }

    /// Draw the next message length and advance the arrival time by an
    /// exponential gap, modulo the horizon.
    pub fn tick(&mut self) {
        self.next_message_length = self.rng.exponential(self.mean_message_length);
        let gap = self.rng.exponential(self.mean_arrival_period);
        self.next_arrival_time = self.horizon.wrap(self.next_arrival_time + gap);
    }

    /// Move the pending arrival to `at` (wrapped onto the horizon), keeping
    /// the message length already drawn for it.  The exponential gap after
    /// the next [`tick`][Self::tick] is measured from the new time.
    pub fn reschedule(&mut self, at: f64) {
        self.next_arrival_time = self.horizon.wrap(at);
    }

    #[inline]
    pub fn peek_next_arrival(&self) -> f64 {
        self.next_arrival_time
    }

    #[inline]
    pub fn next_message_length(&self) -> f64 {
        self.next_message_length
    }

    pub fn mean_arrival_period(&self) -> f64 {
        self.mean_arrival_period
    }

    pub fn mean_message_length(&self) -> f64 {
        self.mean_message_length
    }
}
