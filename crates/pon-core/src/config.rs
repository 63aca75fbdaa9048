//! Run and endpoint configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to `pon_sim::OltBuilder`.

use crate::{CoreError, CoreResult, Horizon, time::DEFAULT_HORIZON};

// ── OnuConfig ─────────────────────────────────────────────────────────────────

/// Arrival-process and queue parameters for one network unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnuConfig {
    /// Mean of the exponential inter-arrival time.
    pub mean_arrival_period: f64,

    /// Mean of the exponential message length, in time units of service.
    pub mean_message_length: f64,

    /// Maximum number of messages waiting in the queue.  Zero blocks every
    /// arrival.
    pub queue_capacity: usize,
}

impl OnuConfig {
    pub fn new(mean_arrival_period: f64, mean_message_length: f64, queue_capacity: usize) -> Self {
        Self { mean_arrival_period, mean_message_length, queue_capacity }
    }

    /// Offered load: mean service demand per unit time.
    pub fn offered_load(&self) -> f64 {
        self.mean_message_length / self.mean_arrival_period
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.mean_arrival_period.is_finite() && self.mean_arrival_period > 0.0) {
            return Err(CoreError::Config(format!(
                "mean arrival period must be positive, got {}",
                self.mean_arrival_period
            )));
        }
        if !(self.mean_message_length.is_finite() && self.mean_message_length > 0.0) {
            return Err(CoreError::Config(format!(
                "mean message length must be positive, got {}",
                self.mean_message_length
            )));
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Modulus of the circular time domain.
    pub horizon: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Rounds executed by `Olt::run_to_end`.
    pub rounds: u64,

    /// Frames per round.  Each frame grants every ONU one window.
    pub frames_per_round: u32,

    /// Divisor applied to each ONU's offered demand before it reaches the
    /// planner.  `None` divides by `frames_per_round`, i.e. the planner sees
    /// demand per frame, in the same unit as a window duration.
    pub demand_normalizer: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            horizon:           DEFAULT_HORIZON,
            seed:              42,
            rounds:            1_000,
            frames_per_round:  10,
            demand_normalizer: None,
        }
    }
}

impl SimConfig {
    /// The validated horizon.
    pub fn horizon(&self) -> CoreResult<Horizon> {
        Horizon::new(self.horizon).ok_or_else(|| {
            CoreError::Config(format!("horizon must be finite and positive, got {}", self.horizon))
        })
    }

    /// The divisor applied to raw offered demand at round end.
    pub fn effective_normalizer(&self) -> f64 {
        self.normalizer_for(self.frames_per_round)
    }

    /// The divisor for a round of `frames` frames, which may differ from
    /// `frames_per_round` when the caller drives rounds directly.
    pub fn normalizer_for(&self, frames: u32) -> f64 {
        self.demand_normalizer.unwrap_or(frames.max(1) as f64)
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.horizon()?;
        if self.frames_per_round == 0 {
            return Err(CoreError::Config("frames_per_round must be at least 1".into()));
        }
        let norm = self.effective_normalizer();
        if !(norm.is_finite() && norm > 0.0) {
            return Err(CoreError::Config(format!(
                "demand normalizer must be positive, got {norm}"
            )));
        }
        Ok(())
    }
}
