//! Optimizer configuration.

use crate::{DbaError, DbaResult};

/// Evenly spaced candidate durations in `[start, stop)`.
///
/// ```rust
/// let paths = pon_dba::arange_paths(1e-3, 2.0, 0.2);
/// assert_eq!(paths.len(), 10);
/// ```
pub fn arange_paths(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(stop > start) {
        return Vec::new();
    }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|i| start + i as f64 * step).filter(|&p| p < stop).collect()
}

/// Parameters of the pheromone-weighted optimizer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Candidate window durations.  Fixed for the optimizer's lifetime.
    pub time_paths:     Vec<f64>,

    /// Number of ONUs (pheromone rows).
    pub onu_count:      usize,

    /// Evaporation: fraction of each weight kept per round, in `(0, 1)`.
    pub retention:      f64,

    /// Scale applied to each round's reinforcement.
    pub learning_rate:  f64,

    /// Numerator of the reinforcement term.
    pub weight_gain:    f64,

    /// Added to `|path - demand|` so an exact match stays finite.
    pub epsilon:        f64,

    /// Added to every weight after reinforcement.
    pub floor:          f64,

    /// Starting value of every weight.
    pub initial_weight: f64,
}

impl AcoConfig {
    /// Config with default tuning for the given paths and ONU count.
    pub fn new(time_paths: Vec<f64>, onu_count: usize) -> Self {
        Self {
            time_paths,
            onu_count,
            retention:      0.9,
            learning_rate:  0.1,
            weight_gain:    1.0,
            epsilon:        1e-6,
            floor:          1e-9,
            initial_weight: 1.0,
        }
    }

    pub fn with_retention(mut self, retention: f64) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_weight_gain(mut self, weight_gain: f64) -> Self {
        self.weight_gain = weight_gain;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    pub fn validate(&self) -> DbaResult<()> {
        if self.onu_count == 0 {
            return Err(DbaError::Config("onu_count must be at least 1".into()));
        }
        if self.time_paths.len() < self.onu_count {
            return Err(DbaError::NotEnoughPaths {
                paths: self.time_paths.len(),
                onus:  self.onu_count,
            });
        }
        if let Some(p) = self.time_paths.iter().find(|p| !(p.is_finite() && **p >= 0.0)) {
            return Err(DbaError::Config(format!("time path {p} is not a finite non-negative duration")));
        }
        if !(self.retention > 0.0 && self.retention < 1.0) {
            return Err(DbaError::Config(format!("retention must lie in (0, 1), got {}", self.retention)));
        }
        for (name, value) in [
            ("learning_rate",  self.learning_rate),
            ("weight_gain",    self.weight_gain),
            ("epsilon",        self.epsilon),
            ("floor",          self.floor),
            ("initial_weight", self.initial_weight),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DbaError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}
