//! Fluent builder for constructing an [`Olt`].

use pon_core::{Horizon, OnuConfig, OnuId, PathId, SimClock, SimConfig, SimRng};
use pon_dba::WindowPlanner;
use pon_onu::OnuSetBuilder;
use tracing::info;

use crate::metrics::MetricsAggregator;
use crate::{Olt, SimError, SimResult};

/// Seed offset separating the planner's stream from the ONU arrival streams.
const PLANNER_STREAM: u64 = 0x5bd1_e995;

/// Fluent builder for [`Olt<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: horizon, seed, rounds, frames per round, …
/// - `P: WindowPlanner`: [`pon_dba::FixedPlan`] or
///   [`pon_dba::PheromoneOptimizer`]
/// - the initial window duration of every ONU
///
/// ONUs are added with [`onu`][Self::onu], [`repeat`][Self::repeat], or
/// [`onus`][Self::onus]; their count must match the window vector.
///
/// # Example
///
/// ```rust,ignore
/// let mut olt = OltBuilder::new(config, FixedPlan, vec![1.0, 1.0])
///     .repeat(OnuConfig::new(30.0, 0.12, 512), 2)
///     .build()?;
/// olt.run_to_end(&mut NoopObserver)?;
/// ```
pub struct OltBuilder<P: WindowPlanner> {
    config:  SimConfig,
    planner: P,
    windows: Vec<f64>,
    onus:    Vec<OnuConfig>,
}

impl<P: WindowPlanner> OltBuilder<P> {
    pub fn new(config: SimConfig, planner: P, windows: Vec<f64>) -> Self {
        Self {
            config,
            planner,
            windows,
            onus: Vec::new(),
        }
    }

    pub fn onu(mut self, config: OnuConfig) -> Self {
        self.onus.push(config);
        self
    }

    pub fn repeat(mut self, config: OnuConfig, n: usize) -> Self {
        self.onus.extend(std::iter::repeat_n(config, n));
        self
    }

    pub fn onus<I: IntoIterator<Item = OnuConfig>>(mut self, configs: I) -> Self {
        self.onus.extend(configs);
        self
    }

    /// Validate inputs, seed every ONU's arrival stream, and return a
    /// ready-to-run [`Olt`].
    pub fn build(self) -> SimResult<Olt<P>> {
        self.config.validate()?;
        let horizon = self.config.horizon()?;
        let onu_count = self.onus.len();

        if onu_count == 0 {
            return Err(SimError::Config("at least one ONU is required".into()));
        }
        if self.windows.len() != onu_count {
            return Err(SimError::OnuCountMismatch {
                expected: onu_count,
                got:      self.windows.len(),
                what:     "window durations",
            });
        }
        validate_windows(&self.windows, horizon)?;
        validate_paths(self.planner.time_paths(), horizon)?;

        if let Some(matrix) = self.planner.pheromone() {
            if matrix.onu_count() != onu_count {
                return Err(SimError::OnuCountMismatch {
                    expected: onu_count,
                    got:      matrix.onu_count(),
                    what:     "pheromone rows",
                });
            }
        }

        let onus = OnuSetBuilder::new(self.config.seed, horizon)
            .onus(self.onus)
            .build()?;

        info!(
            onus = onu_count,
            horizon = horizon.get(),
            seed = self.config.seed,
            paths = self.planner.path_count(),
            "OLT built"
        );

        let mut root = SimRng::new(self.config.seed);
        Ok(Olt {
            clock:   SimClock::new(horizon),
            rng:     root.child(PLANNER_STREAM),
            metrics: MetricsAggregator::new(onu_count, self.planner.path_count()),
            config:  self.config,
            onus,
            windows: self.windows,
            planner: self.planner,
            round:   0,
        })
    }
}

/// Every candidate the planner can assign must itself be a valid window.
fn validate_paths(time_paths: &[f64], horizon: Horizon) -> SimResult<()> {
    for (i, &duration) in time_paths.iter().enumerate() {
        if !in_horizon(duration, horizon) {
            return Err(SimError::InvalidPath { path: PathId(i as u32), duration });
        }
    }
    Ok(())
}

#[inline]
fn in_horizon(duration: f64, horizon: Horizon) -> bool {
    duration.is_finite() && duration >= 0.0 && duration < horizon.get()
}

/// Every window must be a finite duration in `[0, horizon)`.
pub(crate) fn validate_windows(windows: &[f64], horizon: Horizon) -> SimResult<()> {
    for (i, &duration) in windows.iter().enumerate() {
        if !in_horizon(duration, horizon) {
            return Err(SimError::InvalidWindow { onu: OnuId(i as u32), duration });
        }
    }
    Ok(())
}
