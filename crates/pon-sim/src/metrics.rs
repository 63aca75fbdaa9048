//! Running-average metrics, sampled once per round.
//!
//! The aggregator only reads simulation state; nothing here feeds back into
//! the OLT or the planner.

use pon_core::PathId;
use pon_dba::PheromoneMatrix;
use pon_onu::Onu;

/// Incremental mean update: `mean += (x - mean) / n`.
#[inline]
fn running_mean(mean: &mut f64, x: f64, n: u64) {
    *mean += (x - *mean) / n as f64;
}

/// A serializable copy of the aggregated metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    /// Rounds recorded so far.
    pub rounds:         u64,
    /// Mean pheromone matrix over all recorded rounds; empty for planners
    /// without weights.
    pub pheromone_mean: Vec<Vec<f64>>,
    /// `[onu][path]` count of rounds in which the ONU was assigned the path.
    pub path_frequency: Vec<Vec<u64>>,
    /// Mean normalized demand per ONU.
    pub demand_mean:    Vec<f64>,
    /// Lifetime `blocked / (blocked + sent)` per ONU.
    pub blocking_ratio: Vec<f64>,
    /// Lifetime mean queueing delay per ONU.
    pub mean_wait:      Vec<f64>,
}

impl MetricsSnapshot {
    /// Names of the reported series, in field order.
    pub fn metric_names() -> &'static [&'static str] {
        &[
            "pheromone_mean",
            "path_frequency",
            "demand_mean",
            "blocking_ratio",
            "mean_wait",
        ]
    }
}

/// Accumulates per-round observations into running averages.
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    rounds:            u64,
    pheromone_samples: u64,
    pheromone_mean:    Vec<Vec<f64>>,
    path_frequency:    Vec<Vec<u64>>,
    demand_mean:       Vec<f64>,
    blocking_ratio:    Vec<f64>,
    mean_wait:         Vec<f64>,
}

impl MetricsAggregator {
    /// Empty accumulators for `onu_count` ONUs and `path_count` candidate
    /// paths (0 when the planner has no path menu).
    pub fn new(onu_count: usize, path_count: usize) -> Self {
        Self {
            rounds:            0,
            pheromone_samples: 0,
            pheromone_mean:    Vec::new(),
            path_frequency:    vec![vec![0; path_count]; onu_count],
            demand_mean:       vec![0.0; onu_count],
            blocking_ratio:    vec![0.0; onu_count],
            mean_wait:         vec![0.0; onu_count],
        }
    }

    /// Fold one round into the accumulators.
    ///
    /// `demand` and `paths` are indexed by ONU; `paths` is `None` when the
    /// planner kept the previous windows.
    pub fn record_round(
        &mut self,
        demand:    &[f64],
        paths:     Option<&[PathId]>,
        pheromone: Option<&PheromoneMatrix>,
        onus:      &[Onu],
    ) {
        self.rounds += 1;
        let n = self.rounds;

        for (mean, &d) in self.demand_mean.iter_mut().zip(demand) {
            running_mean(mean, d, n);
        }

        if let Some(paths) = paths {
            for (row, path) in self.path_frequency.iter_mut().zip(paths) {
                if let Some(count) = row.get_mut(path.index()) {
                    *count += 1;
                }
            }
        }

        if let Some(matrix) = pheromone {
            self.pheromone_samples += 1;
            if self.pheromone_mean.is_empty() {
                self.pheromone_mean = matrix.rows().to_vec();
            } else {
                let k = self.pheromone_samples;
                for (mean_row, row) in self.pheromone_mean.iter_mut().zip(matrix.rows()) {
                    for (mean, &w) in mean_row.iter_mut().zip(row) {
                        running_mean(mean, w, k);
                    }
                }
            }
        }

        for (i, onu) in onus.iter().enumerate() {
            self.blocking_ratio[i] = onu.counters().blocking_ratio();
            self.mean_wait[i] = onu.counters().mean_wait();
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rounds:         self.rounds,
            pheromone_mean: self.pheromone_mean.clone(),
            path_frequency: self.path_frequency.clone(),
            demand_mean:    self.demand_mean.clone(),
            blocking_ratio: self.blocking_ratio.clone(),
            mean_wait:      self.mean_wait.clone(),
        }
    }
}
