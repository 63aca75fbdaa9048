//! OLT observer trait for progress reporting and data collection.

use pon_core::{OnuId, PathId};
use pon_onu::Admission;

// ── Round summaries ───────────────────────────────────────────────────────────

/// One ONU's figures for a completed round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnuRoundStats {
    pub onu:            OnuId,
    /// Raw sum of arrived message lengths this round.
    pub offered_demand: f64,
    /// Offered demand after normalization; what the planner saw.
    pub demand:         f64,
    pub sent:           u64,
    pub blocked:        u64,
    /// Queue depth at round end.
    pub queue_depth:    usize,
    /// Window length used during this round.
    pub window:         f64,
    /// Window length planned for the next round.
    pub next_window:    f64,
    /// Candidate path behind `next_window`, when the planner chose one.
    pub path:           Option<PathId>,
}

/// Everything the OLT reports at the end of a round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSummary {
    /// Zero-based index of the completed round.
    pub round: u64,
    /// Clock value after the round's last frame.
    pub clock: f64,
    pub onus:  Vec<OnuRoundStats>,
}

impl RoundSummary {
    pub fn total_sent(&self) -> u64 {
        self.onus.iter().map(|s| s.sent).sum()
    }

    pub fn total_blocked(&self) -> u64 {
        self.onus.iter().map(|s| s.blocked).sum()
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Olt::run`][crate::Olt::run] at key points in the
/// window loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: blocking monitor
///
/// ```rust,ignore
/// struct BlockingMonitor;
///
/// impl OltObserver for BlockingMonitor {
///     fn on_round_end(&mut self, summary: &RoundSummary) {
///         if summary.total_blocked() > 0 {
///             println!("round {}: {} blocked", summary.round, summary.total_blocked());
///         }
///     }
/// }
/// ```
pub trait OltObserver {
    /// Called for every delivered arrival, after admission and before the
    /// following arrival is scheduled.
    fn on_arrival(&mut self, _onu: OnuId, _time: f64, _length: f64, _admission: Admission) {}

    /// Called when `onu`'s window closes; `clock` is the window end.
    fn on_window_end(&mut self, _onu: OnuId, _clock: f64) {}

    /// Called once per round after the planner has produced the next plan
    /// and before round counters are flushed.
    fn on_round_end(&mut self, _summary: &RoundSummary) {}

    /// Called once after the final round of a run.
    fn on_sim_end(&mut self, _rounds: u64) {}
}

/// An [`OltObserver`] that does nothing.
pub struct NoopObserver;

impl OltObserver for NoopObserver {}
