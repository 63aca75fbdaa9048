//! Plain data row types written by output backends.

use pon_sim::{OnuRoundStats, RoundSummary};

/// Totals for one completed round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRow {
    pub round:         u64,
    /// Clock value after the round's last frame.
    pub clock:         f64,
    pub sent:          u64,
    pub blocked:       u64,
    /// Sum of the normalized demand reported by every ONU.
    pub demand:        f64,
}

impl From<&RoundSummary> for RoundRow {
    fn from(summary: &RoundSummary) -> Self {
        Self {
            round:   summary.round,
            clock:   summary.clock,
            sent:    summary.total_sent(),
            blocked: summary.total_blocked(),
            demand:  summary.onus.iter().map(|s| s.demand).sum(),
        }
    }
}

/// One ONU's figures for one round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnuRoundRow {
    pub round:          u64,
    pub onu:            u32,
    pub offered_demand: f64,
    pub demand:         f64,
    pub sent:           u64,
    pub blocked:        u64,
    pub queue_depth:    u64,
    pub window:         f64,
    pub next_window:    f64,
    /// Index into the planner's path menu; `None` under a fixed plan.
    pub path:           Option<u32>,
}

impl OnuRoundRow {
    pub fn new(round: u64, stats: &OnuRoundStats) -> Self {
        Self {
            round,
            onu:            stats.onu.0,
            offered_demand: stats.offered_demand,
            demand:         stats.demand,
            sent:           stats.sent,
            blocked:        stats.blocked,
            queue_depth:    stats.queue_depth as u64,
            window:         stats.window,
            next_window:    stats.next_window,
            path:           stats.path.map(|p| p.0),
        }
    }
}
