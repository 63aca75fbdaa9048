//! The `Olt` struct and its window loop.

use pon_core::{CoreError, OnuId, PathId, SimClock, SimConfig, SimRng};
use pon_dba::{Assignment, WindowPlanner};
use pon_onu::Onu;
use tracing::{debug, info, trace};

use crate::builder::validate_windows;
use crate::metrics::{MetricsAggregator, MetricsSnapshot};
use crate::{OltObserver, OnuRoundStats, RoundSummary, SimError, SimResult};

/// The line terminator: owns the ONUs, the window plan, and the clock.
///
/// `Olt<P>` drives the round loop:
///
/// 1. **Frames**: each frame opens one window per ONU, in index order.
///    Arrivals at *every* ONU are delivered as they occur; only the ONU whose
///    window is open may serve its queue.
/// 2. **Demand**: each ONU's offered demand is normalized and handed to the
///    planner, which may replace the window vector.
/// 3. **Bookkeeping**: invariants are checked, metrics recorded, the
///    observer notified, and per-round counters flushed.
///
/// Create via [`OltBuilder`][crate::OltBuilder].
pub struct Olt<P: WindowPlanner> {
    /// Run configuration (horizon, seed, rounds, frames per round).
    pub config: SimConfig,

    pub(crate) clock:   SimClock,
    pub(crate) onus:    Vec<Onu>,
    pub(crate) windows: Vec<f64>,
    pub(crate) planner: P,
    /// Planner stream; ONU arrival streams live inside each ONU.
    pub(crate) rng:     SimRng,
    pub(crate) metrics: MetricsAggregator,
    pub(crate) round:   u64,
}

impl<P: WindowPlanner> Olt<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run `rounds` rounds of `frames_per_round` frames each.
    pub fn run<O: OltObserver>(
        &mut self,
        rounds:           u64,
        frames_per_round: u32,
        observer:         &mut O,
    ) -> SimResult<()> {
        for _ in 0..rounds {
            self.run_round(frames_per_round, observer)?;
        }
        observer.on_sim_end(self.round);
        info!(
            rounds = self.round,
            clock = self.clock.now(),
            laps = self.clock.laps(),
            "run complete"
        );
        Ok(())
    }

    /// Run the number of rounds and frames given in `config`.
    pub fn run_to_end<O: OltObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.run(self.config.rounds, self.config.frames_per_round, observer)
    }

    /// Run one round: `frames` frames, then the planner update.
    pub fn run_round<O: OltObserver>(&mut self, frames: u32, observer: &mut O) -> SimResult<RoundSummary> {
        let windows_used = self.windows.clone();
        for _ in 0..frames {
            self.run_frame(observer)?;
        }

        let normalizer = self.config.normalizer_for(frames);
        let demand: Vec<f64> = self
            .onus
            .iter()
            .map(|onu| onu.offered_demand_this_round() / normalizer)
            .collect();

        let paths = match self.planner.plan(&demand, &mut self.rng)? {
            Some(Assignment { durations, paths }) => {
                if durations.len() != self.onus.len() {
                    return Err(SimError::OnuCountMismatch {
                        expected: self.onus.len(),
                        got:      durations.len(),
                        what:     "planned windows",
                    });
                }
                validate_windows(&durations, self.clock.horizon())?;
                self.windows = durations;
                Some(paths)
            }
            None => None,
        };

        for onu in &self.onus {
            onu.check_invariants()?;
        }

        self.metrics.record_round(&demand, paths.as_deref(), self.planner.pheromone(), &self.onus);
        let summary = self.summarize(&windows_used, &demand, paths.as_deref());

        debug!(
            round = summary.round,
            clock = summary.clock,
            sent = summary.total_sent(),
            blocked = summary.total_blocked(),
            "round complete"
        );
        observer.on_round_end(&summary);

        for onu in &mut self.onus {
            onu.flush_round_counters();
        }
        self.round += 1;
        Ok(summary)
    }

    /// Open one window per ONU, in index order.
    ///
    /// Afterwards the clock has advanced by exactly the sum of the window
    /// durations, modulo the horizon.
    pub fn run_frame<O: OltObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        for k in 0..self.onus.len() {
            self.run_window(k, observer)?;
        }
        Ok(())
    }

    /// The ONU whose next arrival is closest ahead of the clock.  Ties go to
    /// the lowest index.
    pub fn next_arrival_event(&self) -> (OnuId, f64) {
        let mut best = (OnuId(0), self.onus[0].peek_next_arrival());
        let mut best_delta = f64::INFINITY;
        for (i, onu) in self.onus.iter().enumerate() {
            let at = onu.peek_next_arrival();
            let delta = self.clock.until(at);
            if delta < best_delta {
                best_delta = delta;
                best = (OnuId(i as u32), at);
            }
        }
        best
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn onus(&self) -> &[Onu] {
        &self.onus
    }

    pub fn onu(&self, id: OnuId) -> SimResult<&Onu> {
        self.onus.get(id.index()).ok_or(SimError::Core(CoreError::OnuNotFound(id)))
    }

    /// The window plan for the current round.
    pub fn windows(&self) -> &[f64] {
        &self.windows
    }

    /// Replace the window plan, e.g. between rounds in a driver-controlled
    /// experiment.
    pub fn set_windows(&mut self, windows: Vec<f64>) -> SimResult<()> {
        if windows.len() != self.onus.len() {
            return Err(SimError::OnuCountMismatch {
                expected: self.onus.len(),
                got:      windows.len(),
                what:     "window durations",
            });
        }
        validate_windows(&windows, self.clock.horizon())?;
        self.windows = windows;
        Ok(())
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// Rounds completed so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Inverse of the total queueing delay over all served messages;
    /// infinite while nothing has waited.
    pub fn fitness(&self) -> f64 {
        let waited: f64 = self.onus.iter().map(|o| o.counters().waited_total).sum();
        if waited > 0.0 { 1.0 / waited } else { f64::INFINITY }
    }

    // ── Window loop ───────────────────────────────────────────────────────

    /// Serve ONU `k` for `windows[k]` time units.
    fn run_window<O: OltObserver>(&mut self, k: usize, observer: &mut O) -> SimResult<()> {
        let horizon = self.clock.horizon();
        let start = self.clock.now();
        let duration = self.windows[k];
        let end = horizon.wrap(start + duration);

        // When the message in service last (re)started transmitting.
        let mut resumed_at = start;
        if duration > 0.0 && self.onus[k].is_idle() {
            self.onus[k].dequeue_for_service(start)?;
        }

        loop {
            let (owner, at) = self.next_arrival_event();
            if !horizon.in_window(at, start, end) {
                break;
            }
            self.complete_services(k, &mut resumed_at, at)?;

            self.clock.advance_to(at);
            let onu = &mut self.onus[owner.index()];
            let length = onu.next_message_length();
            let admission = onu.enqueue_arrived_message(at);
            onu.tick();
            observer.on_arrival(owner, at, length, admission);

            if owner.index() == k && self.onus[k].is_idle() {
                self.onus[k].dequeue_for_service(at)?;
                resumed_at = at;
            }
        }

        self.complete_services(k, &mut resumed_at, end)?;
        if !self.onus[k].is_idle() {
            // Paused mid-message: keep what was sent, resume next window.
            self.onus[k].credit_progress(horizon.forward_delta(resumed_at, end))?;
        }

        self.clock.advance_to(end);
        trace!(onu = k, start, end, queue = self.onus[k].queue_len(), "window closed");
        observer.on_window_end(OnuId(k as u32), end);
        Ok(())
    }

    /// Finish every message of ONU `k` that completes strictly before
    /// `bound`, starting the next queued message after each.
    fn complete_services(&mut self, k: usize, resumed_at: &mut f64, bound: f64) -> SimResult<()> {
        let horizon = self.clock.horizon();
        while let Some(remaining) = self.onus[k].remaining_service() {
            if remaining >= horizon.forward_delta(*resumed_at, bound) {
                break;
            }
            let service_end = horizon.wrap(*resumed_at + remaining);
            self.clock.advance_to(service_end);
            self.onus[k].end_message_send()?;
            self.onus[k].dequeue_for_service(service_end)?;
            *resumed_at = service_end;
        }
        Ok(())
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    fn summarize(&self, windows_used: &[f64], demand: &[f64], paths: Option<&[PathId]>) -> RoundSummary {
        let onus = self
            .onus
            .iter()
            .enumerate()
            .map(|(i, onu)| {
                let c = onu.counters();
                OnuRoundStats {
                    onu:            onu.id(),
                    offered_demand: c.offered_demand_this_round,
                    demand:         demand[i],
                    sent:           c.sent_this_round,
                    blocked:        c.blocked_this_round,
                    queue_depth:    onu.queue_len(),
                    window:         windows_used[i],
                    next_window:    self.windows[i],
                    path:           paths.map(|p| p[i]),
                }
            })
            .collect();

        RoundSummary {
            round: self.round,
            clock: self.clock.now(),
            onus,
        }
    }
}
