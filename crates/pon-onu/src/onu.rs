//! The `Onu` network unit.

use std::collections::VecDeque;

use pon_core::{Horizon, OnuConfig, OnuId};

use crate::{ArrivalProcess, InService, OnuError, OnuResult, QueuedMessage, ServiceState};

// ── Counters ──────────────────────────────────────────────────────────────────

/// Cumulative and per-round counters for one ONU.
///
/// The `*_this_round` fields and `offered_demand_this_round` are reset by
/// [`Onu::flush_round_counters`]; everything else only grows.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnuCounters {
    /// Messages that entered service.
    pub sent_total:                u64,
    /// Messages rejected because the queue was full.
    pub blocked_total:             u64,
    pub sent_this_round:           u64,
    pub blocked_this_round:        u64,
    /// Sum of arrived message lengths this round, admitted or blocked.
    pub offered_demand_this_round: f64,
    /// Every arrival ever delivered, admitted or blocked.
    pub arrivals_total:            u64,
    /// Sum over served messages of the time spent queued before service.
    pub waited_total:              f64,
}

impl OnuCounters {
    /// Lifetime fraction of arrivals that were blocked; `0.0` before any.
    pub fn blocking_ratio(&self) -> f64 {
        let seen = self.blocked_total + self.sent_total;
        if seen == 0 {
            0.0
        } else {
            self.blocked_total as f64 / seen as f64
        }
    }

    /// Mean queueing delay of served messages; `0.0` before any.
    pub fn mean_wait(&self) -> f64 {
        if self.sent_total == 0 {
            0.0
        } else {
            self.waited_total / self.sent_total as f64
        }
    }
}

/// Outcome of delivering an arrival to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Queued,
    Blocked,
}

// ── Onu ───────────────────────────────────────────────────────────────────────

/// A traffic-generating network unit.
///
/// Owns its arrival process, a bounded FIFO of pending messages, the message
/// currently in service, and its counters.  Only the OLT mutates it.
pub struct Onu {
    id:       OnuId,
    capacity: usize,
    horizon:  Horizon,
    arrivals: ArrivalProcess,
    queue:    VecDeque<QueuedMessage>,
    service:  ServiceState,
    counters: OnuCounters,
}

impl Onu {
    /// Build an ONU whose first arrival is already scheduled.
    ///
    /// Prefer [`OnuSetBuilder`][crate::OnuSetBuilder], which validates the
    /// config and seeds the arrival stream.
    pub fn new(id: OnuId, config: &OnuConfig, horizon: Horizon, arrivals: ArrivalProcess) -> Self {
        Self {
            id,
            capacity: config.queue_capacity,
            horizon,
            arrivals,
            queue:    VecDeque::with_capacity(config.queue_capacity.min(4_096)),
            service:  ServiceState::Idle,
            counters: OnuCounters::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> OnuId {
        self.id
    }

    // ── Arrival process ───────────────────────────────────────────────────

    /// Schedule the next arrival.  Call exactly once after each delivered
    /// arrival.
    #[inline]
    pub fn tick(&mut self) {
        self.arrivals.tick();
    }

    #[inline]
    pub fn peek_next_arrival(&self) -> f64 {
        self.arrivals.peek_next_arrival()
    }

    #[inline]
    pub fn next_message_length(&self) -> f64 {
        self.arrivals.next_message_length()
    }

    pub fn arrivals(&self) -> &ArrivalProcess {
        &self.arrivals
    }

    /// Move the pending arrival to `at`.  See [`ArrivalProcess::reschedule`].
    pub fn reschedule_arrival(&mut self, at: f64) {
        self.arrivals.reschedule(at);
    }

    // ── Queue ─────────────────────────────────────────────────────────────

    /// Deliver the pending arrival at time `now`.
    ///
    /// Its length counts toward offered demand whether or not it is
    /// admitted.  A full queue blocks it.
    pub fn enqueue_arrived_message(&mut self, now: f64) -> Admission {
        let length = self.arrivals.next_message_length();
        self.counters.offered_demand_this_round += length;
        self.counters.arrivals_total += 1;

        if self.queue.len() >= self.capacity {
            self.counters.blocked_total += 1;
            self.counters.blocked_this_round += 1;
            return Admission::Blocked;
        }
        self.queue.push_back(QueuedMessage { length, arrived_at: now });
        Admission::Queued
    }

    /// Move the head of the queue into service at time `now`.
    ///
    /// Returns the message length, or `None` if the queue is empty.  Fails if
    /// a message is already in service.
    pub fn dequeue_for_service(&mut self, now: f64) -> OnuResult<Option<f64>> {
        if !self.service.is_idle() {
            return Err(OnuError::ServiceOverwrite(self.id));
        }
        let Some(msg) = self.queue.pop_front() else {
            return Ok(None);
        };
        self.counters.sent_total += 1;
        self.counters.sent_this_round += 1;
        self.counters.waited_total += self.horizon.forward_delta(msg.arrived_at, now);
        self.service = ServiceState::Sending(InService {
            length:     msg.length,
            progress:   0.0,
            arrived_at: msg.arrived_at,
        });
        Ok(Some(msg.length))
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // ── Service ───────────────────────────────────────────────────────────

    #[inline]
    pub fn service(&self) -> &ServiceState {
        &self.service
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.service.is_idle()
    }

    /// Remaining service time of the in-flight message.
    #[inline]
    pub fn remaining_service(&self) -> Option<f64> {
        self.service.remaining()
    }

    /// Finish the in-flight message and return its length.
    ///
    /// Sent counters were already recorded by `dequeue_for_service`.
    pub fn end_message_send(&mut self) -> OnuResult<f64> {
        match std::mem::take(&mut self.service) {
            ServiceState::Sending(msg) => Ok(msg.length),
            ServiceState::Idle         => Err(OnuError::NotSending(self.id)),
        }
    }

    /// Record `elapsed` units of service on a message paused at window close.
    pub fn credit_progress(&mut self, elapsed: f64) -> OnuResult<()> {
        match &mut self.service {
            ServiceState::Sending(msg) => {
                msg.progress = (msg.progress + elapsed).min(msg.length);
                Ok(())
            }
            ServiceState::Idle => Err(OnuError::NotSending(self.id)),
        }
    }

    // ── Counters ──────────────────────────────────────────────────────────

    #[inline]
    pub fn counters(&self) -> &OnuCounters {
        &self.counters
    }

    #[inline]
    pub fn offered_demand_this_round(&self) -> f64 {
        self.counters.offered_demand_this_round
    }

    /// Reset the per-round counters.  Called once per round by the OLT after
    /// the planner and metrics have consumed them.
    pub fn flush_round_counters(&mut self) {
        self.counters.offered_demand_this_round = 0.0;
        self.counters.blocked_this_round = 0;
        self.counters.sent_this_round = 0;
    }

    /// Verify the queue bound.
    pub fn check_invariants(&self) -> OnuResult<()> {
        if self.queue.len() > self.capacity {
            return Err(OnuError::QueueOverflow {
                onu:      self.id,
                len:      self.queue.len(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
