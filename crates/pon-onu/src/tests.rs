//! Unit tests for pon-onu.

use pon_core::{Horizon, OnuConfig, OnuId, OnuRng};

use crate::{Admission, ArrivalProcess, Onu, OnuError, OnuSetBuilder, ServiceState};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn horizon() -> Horizon {
    Horizon::new(1_000_000.0).unwrap()
}

fn onu(capacity: usize) -> Onu {
    OnuSetBuilder::new(7, horizon())
        .onu(OnuConfig::new(1.0, 0.1, capacity))
        .build()
        .unwrap()
        .remove(0)
}

/// Deliver the pending arrival at its own time and schedule the next one.
fn deliver(onu: &mut Onu) -> (f64, Admission) {
    let len = onu.next_message_length();
    let at = onu.peek_next_arrival();
    let admission = onu.enqueue_arrived_message(at);
    onu.tick();
    (len, admission)
}

// ── ArrivalProcess ────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrival {
    use super::*;

    #[test]
    fn first_arrival_is_scheduled_on_construction() {
        let cfg = OnuConfig::new(5.0, 1.0, 4);
        let p = ArrivalProcess::new(&cfg, horizon(), OnuRng::new(1, OnuId(0)));
        assert!(p.peek_next_arrival() >= 0.0);
        assert!(p.next_message_length() >= 0.0);
    }

    #[test]
    fn tick_moves_arrival_forward() {
        let cfg = OnuConfig::new(5.0, 1.0, 4);
        let mut p = ArrivalProcess::new(&cfg, horizon(), OnuRng::new(1, OnuId(0)));
        for _ in 0..100 {
            let before = p.peek_next_arrival();
            p.tick();
            assert!(p.peek_next_arrival() >= before);
        }
    }

    #[test]
    fn arrivals_wrap_at_horizon() {
        let h = Horizon::new(50.0).unwrap();
        let cfg = OnuConfig::new(5.0, 1.0, 4);
        let mut p = ArrivalProcess::new(&cfg, h, OnuRng::new(3, OnuId(0)));
        for _ in 0..1_000 {
            p.tick();
            assert!((0.0..50.0).contains(&p.peek_next_arrival()));
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let cfg = OnuConfig::new(2.0, 0.5, 4);
        let mut a = ArrivalProcess::new(&cfg, horizon(), OnuRng::new(99, OnuId(2)));
        let mut b = ArrivalProcess::new(&cfg, horizon(), OnuRng::new(99, OnuId(2)));
        for _ in 0..50 {
            assert_eq!(a.peek_next_arrival(), b.peek_next_arrival());
            assert_eq!(a.next_message_length(), b.next_message_length());
            a.tick();
            b.tick();
        }
    }

    #[test]
    fn reschedule_wraps_and_keeps_length() {
        let h = Horizon::new(100.0).unwrap();
        let cfg = OnuConfig::new(5.0, 1.0, 4);
        let mut p = ArrivalProcess::new(&cfg, h, OnuRng::new(5, OnuId(0)));
        let len = p.next_message_length();

        p.reschedule(97.0);
        assert_eq!(p.peek_next_arrival(), 97.0);
        p.reschedule(102.0);
        assert!((p.peek_next_arrival() - 2.0).abs() < 1e-12);
        assert_eq!(p.next_message_length(), len);
        assert_eq!(p.mean_arrival_period(), 5.0);
        assert_eq!(p.mean_message_length(), 1.0);
    }

    #[test]
    fn onu_reschedule_reaches_its_process() {
        let mut o = onu(4);
        o.reschedule_arrival(42.0);
        assert_eq!(o.peek_next_arrival(), 42.0);
        assert_eq!(o.arrivals().peek_next_arrival(), 42.0);
        assert_eq!(o.arrivals().mean_arrival_period(), 1.0);
    }
}

// ── Queue admission ───────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    #[test]
    fn queue_never_exceeds_capacity() {
        let mut o = onu(3);
        for _ in 0..50 {
            deliver(&mut o);
            assert!(o.queue_len() <= o.capacity());
            o.check_invariants().unwrap();
        }
        assert_eq!(o.queue_len(), 3);
        assert_eq!(o.counters().blocked_total, 47);
    }

    #[test]
    fn blocked_arrival_leaves_queue_unchanged() {
        let mut o = onu(1);
        assert_eq!(deliver(&mut o).1, Admission::Queued);
        let before = o.queue_len();
        let blocked_before = o.counters().blocked_total;
        assert_eq!(deliver(&mut o).1, Admission::Blocked);
        assert_eq!(o.queue_len(), before);
        assert_eq!(o.counters().blocked_total, blocked_before + 1);
        assert_eq!(o.counters().blocked_this_round, 1);
    }

    #[test]
    fn zero_capacity_blocks_everything() {
        let mut o = onu(0);
        for _ in 0..5 {
            assert_eq!(deliver(&mut o).1, Admission::Blocked);
        }
        assert_eq!(o.counters().blocked_total, 5);
        assert_eq!(o.queue_len(), 0);
    }

    #[test]
    fn offered_demand_counts_blocked_messages() {
        let mut o = onu(2);
        let mut expected = 0.0;
        for _ in 0..10 {
            expected += deliver(&mut o).0;
        }
        assert!(o.counters().blocked_total > 0);
        assert!((o.offered_demand_this_round() - expected).abs() < 1e-12);
        assert_eq!(o.counters().arrivals_total, 10);
    }
}

// ── Service ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod service {
    use super::*;

    #[test]
    fn dequeue_empty_returns_none() {
        let mut o = onu(4);
        assert_eq!(o.dequeue_for_service(0.0).unwrap(), None);
        assert!(o.is_idle());
        assert_eq!(o.counters().sent_total, 0);
    }

    #[test]
    fn dequeue_starts_service_and_counts_sent() {
        let mut o = onu(4);
        let (len, _) = deliver(&mut o);
        let got = o.dequeue_for_service(o.peek_next_arrival()).unwrap();
        assert_eq!(got, Some(len));
        assert_eq!(o.counters().sent_total, 1);
        assert_eq!(o.counters().sent_this_round, 1);
        match o.service() {
            ServiceState::Sending(msg) => {
                assert_eq!(msg.length, len);
                assert_eq!(msg.progress, 0.0);
            }
            ServiceState::Idle => panic!("expected a message in service"),
        }
    }

    #[test]
    fn dequeue_refuses_to_overwrite() {
        let mut o = onu(4);
        deliver(&mut o);
        deliver(&mut o);
        o.dequeue_for_service(0.0).unwrap();
        assert!(matches!(o.dequeue_for_service(0.0), Err(OnuError::ServiceOverwrite(_))));
        assert_eq!(o.queue_len(), 1);
    }

    #[test]
    fn end_message_send_clears_service() {
        let mut o = onu(4);
        let (len, _) = deliver(&mut o);
        o.dequeue_for_service(0.0).unwrap();
        assert_eq!(o.end_message_send().unwrap(), len);
        assert!(o.is_idle());
        assert_eq!(o.counters().sent_total, 1);
        assert!(matches!(o.end_message_send(), Err(OnuError::NotSending(_))));
    }

    #[test]
    fn credit_progress_reduces_remaining() {
        let mut o = onu(4);
        let (len, _) = deliver(&mut o);
        o.dequeue_for_service(0.0).unwrap();
        o.credit_progress(len / 4.0).unwrap();
        let remaining = o.remaining_service().unwrap();
        assert!((remaining - 0.75 * len).abs() < 1e-12);
        // Over-crediting is clamped.
        o.credit_progress(10.0 * len).unwrap();
        assert_eq!(o.remaining_service(), Some(0.0));
    }

    #[test]
    fn credit_progress_when_idle_is_error() {
        let mut o = onu(4);
        assert!(o.credit_progress(1.0).is_err());
    }

    #[test]
    fn waiting_time_accumulates() {
        let mut o = onu(4);
        let at = o.peek_next_arrival();
        o.enqueue_arrived_message(at);
        o.tick();
        o.dequeue_for_service(at + 2.5).unwrap();
        assert!((o.counters().waited_total - 2.5).abs() < 1e-9);
        assert!((o.counters().mean_wait() - 2.5).abs() < 1e-9);
    }
}

// ── Counters ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod counters {
    use super::*;

    #[test]
    fn flush_resets_round_counters_only() {
        let mut o = onu(1);
        deliver(&mut o);
        deliver(&mut o);
        o.dequeue_for_service(0.0).unwrap();
        o.flush_round_counters();
        let c = o.counters();
        assert_eq!(c.sent_this_round, 0);
        assert_eq!(c.blocked_this_round, 0);
        assert_eq!(c.offered_demand_this_round, 0.0);
        assert_eq!(c.sent_total, 1);
        assert_eq!(c.blocked_total, 1);
    }

    #[test]
    fn blocking_ratio() {
        let mut o = onu(1);
        assert_eq!(o.counters().blocking_ratio(), 0.0);
        deliver(&mut o);
        deliver(&mut o);
        deliver(&mut o);
        o.dequeue_for_service(0.0).unwrap();
        // one sent, two blocked
        assert!((o.counters().blocking_ratio() - 2.0 / 3.0).abs() < 1e-12);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let onus = OnuSetBuilder::new(1, horizon())
            .repeat(OnuConfig::new(1.0, 0.1, 2), 3)
            .onus([OnuConfig::new(2.0, 0.2, 4)])
            .build()
            .unwrap();
        let ids: Vec<_> = onus.iter().map(|o| o.id()).collect();
        assert_eq!(ids, [OnuId(0), OnuId(1), OnuId(2), OnuId(3)]);
        assert_eq!(onus[3].capacity(), 4);
    }

    #[test]
    fn invalid_config_rejected() {
        let result = OnuSetBuilder::new(1, horizon())
            .onu(OnuConfig::new(-1.0, 0.1, 2))
            .build();
        assert!(matches!(result, Err(OnuError::Config(_))));
    }

    #[test]
    fn endpoints_get_independent_streams() {
        let onus = OnuSetBuilder::new(5, horizon())
            .repeat(OnuConfig::new(1.0, 0.1, 2), 2)
            .build()
            .unwrap();
        assert_ne!(onus[0].peek_next_arrival(), onus[1].peek_next_arrival());
    }
}
