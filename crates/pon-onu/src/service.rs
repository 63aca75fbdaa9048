//! Queued and in-service message state.

/// A message waiting in an ONU's queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedMessage {
    /// Service time the message needs.
    pub length:     f64,
    /// Wrapped time at which the message arrived.
    pub arrived_at: f64,
}

/// A message that has started service.
///
/// `progress` only grows when the owning window closes before the message
/// finishes; the remainder is served the next time the window opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InService {
    pub length:     f64,
    pub progress:   f64,
    pub arrived_at: f64,
}

impl InService {
    /// Service time still owed, never negative.
    #[inline]
    pub fn remaining(&self) -> f64 {
        (self.length - self.progress).max(0.0)
    }
}

/// Whether an ONU is transmitting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ServiceState {
    #[default]
    Idle,
    Sending(InService),
}

impl ServiceState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, ServiceState::Idle)
    }

    /// Remaining service time of the message in flight, if any.
    #[inline]
    pub fn remaining(&self) -> Option<f64> {
        match self {
            ServiceState::Idle         => None,
            ServiceState::Sending(msg) => Some(msg.remaining()),
        }
    }
}
