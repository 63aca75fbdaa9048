//! `pon-onu` — network unit state for the pon-dba simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`arrival`]   | `ArrivalProcess`: self-scheduling exponential arrivals       |
//! | [`service`]   | `ServiceState`, `InService`, `QueuedMessage`                  |
//! | [`onu`]       | `Onu`: queue admission, service start/stop, counters         |
//! | [`builder`]   | `OnuSetBuilder`: validated, seeded endpoint construction     |
//! | [`error`]     | `OnuError`, `OnuResult<T>`                                    |
//!
//! # Message lifecycle
//!
//! 1. The arrival process fires at `peek_next_arrival()`.  The OLT calls
//!    [`Onu::enqueue_arrived_message`] (admit or block) and then
//!    [`Onu::tick`] to schedule the following arrival.
//! 2. While the ONU's window is open, the OLT calls
//!    [`Onu::dequeue_for_service`] to move the head of the queue into
//!    service.
//! 3. Service either finishes inside the window ([`Onu::end_message_send`])
//!    or is paused at window close ([`Onu::credit_progress`]) and resumed in
//!    a later window.

pub mod arrival;
pub mod builder;
pub mod error;
pub mod onu;
pub mod service;

#[cfg(test)]
mod tests;

pub use arrival::ArrivalProcess;
pub use builder::OnuSetBuilder;
pub use error::{OnuError, OnuResult};
pub use onu::{Admission, Onu, OnuCounters};
pub use service::{InService, QueuedMessage, ServiceState};
