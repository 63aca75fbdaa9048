//! `pon-core` — foundational types for the `pon-dba` simulator.
//!
//! This crate is a dependency of every other `pon-*` crate.  It has no
//! `pon-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `OnuId`, `PathId`                                     |
//! | [`time`]        | `Horizon`, `SimClock`, `forward_delta`, `in_window`   |
//! | [`rng`]         | `OnuRng` (per-endpoint), `SimRng` (global)            |
//! | [`config`]      | `SimConfig`, `OnuConfig`                              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and ID types.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{OnuConfig, SimConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{OnuId, PathId};
pub use rng::{OnuRng, SimRng};
pub use time::{DEFAULT_HORIZON, Horizon, SimClock, forward_delta, in_window};
