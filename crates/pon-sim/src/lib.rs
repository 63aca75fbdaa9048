//! `pon-sim` — OLT window loop and round orchestrator for the pon-dba
//! simulator.
//!
//! # Round loop
//!
//! ```text
//! for round in 0..rounds:
//!   for frame in 0..frames_per_round:
//!     for k in ONUs (index order):          ← one window per ONU
//!       open window [clock, clock + windows[k])
//!       ① k idle & window non-empty → start its queue head
//!       ② while next arrival (any ONU) is inside the window:
//!            finish k's messages that end before it
//!            deliver arrival (enqueue or block), schedule the next one
//!            k idle & arrival is k's → start it
//!       ③ finish k's messages that end before the window closes,
//!          credit partial progress, clock = window end
//!   demand = offered demand / normalizer
//!   planner.plan(demand) → maybe new windows
//!   metrics, observer, flush round counters
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`replicate::run_replications`] on Rayon.         |
//! | `serde`    | Serde derives on `MetricsSnapshot` and `RoundSummary`. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pon_core::{OnuConfig, SimConfig};
//! use pon_dba::{AcoConfig, PheromoneOptimizer, arange_paths};
//! use pon_sim::{NoopObserver, OltBuilder};
//!
//! let paths = arange_paths(1e-3, 2.0, 0.2);
//! let optimizer = PheromoneOptimizer::new(AcoConfig::new(paths.clone(), 8))?;
//! let mut olt = OltBuilder::new(config, optimizer, paths[..8].to_vec())
//!     .repeat(OnuConfig::new(30.0, 0.12, 512), 8)
//!     .build()?;
//! olt.run_to_end(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod olt;
pub mod replicate;


pub use builder::OltBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{MetricsAggregator, MetricsSnapshot};
pub use observer::{NoopObserver, OltObserver, OnuRoundStats, RoundSummary};
pub use olt::Olt;
pub use replicate::run_replications;
