//! `pon-dba` — window planning for the pon-dba simulator.
//!
//! At every round boundary the OLT hands its planner the normalized offered
//! demand of each ONU and receives the window durations for the next round.
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`planner`]     | `WindowPlanner` trait, `FixedPlan`, `Assignment`           |
//! | [`config`]      | `AcoConfig` and the `arange_paths` helper                  |
//! | [`pheromone`]   | `PheromoneMatrix`: evaporation, reinforcement, floors     |
//! | [`aco`]         | `PheromoneOptimizer`: update + sample without replacement |
//! | [`error`]       | `DbaError`, `DbaResult<T>`                                 |
//!
//! # Reinforcement rule
//!
//! ```text
//! for each ONU e, path p:
//!     w[e][p] = w[e][p] * retention
//!             + learning_rate * weight_gain / (|time_paths[p] - demand[e]| + ε)
//!             + floor
//! ```
//!
//! Paths close to recent demand gain weight; all weights decay, and the
//! floor keeps every row strictly positive so sampling is always defined.

pub mod aco;
pub mod config;
pub mod error;
pub mod pheromone;
pub mod planner;


pub use aco::PheromoneOptimizer;
pub use config::{AcoConfig, arange_paths};
pub use error::{DbaError, DbaResult};
pub use pheromone::PheromoneMatrix;
pub use planner::{Assignment, FixedPlan, WindowPlanner};
