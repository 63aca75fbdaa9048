//! `pon-output` — run output writers for the pon-dba simulator.
//!
//! Two backends are provided:
//!
//! | Feature  | Backend | Files created                              |
//! |----------|---------|--------------------------------------------|
//! | *(none)* | CSV     | `round_summaries.csv`, `onu_rounds.csv`    |
//! | `sqlite` | SQLite  | `output.db`                                |
//!
//! Both implement [`OutputWriter`] and are driven by [`RunOutputObserver`],
//! which implements `pon_sim::OltObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pon_output::{CsvWriter, RunOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RunOutputObserver::new(writer);
//! olt.run_to_end(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RunOutputObserver;
pub use row::{OnuRoundRow, RoundRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
