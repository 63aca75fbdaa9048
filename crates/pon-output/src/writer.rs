//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OnuRoundRow, OutputResult, RoundRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to the observer, which keeps the first one for
/// [`RunOutputObserver::take_error`][crate::RunOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one round summary row.
    fn write_round(&mut self, row: &RoundRow) -> OutputResult<()>;

    /// Write the per-ONU rows of one round.
    fn write_onu_rows(&mut self, rows: &[OnuRoundRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
