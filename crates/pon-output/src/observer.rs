//! `RunOutputObserver<W>` — bridges `OltObserver` to an `OutputWriter`.

use pon_sim::{OltObserver, RoundSummary};

use crate::row::{OnuRoundRow, RoundRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`OltObserver`] that writes one summary row plus one row per ONU at
/// the end of every round, and finishes the writer when the run ends.
///
/// Errors from the writer are stored internally because `OltObserver`
/// methods have no return value.  After `olt.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct RunOutputObserver<W: OutputWriter> {
    writer:     W,
    rounds:     u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RunOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rounds:     0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rounds written so far.
    pub fn rounds_written(&self) -> u64 {
        self.rounds
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> OltObserver for RunOutputObserver<W> {
    fn on_round_end(&mut self, summary: &RoundSummary) {
        let result = self.writer.write_round(&RoundRow::from(summary));
        self.store_err(result);

        let rows: Vec<OnuRoundRow> = summary
            .onus
            .iter()
            .map(|stats| OnuRoundRow::new(summary.round, stats))
            .collect();
        let result = self.writer.write_onu_rows(&rows);
        self.store_err(result);

        self.rounds += 1;
    }

    fn on_sim_end(&mut self, _rounds: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
