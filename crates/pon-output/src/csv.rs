//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `round_summaries.csv`
//! - `onu_rounds.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OnuRoundRow, OutputResult, RoundRow};

pub const ROUND_HEADERS: [&str; 5] = ["round", "clock", "sent", "blocked", "demand"];

pub const ONU_HEADERS: [&str; 10] = [
    "round",
    "onu",
    "offered_demand",
    "demand",
    "sent",
    "blocked",
    "queue_depth",
    "window",
    "next_window",
    "path",
];

/// Writes run output to two CSV files.
pub struct CsvWriter {
    rounds:   Writer<File>,
    onus:     Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut rounds = Writer::from_path(dir.join("round_summaries.csv"))?;
        rounds.write_record(ROUND_HEADERS)?;

        let mut onus = Writer::from_path(dir.join("onu_rounds.csv"))?;
        onus.write_record(ONU_HEADERS)?;

        Ok(Self {
            rounds,
            onus,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_round(&mut self, row: &RoundRow) -> OutputResult<()> {
        self.rounds.write_record(&[
            row.round.to_string(),
            row.clock.to_string(),
            row.sent.to_string(),
            row.blocked.to_string(),
            row.demand.to_string(),
        ])?;
        Ok(())
    }

    fn write_onu_rows(&mut self, rows: &[OnuRoundRow]) -> OutputResult<()> {
        for row in rows {
            self.onus.write_record(&[
                row.round.to_string(),
                row.onu.to_string(),
                row.offered_demand.to_string(),
                row.demand.to_string(),
                row.sent.to_string(),
                row.blocked.to_string(),
                row.queue_depth.to_string(),
                row.window.to_string(),
                row.next_window.to_string(),
                // Empty cell under a fixed plan.
                row.path.map(|p| p.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rounds.flush()?;
        self.onus.flush()?;
        Ok(())
    }
}
