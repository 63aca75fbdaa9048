//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `round_summaries` and `onu_rounds`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OnuRoundRow, OutputResult, RoundRow};

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS round_summaries (
                 round   INTEGER PRIMARY KEY,
                 clock   REAL    NOT NULL,
                 sent    INTEGER NOT NULL,
                 blocked INTEGER NOT NULL,
                 demand  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS onu_rounds (
                 round          INTEGER NOT NULL,
                 onu            INTEGER NOT NULL,
                 offered_demand REAL    NOT NULL,
                 demand         REAL    NOT NULL,
                 sent           INTEGER NOT NULL,
                 blocked        INTEGER NOT NULL,
                 queue_depth    INTEGER NOT NULL,
                 window         REAL    NOT NULL,
                 next_window    REAL    NOT NULL,
                 path           INTEGER,
                 PRIMARY KEY (round, onu)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_round(&mut self, row: &RoundRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO round_summaries (round, clock, sent, blocked, demand) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.round as i64, row.clock, row.sent as i64, row.blocked as i64, row.demand],
        )?;
        Ok(())
    }

    fn write_onu_rows(&mut self, rows: &[OnuRoundRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO onu_rounds \
                 (round, onu, offered_demand, demand, sent, blocked, queue_depth, window, next_window, path) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.round as i64,
                    row.onu,
                    row.offered_demand,
                    row.demand,
                    row.sent as i64,
                    row.blocked as i64,
                    row.queue_depth as i64,
                    row.window,
                    row.next_window,
                    row.path,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
