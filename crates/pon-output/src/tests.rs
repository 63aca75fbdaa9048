//! Integration tests for pon-output.

use pon_core::{OnuId, PathId};
use pon_sim::{OnuRoundStats, RoundSummary};

use crate::row::{OnuRoundRow, RoundRow};

fn stats(onu: u32, path: Option<u32>) -> OnuRoundStats {
    OnuRoundStats {
        onu:            OnuId(onu),
        offered_demand: 0.5 * (onu + 1) as f64,
        demand:         0.25 * (onu + 1) as f64,
        sent:           10 + onu as u64,
        blocked:        onu as u64,
        queue_depth:    2,
        window:         1.5,
        next_window:    0.75,
        path:           path.map(PathId),
    }
}

fn summary(round: u64) -> RoundSummary {
    RoundSummary {
        round,
        clock: 42.5,
        onus:  vec![stats(0, Some(3)), stats(1, Some(0))],
    }
}

#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn round_row_totals() {
        let row = RoundRow::from(&summary(7));
        assert_eq!(row.round, 7);
        assert_eq!(row.clock, 42.5);
        assert_eq!(row.sent, 21);
        assert_eq!(row.blocked, 1);
        assert!((row.demand - 0.75).abs() < 1e-12);
    }

    #[test]
    fn onu_row_copies_stats() {
        let row = OnuRoundRow::new(3, &stats(1, None));
        assert_eq!(row.round, 3);
        assert_eq!(row.onu, 1);
        assert_eq!(row.sent, 11);
        assert_eq!(row.queue_depth, 2);
        assert_eq!(row.path, None);
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{CsvWriter, ONU_HEADERS, ROUND_HEADERS};
    use crate::observer::RunOutputObserver;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_records(dir: &TempDir, name: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("round_summaries.csv").exists());
        assert!(dir.path().join("onu_rounds.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("round_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ROUND_HEADERS);

        let mut rdr = csv::Reader::from_path(dir.path().join("onu_rounds.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ONU_HEADERS);
    }

    #[test]
    fn csv_onu_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = [OnuRoundRow::new(0, &stats(0, Some(4))), OnuRoundRow::new(0, &stats(1, None))];
        w.write_onu_rows(&rows).unwrap();
        w.finish().unwrap();

        let records = read_records(&dir, "onu_rounds.csv");
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], "0"); // onu
        assert_eq!(&records[0][9], "4"); // path
        assert_eq!(&records[1][1], "1");
        assert_eq!(&records[1][9], "");  // fixed plan
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn observer_writes_each_round() {
        let dir = tmp();
        let mut obs = RunOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        for round in 0..3 {
            pon_sim::OltObserver::on_round_end(&mut obs, &summary(round));
        }
        pon_sim::OltObserver::on_sim_end(&mut obs, 3);
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rounds_written(), 3);

        let rounds = read_records(&dir, "round_summaries.csv");
        assert_eq!(rounds.len(), 3);
        assert_eq!(&rounds[2][0], "2");
        assert_eq!(&rounds[2][2], "21");
        assert_eq!(read_records(&dir, "onu_rounds.csv").len(), 6);
    }

    #[test]
    fn integration_csv() {
        use pon_core::{OnuConfig, SimConfig};
        use pon_dba::{AcoConfig, PheromoneOptimizer, arange_paths};
        use pon_sim::OltBuilder;

        let config = SimConfig {
            horizon:           1e6,
            seed:              1,
            rounds:            4,
            frames_per_round:  2,
            demand_normalizer: None,
        };
        let paths = arange_paths(1e-3, 2.0, 0.2);
        let optimizer = PheromoneOptimizer::new(AcoConfig::new(paths.clone(), 3)).unwrap();
        let mut olt = OltBuilder::new(config, optimizer, paths[..3].to_vec())
            .repeat(OnuConfig::new(0.5, 0.1, 16), 3)
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = RunOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        olt.run_to_end(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        assert_eq!(read_records(&dir, "round_summaries.csv").len(), 4);
        let onu_rows = read_records(&dir, "onu_rounds.csv");
        assert_eq!(onu_rows.len(), 4 * 3);
        assert!(onu_rows.iter().all(|r| !r[9].is_empty()));
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_row_counts() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        for round in 0..2 {
            let s = summary(round);
            w.write_round(&RoundRow::from(&s)).unwrap();
            let rows: Vec<_> = s.onus.iter().map(|st| OnuRoundRow::new(round, st)).collect();
            w.write_onu_rows(&rows).unwrap();
        }
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let rounds: i64 = conn
            .query_row("SELECT COUNT(*) FROM round_summaries", [], |r| r.get(0))
            .unwrap();
        let onus: i64 = conn
            .query_row("SELECT COUNT(*) FROM onu_rounds", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rounds, 2);
        assert_eq!(onus, 4);
    }

    #[test]
    fn sqlite_missing_path_is_null() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_onu_rows(&[OnuRoundRow::new(0, &stats(0, None))]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let path: Option<i64> = conn
            .query_row("SELECT path FROM onu_rounds WHERE onu = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(path, None);
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
