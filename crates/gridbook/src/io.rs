// Snapshot loading and report writing (JSON report, CSV career table).

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use gridbook_core::history::career::CareerStats;
use gridbook_core::{LeagueReport, LeagueSnapshot};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to access file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

fn io_error(path: &Path, source: std::io::Error) -> SnapshotError {
    SnapshotError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Open `path` for writing, creating missing parent directories.
fn create_file(path: &Path) -> Result<File, SnapshotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(path, e))?;
    }
    File::create(path).map_err(|e| io_error(path, e))
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

fn load_snapshot_from_reader<R: Read>(rdr: R) -> Result<LeagueSnapshot, serde_json::Error> {
    serde_json::from_reader(rdr)
}

/// Load a league snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<LeagueSnapshot, SnapshotError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    load_snapshot_from_reader(BufReader::new(file)).map_err(|e| SnapshotError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The report as written to disk: the engine output stamped with the time
/// it was generated.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: &'a LeagueReport,
}

fn write_report_to_writer<W: Write>(
    wtr: W,
    report: &LeagueReport,
    generated_at: DateTime<Utc>,
) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(
        wtr,
        &ReportEnvelope {
            generated_at,
            report,
        },
    )
}

/// Write the report as pretty-printed JSON.
pub fn write_report(
    path: &Path,
    report: &LeagueReport,
    generated_at: DateTime<Utc>,
) -> Result<(), SnapshotError> {
    let mut wtr = BufWriter::new(create_file(path)?);
    write_report_to_writer(&mut wtr, report, generated_at).map_err(|e| SnapshotError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    wtr.flush().map_err(|e| io_error(path, e))
}

// ---------------------------------------------------------------------------
// Career table
// ---------------------------------------------------------------------------

/// One CSV row per franchise.
#[derive(Debug, Serialize)]
struct CareerRow<'a> {
    franchise: &'a str,
    name: &'a str,
    seasons: usize,
    wins: u32,
    losses: u32,
    ties: u32,
    win_pct: String,
    points_for: String,
    points_against: String,
    finals: u32,
    championships: u32,
    current_elo: Option<String>,
    peak_elo: Option<String>,
    best_win_streak: u32,
}

impl<'a> CareerRow<'a> {
    fn from_stats(c: &'a CareerStats) -> Self {
        let name = if c.team_name.is_empty() {
            &c.display_name
        } else {
            &c.team_name
        };
        CareerRow {
            franchise: &c.franchise,
            name,
            seasons: c.seasons_played,
            wins: c.wins,
            losses: c.losses,
            ties: c.ties,
            win_pct: format!("{:.3}", c.win_pct),
            points_for: format!("{:.2}", c.points_for),
            points_against: format!("{:.2}", c.points_against),
            finals: c.finals,
            championships: c.championships,
            current_elo: c.current_elo.map(|r| format!("{r:.1}")),
            peak_elo: c.peak_elo.map(|r| format!("{r:.1}")),
            best_win_streak: c.best_win_streak,
        }
    }
}

fn write_careers_to_writer<W: Write>(wtr: W, careers: &[CareerStats]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    for c in careers {
        writer.serialize(CareerRow::from_stats(c))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the career table as CSV with a header row.
pub fn write_careers(path: &Path, careers: &[CareerStats]) -> Result<(), SnapshotError> {
    let file = create_file(path)?;
    write_careers_to_writer(file, careers).map_err(|e| SnapshotError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use gridbook_core::AnalyticsConfig;

    const SNAPSHOT: &str = r#"{
        "league_name": "Reader League",
        "seasons": [{
            "season": 2024,
            "rosters": [
                { "roster_id": 1, "owner_id": "u1", "display_name": "One", "team_name": "Ones" },
                { "roster_id": 2, "owner_id": "u2", "display_name": "Two" }
            ],
            "weeks": { "1": [
                { "matchup_id": 1, "roster_id": 1, "points": 120.5 },
                { "matchup_id": 1, "roster_id": 2, "points": 99.0 }
            ] }
        }]
    }"#;

    fn report() -> LeagueReport {
        let snapshot = load_snapshot_from_reader(SNAPSHOT.as_bytes()).unwrap();
        gridbook_core::run(&snapshot, &AnalyticsConfig::default()).unwrap()
    }

    #[test]
    fn snapshot_from_reader() {
        let snapshot = load_snapshot_from_reader(SNAPSHOT.as_bytes()).unwrap();
        assert_eq!(snapshot.league_name, "Reader League");
        assert_eq!(snapshot.seasons[0].playoff_week_start, 15);
        assert_eq!(snapshot.seasons[0].weeks[&1].len(), 2);
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        assert!(load_snapshot_from_reader("{ \"seasons\": [ { } ] }".as_bytes()).is_err());
    }

    #[test]
    fn envelope_carries_timestamp_and_report() {
        let generated_at = Utc.with_ymd_and_hms(2024, 12, 1, 9, 30, 0).unwrap();
        let mut buf = Vec::new();
        write_report_to_writer(&mut buf, &report(), generated_at).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["generated_at"], "2024-12-01T09:30:00Z");
        assert_eq!(json["league_name"], "Reader League");
        assert_eq!(json["seasons"][0]["weeks"][0]["standings"][0]["power_rank"], 1);
    }

    #[test]
    fn career_csv_has_header_and_rows() {
        let mut buf = Vec::new();
        write_careers_to_writer(&mut buf, &report().careers).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("franchise,name,seasons,wins"));
        assert!(lines[1].starts_with("u1,Ones,1,"));
        assert!(lines[2].starts_with("u2,Two,1,"));
    }

    #[test]
    fn missing_snapshot_file_is_io_error() {
        let path = std::env::temp_dir().join("gridbook_no_such_snapshot.json");
        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
