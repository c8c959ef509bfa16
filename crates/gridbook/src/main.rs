// Gridbook entry point.
//
// Run sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the league snapshot
// 4. Run the analytics engine
// 5. Write the JSON report and, if configured, the career CSV

use std::path::Path;

use anyhow::Context;
use gridbook::config;
use gridbook::io;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("gridbook starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: snapshot={}, report={}",
        config.paths.snapshot, config.paths.report
    );

    // 3. Load the league snapshot
    let snapshot_path = Path::new(&config.paths.snapshot);
    let mut snapshot = io::load_snapshot(snapshot_path)
        .with_context(|| format!("failed to load snapshot {}", snapshot_path.display()))?;
    if snapshot.league_name.is_empty() {
        if let Some(name) = &config.league.name {
            snapshot.league_name = name.clone();
        }
    }
    info!(
        "Snapshot loaded: {} season(s), {} player(s)",
        snapshot.seasons.len(),
        snapshot.players.len()
    );

    // 4. Run the analytics engine
    let report = gridbook_core::run(&snapshot, &config.analytics)
        .context("analytics run produced no output")?;
    if report.skips.total() > 0 {
        warn!(
            "skipped input: {} missing week(s), {} malformed pairing(s), {} unresolvable game(s)",
            report.skips.missing_data,
            report.skips.malformed_pairings,
            report.skips.unresolvable_franchises
        );
    }

    // 5. Write outputs
    let generated_at = chrono::Utc::now();
    let report_path = Path::new(&config.paths.report);
    io::write_report(report_path, &report, generated_at)
        .with_context(|| format!("failed to write report {}", report_path.display()))?;
    info!("Report written to {}", report_path.display());

    if let Some(csv_path) = &config.paths.career_csv {
        let csv_path = Path::new(csv_path);
        io::write_careers(csv_path, &report.careers)
            .with_context(|| format!("failed to write career table {}", csv_path.display()))?;
        info!("Career table written to {}", csv_path.display());
    }

    println!(
        "{}: {} season(s), {} franchise(s) -> {}",
        report.league_name,
        report.seasons.len(),
        report.franchises.len(),
        report_path.display()
    );

    Ok(())
}

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "gridbook=info,gridbook_core=info,warn";

/// Send tracing output to `logs/gridbook.log`, appending across runs.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("gridbook.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}
