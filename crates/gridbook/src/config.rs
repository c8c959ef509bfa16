// Configuration loading and validation (league.toml).

use gridbook_core::config::{EloConfig, PowerConfig, ReportConfig};
use gridbook_core::AnalyticsConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File name under `config/` (and `defaults/`).
pub const LEAGUE_FILE: &str = "league.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueSection,
    pub analytics: AnalyticsConfig,
    pub paths: PathsSection,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole of league.toml. Every engine
/// section falls back to its defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    #[serde(default)]
    league: LeagueSection,
    #[serde(default)]
    power: PowerConfig,
    #[serde(default)]
    elo: EloConfig,
    #[serde(default)]
    report: ReportConfig,
    paths: PathsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueSection {
    /// Fallback name when the snapshot carries none.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
    pub snapshot: String,
    pub report: String,
    #[serde(default)]
    pub career_csv: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/league.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    load_league_file(&base_dir.join("config").join(LEAGUE_FILE))
}

/// Parse and validate one league.toml.
pub fn load_league_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let file: LeagueFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = Config {
        league: file.league,
        analytics: AnalyticsConfig {
            power: file.power,
            elo: file.elo,
            report: file.report,
        },
        paths: file.paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/league.toml` to `config/league.toml` unless the latter
/// already exists. Returns the written path when a copy was made.
pub fn ensure_league_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}",
                    base_dir.display()
                ),
            });
        }
        return Ok(None);
    }

    let source = defaults_dir.join(LEAGUE_FILE);
    if !source.is_file() {
        return Ok(None);
    }
    let target = config_dir.join(LEAGUE_FILE);
    let copied = copy_if_missing(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;
    Ok(copied.then_some(target))
}

/// Copy `source` to `target` only if `target` does not exist yet.
fn copy_if_missing(source: &Path, target: &Path) -> std::io::Result<bool> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(dest) => dest,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e),
    };
    std::io::copy(&mut std::fs::File::open(source)?, &mut dest)?;
    Ok(true)
}

/// Platform config file, e.g. `~/.config/gridbook/league.toml`.
pub fn platform_config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "gridbook").map(|d| d.config_dir().join(LEAGUE_FILE))
}

/// Load config relative to the current working directory, copying defaults
/// first. A working directory with neither `config/` nor `defaults/` falls
/// back to the platform config file when one exists.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;

    if !cwd.join("config").exists() && !cwd.join("defaults").exists() {
        if let Some(path) = platform_config_file().filter(|p| p.is_file()) {
            info!("using platform config {}", path.display());
            return load_league_file(&path);
        }
    }

    if let Some(copied) = ensure_league_file(&cwd)? {
        info!("copied default config to {}", copied.display());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let w = &config.analytics.power.weights;
    let weight_fields: &[(&str, f64)] = &[
        ("power.weights.win_pct", w.win_pct),
        ("power.weights.points_for", w.points_for),
        ("power.weights.recent_form", w.recent_form),
        ("power.weights.schedule", w.schedule),
    ];
    for (name, val) in weight_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be >= 0, got {val}"),
            });
        }
    }
    if w.total() <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "power.weights".into(),
            message: "at least one weight must be > 0".into(),
        });
    }

    if config.analytics.power.recent_window == 0 {
        return Err(ConfigError::ValidationError {
            field: "power.recent_window".into(),
            message: "must be greater than 0".into(),
        });
    }

    let elo = &config.analytics.elo;
    let elo_fields: &[(&str, f64)] = &[
        ("elo.initial_rating", elo.initial_rating),
        ("elo.k_factor", elo.k_factor),
        ("elo.margin_divisor", elo.margin_divisor),
    ];
    for (name, val) in elo_fields {
        if !val.is_finite() || *val <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    let regression = elo.season_regression;
    if !(0.0..=1.0).contains(&regression) {
        return Err(ConfigError::ValidationError {
            field: "elo.season_regression".into(),
            message: format!("must be between 0.0 and 1.0 inclusive, got {regression}"),
        });
    }

    if config.paths.snapshot.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "paths.snapshot".into(),
            message: "must not be empty".into(),
        });
    }
    if config.paths.report.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "paths.report".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn crate_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// Fresh, empty directory under the system temp dir.
    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gridbook_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_config(base: &Path, toml: &str) {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(LEAGUE_FILE), toml).unwrap();
    }

    const MINIMAL: &str = r#"
[paths]
snapshot = "snap.json"
report = "out.json"
"#;

    #[test]
    fn defaults_file_loads() {
        let config = load_league_file(&crate_root().join("defaults").join(LEAGUE_FILE))
            .expect("shipped defaults should load");

        assert_eq!(config.league.name.as_deref(), Some("Gridbook League"));
        assert_eq!(config.analytics.power.recent_window, 3);
        assert!((config.analytics.power.weights.win_pct - 0.40).abs() < f64::EPSILON);
        assert!((config.analytics.elo.k_factor - 32.0).abs() < f64::EPSILON);
        assert!((config.analytics.elo.season_regression - 0.15).abs() < f64::EPSILON);
        assert_eq!(config.analytics.report.top_performers, 10);
        assert_eq!(config.paths.snapshot, "data/snapshot.json");
        assert_eq!(config.paths.career_csv.as_deref(), Some("output/careers.csv"));
    }

    #[test]
    fn omitted_sections_use_engine_defaults() {
        let tmp = temp_dir("config_minimal");
        write_config(&tmp, MINIMAL);

        let config = load_config_from(&tmp).unwrap();
        assert!(config.league.name.is_none());
        assert!(config.paths.career_csv.is_none());
        assert!((config.analytics.elo.initial_rating - 1500.0).abs() < f64::EPSILON);
        assert_eq!(config.analytics.report.bottom_performers, 3);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let tmp = temp_dir("config_partial");
        write_config(&tmp, &format!("[elo]\nk_factor = 24.0\n{MINIMAL}"));

        let config = load_config_from(&tmp).unwrap();
        assert!((config.analytics.elo.k_factor - 24.0).abs() < f64::EPSILON);
        assert!((config.analytics.elo.margin_divisor - 20.0).abs() < f64::EPSILON);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_reported() {
        let tmp = temp_dir("config_missing");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let tmp = temp_dir("config_malformed");
        write_config(&tmp, "[paths\nsnapshot = ");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let cases = [
            ("[power.weights]\nschedule = -0.1\n", "power.weights.schedule"),
            ("[power]\nrecent_window = 0\n", "power.recent_window"),
            ("[elo]\nk_factor = 0.0\n", "elo.k_factor"),
            ("[elo]\nmargin_divisor = -5.0\n", "elo.margin_divisor"),
            ("[elo]\nseason_regression = 1.5\n", "elo.season_regression"),
        ];
        for (i, (section, expected)) in cases.iter().enumerate() {
            let tmp = temp_dir(&format!("config_invalid_{i}"));
            write_config(&tmp, &format!("{section}{MINIMAL}"));
            match load_config_from(&tmp) {
                Err(ConfigError::ValidationError { field, .. }) => assert_eq!(&field, expected),
                other => panic!("expected validation error for {expected}, got {other:?}"),
            }
            let _ = fs::remove_dir_all(&tmp);
        }
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let tmp = temp_dir("config_zero_weights");
        write_config(
            &tmp,
            &format!(
                "[power.weights]\nwin_pct = 0.0\npoints_for = 0.0\nrecent_form = 0.0\nschedule = 0.0\n{MINIMAL}"
            ),
        );
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "power.weights"));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_copies_defaults_without_overwriting() {
        let tmp = temp_dir("config_ensure");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            crate_root().join("defaults").join(LEAGUE_FILE),
            tmp.join("defaults").join(LEAGUE_FILE),
        )
        .unwrap();
        fs::write(tmp.join("defaults").join("notes.toml"), "ignored = true").unwrap();

        let copied = ensure_league_file(&tmp).unwrap();
        assert_eq!(copied, Some(tmp.join("config").join(LEAGUE_FILE)));
        assert!(!tmp.join("config").join("notes.toml").exists());
        assert!(load_config_from(&tmp).is_ok());

        // A user-edited file survives a second run.
        write_config(&tmp, MINIMAL);
        assert_eq!(ensure_league_file(&tmp).unwrap(), None);
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.paths.snapshot, "snap.json");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn defaults_dir_without_league_file_copies_nothing() {
        let tmp = temp_dir("config_empty_defaults");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        assert_eq!(ensure_league_file(&tmp).unwrap(), None);
        assert!(matches!(load_config_from(&tmp), Err(ConfigError::FileNotFound { .. })));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn copy_if_missing_keeps_existing_target() {
        let tmp = temp_dir("config_copy_if_missing");
        let (source, target) = (tmp.join("a.toml"), tmp.join("nested").join("b.toml"));
        fs::write(&source, "first").unwrap();

        assert!(copy_if_missing(&source, &target).unwrap());
        fs::write(&source, "second").unwrap();
        assert!(!copy_if_missing(&source, &target).unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "first");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_without_defaults_or_config_fails() {
        let tmp = temp_dir("config_nothing");
        let err = ensure_league_file(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }
}
