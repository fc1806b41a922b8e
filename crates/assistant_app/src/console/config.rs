//! Application configuration, read from a RON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assistant_engine::SimulationSettings;
use engine_logging::LogSettings;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILENAME: &str = "assistant.ron";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationSettings,
    pub logging: LogSettings,
}

/// Loads the configuration.
///
/// An explicit path must exist. Without one, `./assistant.ron` is used when
/// present and the built-in defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => read(path),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if fallback.exists() {
                read(&fallback)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

fn read(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    parse(&content).with_context(|| format!("parsing config file {}", path.display()))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    Ok(ron::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assistant_engine::DelayRange;
    use engine_logging::LogDestination;
    use pretty_assertions::assert_eq;

    use super::{load, parse, AppConfig};

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse("(simulation: (tick_interval_ms: 250))").unwrap();
        assert_eq!(config.simulation.tick_interval_ms, 250);
        assert_eq!(config.simulation.reply_delay_ms, DelayRange::new(1500, 3500));
        assert_eq!(config.logging, AppConfig::default().logging);
    }

    #[test]
    fn full_config_round_trips_known_fields() {
        let config = parse(
            r#"(
                simulation: (
                    tick_interval_ms: 100,
                    reply_delay_ms: (min: 10, max: 20),
                    search_delay_ms: (min: 5, max: 5),
                ),
                logging: (level: "debug", destination: Both, file: "run.log"),
            )"#,
        )
        .unwrap();
        assert_eq!(config.simulation.search_delay_ms, DelayRange::new(5, 5));
        assert_eq!(config.logging.destination, LogDestination::Both);
        assert_eq!(config.logging.file.to_str(), Some("run.log"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(logging: (level: \"warn\"))").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.ron"))).unwrap_err();
        assert!(err.to_string().contains("absent.ron"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(simulation: oops").unwrap();

        let err = load(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("parsing config file"));
    }
}
