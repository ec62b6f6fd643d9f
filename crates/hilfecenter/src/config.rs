use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_STATE_FILE: &str = "steps-done.json";

/// Declarative run setup, the YAML analogue of the CLI flags.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub base: String,
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

pub fn read_run_config(path: &str) -> Result<RunConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read config {path}"))?;
    serde_yaml::from_str(&raw).context("invalid hilfecenter config")
}

/// Resolves where completion state lives: explicit override, then the
/// HILFECENTER_STATE environment variable, then the default file.
pub fn state_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var("HILFECENTER_STATE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE))
}

/// Resolves the sheet source: CLI flag first, then the HILFECENTER_SHEET
/// environment variable. No sheet configured means base content only.
pub fn sheet_source(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| env::var("HILFECENTER_SHEET").ok())
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_config_parses_with_optional_fields() {
        let cfg: RunConfig = serde_yaml::from_str(
            "base: data/hilfecenter.json\nsheet: https://example.de/sheet.csv\n",
        )
        .unwrap();
        assert_eq!(cfg.base, "data/hilfecenter.json");
        assert_eq!(cfg.sheet.as_deref(), Some("https://example.de/sheet.csv"));
        assert!(cfg.state.is_none());
    }

    #[test]
    fn run_config_requires_base() {
        let parsed: std::result::Result<RunConfig, _> =
            serde_yaml::from_str("sheet: https://example.de/sheet.csv\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn explicit_state_path_wins() {
        let path = state_path(Some(PathBuf::from("custom.json")));
        assert_eq!(path, PathBuf::from("custom.json"));
    }

    #[test]
    fn empty_sheet_value_means_none() {
        assert_eq!(sheet_source(Some("  ".to_string())), None);
    }
}
