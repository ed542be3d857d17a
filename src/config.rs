// Configuration for the commit view.
// Layers defaults, an optional config file, and environment overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{Result, ViewError};
use crate::report::ReportSource;

pub const ENV_REPORT_ROOT: &str = "COMMIT_VIEW_REPORT_ROOT";
pub const ENV_CAPACITY: &str = "COMMIT_VIEW_CAPACITY";
pub const ENV_TIMEOUT_SECS: &str = "COMMIT_VIEW_TIMEOUT_SECS";

const DEFAULT_REPORT_ROOT: &str = "reposense-report";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory or URL holding the generated report.
    pub report_root: String,
    /// Repositories whose heavy payload may stay resident.
    pub working_set_capacity: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_root: DEFAULT_REPORT_ROOT.to_string(),
            working_set_capacity: DEFAULT_CAPACITY,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Path to the user config file (~/.config/commit-view/config.json on Linux).
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "commit-view").map(|dirs| dirs.config_dir().join("config.json"))
}

impl Config {
    /// Load defaults, then the user config file if present, then the environment.
    ///
    /// Not validated here; callers apply their own overrides and then call `validate`.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_REPORT_ROOT) {
            self.report_root = root;
        }

        if let Some(capacity) = lookup(ENV_CAPACITY) {
            self.working_set_capacity = parse_number(ENV_CAPACITY, &capacity)?;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = parse_number(ENV_TIMEOUT_SECS, &timeout)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_root.trim().is_empty() {
            return Err(ViewError::Config("report root is empty".to_string()));
        }
        if self.working_set_capacity == 0 {
            return Err(ViewError::Config(
                "working set capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the transport for the configured report root.
    pub fn source(&self) -> Result<ReportSource> {
        ReportSource::for_root(&self.report_root, self.request_timeout())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ViewError::Config(format!("{} must be a number, got {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.report_root, "reposense-report");
        assert_eq!(config.working_set_capacity, 2);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"report_root": "https://host/report"}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.report_root, "https://host/report");
        assert_eq!(config.working_set_capacity, 2);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                (ENV_REPORT_ROOT, "/srv/report"),
                (ENV_CAPACITY, " 3 "),
                (ENV_TIMEOUT_SECS, "5"),
            ]))
            .unwrap();

        assert_eq!(config.report_root, "/srv/report");
        assert_eq!(config.working_set_capacity, 3);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_later_override_fixes_env_capacity() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_CAPACITY, "0")])).unwrap();
        assert!(config.validate().is_err());

        config.working_set_capacity = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_env_capacity() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[(ENV_CAPACITY, "two")])).unwrap_err();
        assert!(matches!(err, ViewError::Config(_)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = Config {
            working_set_capacity: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ViewError::Config(_))));
    }
}
