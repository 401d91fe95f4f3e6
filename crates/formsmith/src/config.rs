// File: src/config.rs
// Purpose: Configuration parsing from formsmith.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `store.path`
pub const STORE_PATH_ENV: &str = "FORMSMITH_STORE";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where saved schemas live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding every saved schema (default: "forms.json")
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Pretty-print the store file
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Evaluation behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvaluationConfig {
    /// Refuse to evaluate schemas with structural issues
    /// (dangling or self-referencing parents, duplicate ids)
    #[serde(default)]
    pub strict_schema: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_store_path() -> PathBuf {
    PathBuf::from("forms.json")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            pretty: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a formsmith.toml file.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default().with_env_overrides());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default().with_env_overrides());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config.with_env_overrides())
    }

    /// Load configuration from the default path (./formsmith.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formsmith.toml")
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(path) = std::env::var_os(STORE_PATH_ENV).filter(|p| !p.is_empty()) {
            self.store.path = PathBuf::from(path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.path, PathBuf::from("forms.json"));
        assert!(config.store.pretty);
        assert!(!config.evaluation.strict_schema);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.store.path, PathBuf::from("forms.json"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [store]
            path = "data/schemas.json"

            [evaluation]
            strict_schema = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.store.path, PathBuf::from("data/schemas.json"));
        assert!(config.store.pretty);
        assert!(config.evaluation.strict_schema);
    }

    #[test]
    fn test_load_reports_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store\npath = 1").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert!(!config.evaluation.strict_schema);
    }
}
