//! Configuration for the academia terminal UI.
//!
//! A TOML file at the platform config dir, layered over defaults and under
//! `ACADEMIA_*` environment variables, and translated to the
//! `academia_core::SourceSpec` the loader reads from. The binary applies
//! its CLI flags on top before resolving.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use academia_core::SourceSpec;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// UI language code ("en", "es", "fr").
    #[serde(default = "default_language")]
    pub language: String,

    /// Where data is loaded from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Per-store fetch timeout during startup.
    #[serde(default = "default_load_timeout")]
    pub load_timeout_secs: u64,

    /// Log file; defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            source: SourceConfig::default(),
            load_timeout_secs: default_load_timeout(),
            log_file: None,
        }
    }
}

fn default_language() -> String {
    "en".into()
}
fn default_load_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in sample catalog.
    #[default]
    Demo,
    /// REST backend at `api_url`.
    Api,
    /// JSON files under `data_dir`.
    Files,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Backend base URL (e.g., "http://localhost:8080").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("edu", "academia", "academia")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(".academia").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default log file location.
pub fn default_log_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(".academia").join("academia.log"),
        |dirs| dirs.data_local_dir().join("academia.log"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (missing file means defaults) + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ACADEMIA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Set `language` in the file at `path`, leaving every other key as it was
/// on disk. Environment and command-line overrides never reach the file.
pub fn save_language_to(code: &str, path: &Path) -> Result<(), ConfigError> {
    let mut doc = match std::fs::read_to_string(path) {
        Ok(text) => text.parse::<toml::Table>()?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
        Err(e) => return Err(e.into()),
    };
    doc.insert("language".into(), toml::Value::String(code.into()));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(&doc)?)?;
    Ok(())
}

// ── Source resolution ───────────────────────────────────────────────

/// Translate the `[source]` section into a loader `SourceSpec`.
pub fn resolve_source(cfg: &Config) -> Result<SourceSpec, ConfigError> {
    match cfg.source.kind {
        SourceKind::Demo => Ok(SourceSpec::Demo),
        SourceKind::Api => {
            let raw = cfg
                .source
                .api_url
                .as_deref()
                .ok_or_else(|| ConfigError::Validation {
                    field: "source.api_url".into(),
                    reason: "required when source.kind = \"api\"".into(),
                })?;
            let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
                field: "source.api_url".into(),
                reason: format!("invalid URL: {raw}"),
            })?;
            Ok(SourceSpec::Api {
                url,
                timeout: cfg.load_timeout(),
            })
        }
        SourceKind::Files => {
            let dir = cfg
                .source
                .data_dir
                .clone()
                .ok_or_else(|| ConfigError::Validation {
                    field: "source.data_dir".into(),
                    reason: "required when source.kind = \"files\"".into(),
                })?;
            Ok(SourceSpec::Files(dir))
        }
    }
}

impl Config {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs.max(1))
    }
}
