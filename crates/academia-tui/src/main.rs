//! `academia-tui`: terminal browser for course enrollments.
//!
//! Built on [ratatui](https://ratatui.rs). At startup every store (courses,
//! faculties, academic years, enrollments) is fetched concurrently behind a
//! loading screen; the enrollment table is then filtered through two
//! searchable multi-select controls. The UI language can be switched at
//! runtime and is remembered in the config file.
//!
//! Logs go to a file so they never corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod i18n;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use academia_config::{Config, SourceKind};
use academia_core::{LoadOptions, StoreContext};

use crate::app::App;
use crate::i18n::Language;

/// Browse enrollments with filterable course and faculty selectors.
#[derive(Parser, Debug)]
#[command(name = "academia-tui", version, about)]
struct Cli {
    /// Backend base URL (e.g., http://localhost:8080). The environment
    /// equivalent is `ACADEMIA_SOURCE__API_URL`, read with the config file.
    #[arg(short = 'u', long, conflicts_with_all = ["data_dir", "demo"])]
    api_url: Option<String>,

    /// Load from `<store>.json` files in this directory
    #[arg(short = 'd', long, conflicts_with = "demo")]
    data_dir: Option<PathBuf>,

    /// Use the built-in sample catalog
    #[arg(long)]
    demo: bool,

    /// UI language (en, es, fr)
    #[arg(short, long)]
    language: Option<Language>,

    /// Config file (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command-line flags over the file and environment config.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(url) = &self.api_url {
            cfg.source.kind = SourceKind::Api;
            cfg.source.api_url = Some(url.clone());
        }
        if let Some(dir) = &self.data_dir {
            cfg.source.kind = SourceKind::Files;
            cfg.source.data_dir = Some(dir.clone());
        }
        if self.demo {
            cfg.source.kind = SourceKind::Demo;
        }
        if let Some(language) = self.language {
            cfg.language = language.to_string();
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        cfg
    }
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// TUI owns the terminal. Hold the returned guard until exit so logs flush.
fn setup_tracing(log_file: &Path, verbose: u8) -> Result<WorkerGuard> {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "academia_tui={log_level},academia_core={log_level},academia_api={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or(Path::new("."));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("academia-tui.log"));
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first so a failure below still restores the terminal.
    tui::install_hooks()?;

    let config_path = cli.config.clone().unwrap_or_else(academia_config::config_path);
    let effective = cli.apply(academia_config::load_config_from(&config_path)?);

    let log_file = effective
        .log_file
        .clone()
        .unwrap_or_else(academia_config::default_log_path);
    let _log_guard = setup_tracing(&log_file, cli.verbose)?;

    let spec = academia_config::resolve_source(&effective)?;
    let source = spec.build()?;
    let language = Language::from_code(&effective.language);
    let options = LoadOptions {
        timeout: effective.load_timeout(),
    };

    info!(
        source = ?spec,
        %language,
        config = %config_path.display(),
        "starting academia-tui"
    );

    let mut app = App::new(
        Arc::new(StoreContext::new()),
        source,
        options,
        language,
        Some(config_path),
    );
    app.run().await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flags_override_file_config() {
        let cli = Cli::parse_from(["academia-tui", "--data-dir", "/srv/data", "-l", "ES"]);
        let cfg = cli.apply(Config::default());
        assert_eq!(cfg.source.kind, SourceKind::Files);
        assert_eq!(cfg.source.data_dir, Some(PathBuf::from("/srv/data")));
        assert_eq!(cfg.language, "es");
    }

    #[test]
    fn no_flags_keep_file_config() {
        let cli = Cli::parse_from(["academia-tui"]);
        let mut file = Config::default();
        file.language = "fr".into();
        assert_eq!(cli.apply(file.clone()), file);
    }

    #[test]
    fn demo_flag_overrides_a_configured_backend() {
        let cli = Cli::try_parse_from(["academia-tui", "--demo"]).unwrap();
        let mut cfg = Config::default();
        cfg.source.kind = SourceKind::Api;
        cfg.source.api_url = Some("http://localhost:8080".into());

        assert_eq!(cli.apply(cfg).source.kind, SourceKind::Demo);
    }

    #[test]
    fn api_url_flag_is_not_read_from_the_environment() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "api_url")
            .unwrap();
        assert_eq!(arg.get_env(), None);
    }

    #[test]
    fn source_flags_conflict() {
        let err = Cli::try_parse_from(["academia-tui", "--demo", "--data-dir", "x"]);
        assert!(err.is_err());
    }
}
