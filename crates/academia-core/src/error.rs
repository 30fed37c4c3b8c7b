// ── Core error types ──
//
// Errors a data source can report. The `From<academia_api::Error>` impl
// translates transport-layer errors; consumers never see reqwest types.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Source errors ────────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Backend error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed data in {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Loading {store} timed out after {timeout_secs}s")]
    Timeout { store: String, timeout_secs: u64 },

    #[error("Simulated failure loading {store}")]
    Injected { store: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<academia_api::Error> for CoreError {
    fn from(err: academia_api::Error) -> Self {
        match err {
            academia_api::Error::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                CoreError::Unreachable {
                    url: e
                        .url()
                        .map_or_else(|| "<unknown>".into(), ToString::to_string),
                    reason: e.to_string(),
                }
            }
            academia_api::Error::Transport(e) => CoreError::Api {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            academia_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            academia_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            academia_api::Error::Deserialization { message, body: _ } => CoreError::Parse {
                origin: "backend response".into(),
                message,
            },
        }
    }
}
