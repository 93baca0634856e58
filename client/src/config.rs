//! Client configuration loaded via OrthoConfig.
//!
//! Values come from defaults, an optional configuration file and `KANBAN_*`
//! environment variables, in increasing order of precedence.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATE_DIR: &str = ".kanban";

/// Settings for the REST adapter and the state snapshot.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KANBAN")]
pub struct ClientSettings {
    /// Root URL of the project server.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Directory holding the persisted state snapshot.
    pub state_dir: Option<PathBuf>,
}

impl ClientSettings {
    /// Configured server URL, falling back to a local development server.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not a URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Configured request timeout; zero is raised to one second.
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }

    /// Configured state directory, falling back to `.kanban`.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
    }
}
