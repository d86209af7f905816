use std::{collections::HashMap, fs};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const SETTINGS_FILE: &str = "identity_web.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub api_base_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl ClientSettings {
    /// Applies an explicit override, e.g. from a command-line flag.
    pub fn with_api_base_url(mut self, api_base_url: Option<String>) -> Self {
        if let Some(v) = api_base_url {
            self.api_base_url = v;
        }
        self
    }
}

/// Reads `identity_web.toml` from the working directory and the process
/// environment.
pub fn load_settings() -> ClientSettings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    settings_from_sources(file.as_deref(), |name| std::env::var(name).ok())
}

/// Layers file values and then environment values over the defaults.
/// Later sources win; empty values are ignored.
pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url").filter(|v| !v.trim().is_empty()) {
                    settings.api_base_url = v.clone();
                }
            }
            Err(err) => warn!("ignoring unreadable {SETTINGS_FILE}: {err}"),
        }
    }

    for name in ["IDENTITY_API_BASE_URL", "APP__API_BASE_URL"] {
        if let Some(v) = env(name).filter(|v| !v.trim().is_empty()) {
            settings.api_base_url = v;
        }
    }

    settings
}

/// Validates a backend base URL and strips the trailing slash so paths can be
/// appended directly.
pub fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|err| ClientError::Config(format!("api base url '{trimmed}': {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::Config(format!(
            "api base url must start with http:// or https://, got '{trimmed}'"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
