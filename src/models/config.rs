//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{LookupRequest, QueryStyle};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "API_KEY";
/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "NUMINFO_BASE_URL";
/// Environment variable overriding `api.timeout_secs`.
pub const TIMEOUT_ENV: &str = "NUMINFO_TIMEOUT";

/// Allowed request timeout range, in seconds.
pub const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=30;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote lookup API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Display and export settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    ///
    /// A missing file is not worth a warning; the defaults are a working setup.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api.key = Some(key);
        }
        if let Some(url) = var(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(raw) = var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", TIMEOUT_ENV, raw),
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        url::Url::parse(&self.api.base_url)?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if !TIMEOUT_RANGE.contains(&self.api.timeout_secs) {
            return Err(AppError::validation(format!(
                "api.timeout_secs must be between {} and {}",
                TIMEOUT_RANGE.start(),
                TIMEOUT_RANGE.end()
            )));
        }
        if self.api.query_style == QueryStyle::KeyTerm {
            if self.api.key_param.trim().is_empty() {
                return Err(AppError::validation("api.key_param is empty"));
            }
            if self.api.term_param.trim().is_empty() {
                return Err(AppError::validation("api.term_param is empty"));
            }
        }
        Ok(())
    }

    /// Build the immutable request for one lookup of `term`.
    ///
    /// The API key is only required for live lookups whose query style sends one.
    pub fn request_for(&self, term: &str, mock: bool) -> Result<LookupRequest> {
        LookupRequest::check_term(term)?;

        let key_value = match self.api.query_style {
            QueryStyle::KeyTerm if mock => self.api.key.clone().unwrap_or_default(),
            QueryStyle::KeyTerm => self
                .api
                .key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    AppError::input(format!(
                        "Missing API key. Set the {} environment variable or api.key in the config file.",
                        API_KEY_ENV
                    ))
                })?,
            QueryStyle::Number => String::new(),
        };

        LookupRequest::new(
            term,
            &self.api.base_url,
            &self.api.key_param,
            key_value,
            &self.api.term_param,
            self.api.timeout_secs,
        )
        .map(|req| req.with_query_style(self.api.query_style))
    }
}

/// Remote lookup API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the GET request is sent to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Query parameter carrying the API key
    #[serde(default = "defaults::key_param")]
    pub key_param: String,

    /// Query parameter carrying the search term
    #[serde(default = "defaults::term_param")]
    pub term_param: String,

    /// API key (normally supplied through `API_KEY`)
    #[serde(default)]
    pub key: Option<String>,

    /// How the query string is shaped
    #[serde(default)]
    pub query_style: QueryStyle,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Treat non-2xx responses as transport failures
    #[serde(default)]
    pub error_for_status: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            key_param: defaults::key_param(),
            term_param: defaults::term_param(),
            key: None,
            query_style: QueryStyle::default(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
            error_for_status: false,
        }
    }
}

/// Display and export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Map response fields onto canonical names for the summary
    #[serde(default = "defaults::auto_map")]
    pub auto_map: bool,

    /// Directory CSV exports are written to
    #[serde(default = "defaults::export_dir")]
    pub export_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            auto_map: defaults::auto_map(),
            export_dir: defaults::export_dir(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://decryptkarnrwalebkl.wasmer.app/".into()
    }
    pub fn key_param() -> String {
        "key".into()
    }
    pub fn term_param() -> String {
        "term".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn user_agent() -> String {
        concat!("numinfo/", env!("CARGO_PKG_VERSION")).into()
    }

    // Output defaults
    pub fn auto_map() -> bool {
        true
    }
    pub fn export_dir() -> String {
        ".".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
