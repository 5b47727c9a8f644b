//! Provider configuration.
//!
//! The API key and tuning knobs are collected once at startup and passed into
//! the clients explicitly. Only [`PlacesConfig::from_env`] touches the process
//! environment; everything downstream receives an immutable value.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const BASE_URL_ENV: &str = "GOOGLE_MAPS_API_BASE_URL";
pub const PAGE_DELAY_ENV: &str = "NEARBY_PLACES_PAGE_DELAY_MS";
pub const DELAY_AFTER_LAST_PAGE_ENV: &str = "NEARBY_PLACES_DELAY_AFTER_LAST_PAGE";
pub const DETAIL_MODE_ENV: &str = "NEARBY_PLACES_DETAIL_MODE";
pub const HTTP_TIMEOUT_ENV: &str = "NEARBY_PLACES_HTTP_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Delay the provider needs before a freshly issued page token becomes valid.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

/// How a batch of detail fetches reacts to individual failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
    /// The first failing fetch fails the whole batch.
    #[default]
    Strict,
    /// Failures are collected per place and the batch still succeeds.
    Lenient,
}

impl DetailMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailMode::Strict => "strict",
            DetailMode::Lenient => "lenient",
        }
    }
}

impl fmt::Display for DetailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(DetailMode::Strict),
            "lenient" => Ok(DetailMode::Lenient),
            other => Err(Error::InvalidConfig {
                name: DETAIL_MODE_ENV.to_string(),
                reason: format!("expected 'strict' or 'lenient', got '{}'", other),
            }),
        }
    }
}

/// Pagination timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Wait applied after each page fetch.
    pub page_delay: Duration,
    /// Also wait after the page that carried no continuation token.
    pub delay_after_last_page: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_delay: DEFAULT_PAGE_DELAY,
            delay_after_last_page: true,
        }
    }
}

/// Everything needed to talk to the places provider.
#[derive(Clone)]
pub struct PlacesConfig {
    api_key: String,
    pub base_url: String,
    pub pagination: PaginationOptions,
    pub detail_mode: DetailMode,
    pub http_timeout: Option<Duration>,
}

impl PlacesConfig {
    /// Create a configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            pagination: PaginationOptions::default(),
            detail_mode: DetailMode::default(),
            http_timeout: None,
        })
    }

    /// Load configuration from the process environment.
    ///
    /// Fails with [`Error::MissingApiKey`] when `GOOGLE_API_KEY` is unset or
    /// blank, and with [`Error::InvalidConfig`] for unparseable optional values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).ok_or(Error::MissingApiKey)?;
        let mut config = Self::new(api_key)?;

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(raw) = lookup(PAGE_DELAY_ENV) {
            let millis = parse_number::<u64>(PAGE_DELAY_ENV, &raw)?;
            config.pagination.page_delay = Duration::from_millis(millis);
        }
        if let Some(raw) = lookup(DELAY_AFTER_LAST_PAGE_ENV) {
            config.pagination.delay_after_last_page = parse_bool(DELAY_AFTER_LAST_PAGE_ENV, &raw)?;
        }
        if let Some(raw) = lookup(DETAIL_MODE_ENV) {
            config.detail_mode = raw.parse()?;
        }
        if let Some(raw) = lookup(HTTP_TIMEOUT_ENV) {
            let secs = parse_number::<u64>(HTTP_TIMEOUT_ENV, &raw)?;
            config.http_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationOptions) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_detail_mode(mut self, detail_mode: DetailMode) -> Self {
        self.detail_mode = detail_mode;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("pagination", &self.pagination)
            .field("detail_mode", &self.detail_mode)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::InvalidConfig {
        name: name.to_string(),
        reason: format!("expected a non-negative integer, got '{}'", raw),
    })
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidConfig {
            name: name.to_string(),
            reason: format!("expected a boolean, got '{}'", raw),
        }),
    }
}
