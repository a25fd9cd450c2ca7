//! Client configuration.
//!
//! A single owned `ClientConfig` is built once at startup (from the
//! environment or defaults) and handed to `ApiClient::new`. There is no
//! ambient global: updating configuration at runtime means calling
//! `ApiClient::set_config`, which affects subsequent requests only.

use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Clinical Canvas";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "clinical_canvas=info".to_string()
}

/// Time-to-live per cached payload category. Zero disables the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub patient_detail: Duration,
    pub patient_list: Duration,
    pub notes: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            patient_detail: Duration::from_millis(120_000),
            patient_list: Duration::from_millis(300_000),
            notes: Duration::from_millis(60_000),
        }
    }
}

/// Request client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are resolved against.
    pub base_url: String,
    /// Per-attempt timeout. A timed-out attempt counts against the retry budget.
    pub timeout: Duration,
    /// Total attempts per logical request (1 = no retries).
    pub retry_attempts: u32,
    /// Base backoff delay; attempt N waits `retry_delay * N` before retrying.
    pub retry_delay: Duration,
    /// Serve built-in fixture records when the backend is unreachable.
    pub mock_fallback: bool,
    /// Emit per-request diagnostic log lines.
    pub logging_enabled: bool,
    /// Emit fire-and-forget error reports on the configured sink.
    pub error_reporting_enabled: bool,
    pub cache_ttls: CacheTtls,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_millis(30_000),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(1_000),
            mock_fallback: true,
            logging_enabled: true,
            error_reporting_enabled: false,
            cache_ttls: CacheTtls::default(),
        }
    }
}

impl ClientConfig {
    /// Build configuration from `CANVAS_*` environment variables.
    ///
    /// Missing or malformed values fall back to the field default with a
    /// warning, so a typo in deployment config degrades to defaults rather
    /// than aborting startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string("CANVAS_API_BASE_URL").unwrap_or(defaults.base_url),
            timeout: env_millis("CANVAS_TIMEOUT_MS").unwrap_or(defaults.timeout),
            retry_attempts: env_parse("CANVAS_RETRY_ATTEMPTS")
                .unwrap_or(defaults.retry_attempts),
            retry_delay: env_millis("CANVAS_RETRY_DELAY_MS").unwrap_or(defaults.retry_delay),
            mock_fallback: env_bool("CANVAS_MOCK_FALLBACK").unwrap_or(defaults.mock_fallback),
            logging_enabled: env_bool("CANVAS_LOGGING").unwrap_or(defaults.logging_enabled),
            error_reporting_enabled: env_bool("CANVAS_ERROR_REPORTING")
                .unwrap_or(defaults.error_reporting_enabled),
            cache_ttls: CacheTtls {
                patient_detail: env_millis("CANVAS_TTL_PATIENT_MS")
                    .unwrap_or(defaults.cache_ttls.patient_detail),
                patient_list: env_millis("CANVAS_TTL_PATIENT_LIST_MS")
                    .unwrap_or(defaults.cache_ttls.patient_list),
                notes: env_millis("CANVAS_TTL_NOTES_MS").unwrap_or(defaults.cache_ttls.notes),
            },
        }
    }

    /// Resolve an endpoint path against the base URL.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_string(key)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Unparseable env value, using default");
            None
        }
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    env_parse::<u64>(key).map(Duration::from_millis)
}

fn env_bool(key: &str) -> Option<bool> {
    let raw = env_string(key)?;
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(key, value = %raw, "Unparseable boolean env value, using default");
            None
        }
    }
}
