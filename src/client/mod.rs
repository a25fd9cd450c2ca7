//! Resilient request client for the Clinical Canvas backend.
//!
//! Every call resolves to a `RequestResult` envelope — the client never
//! throws for ordinary network or HTTP conditions. Failures are classified
//! and handled per taxonomy:
//! - network errors and timeouts: retried, then surfaced as a failure
//! - 5xx: retried with `retry_delay * attempt` backoff, then surfaced
//! - 4xx: surfaced immediately, never retried
//! - 2xx with an unparseable body: surfaced immediately (a retry cannot fix it)

pub mod endpoints;
pub mod transport;
pub mod types;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::mpsc::UnboundedSender;

use crate::cache::TtlCache;
use crate::config::ClientConfig;
use crate::models::{Patient, SoapNote};

pub use transport::{Method, MockTransport, ReqwestTransport, Transport, TransportError,
    TransportRequest, TransportResponse};
pub use types::{AskRequest, AskResponsePayload, ClinicalEntryPayload, DocumentPayload,
    ErrorReport, PatientDetailPayload, QaPairPayload, RequestFailure, RequestResult};

/// Read-through caches for the payload categories §6 gives TTLs for.
pub(crate) struct PayloadCaches {
    pub patient_list: TtlCache<String, Vec<Patient>>,
    pub patient_detail: TtlCache<String, PatientDetailPayload>,
    pub notes: TtlCache<String, Vec<SoapNote>>,
}

impl PayloadCaches {
    fn new() -> Self {
        Self {
            patient_list: TtlCache::new(),
            patient_detail: TtlCache::new(),
            notes: TtlCache::new(),
        }
    }
}

/// Request client with bounded latency and bounded retries.
///
/// Cheap to share: wrap in `Arc` and clone the handle. Configuration is a
/// single owned value behind an `RwLock`; each request captures it at
/// dispatch, so `set_config` affects subsequent calls only.
pub struct ApiClient {
    config: RwLock<ClientConfig>,
    transport: Arc<dyn Transport>,
    error_tx: RwLock<Option<UnboundedSender<ErrorReport>>>,
    pub(crate) caches: PayloadCaches,
}

impl ApiClient {
    /// Production client over `reqwest`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Client over an explicit transport (tests use `MockTransport`).
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: RwLock::new(config),
            transport,
            error_tx: RwLock::new(None),
            caches: PayloadCaches::new(),
        }
    }

    /// Wire up the fire-and-forget error report sink.
    pub fn with_error_sink(self, tx: UnboundedSender<ErrorReport>) -> Self {
        if let Ok(mut slot) = self.error_tx.write() {
            *slot = Some(tx);
        }
        self
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> ClientConfig {
        self.config
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Replace the configuration. In-flight requests keep the values they
    /// captured at dispatch; cached payloads keep their original expiry.
    pub fn set_config(&self, config: ClientConfig) {
        if let Ok(mut current) = self.config.write() {
            *current = config;
        }
    }

    /// GET an endpoint and parse the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> RequestResult<T> {
        self.request_json(Method::Get, endpoint, None).await
    }

    /// POST a JSON body to an endpoint and parse the JSON response.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> RequestResult<T> {
        self.request_json(Method::Post, endpoint, Some(body)).await
    }

    /// Perform a request with per-attempt timeout and bounded retries.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> RequestResult<T> {
        // Capture the configuration once; a concurrent set_config must not
        // change the retry budget of a request already in flight.
        let config = self.config();
        let url = config.endpoint_url(endpoint);
        let attempts = config.retry_attempts.max(1);
        let mut last_failure = RequestFailure::network("request not attempted".into());

        for attempt in 1..=attempts {
            let request = TransportRequest {
                method,
                url: url.clone(),
                body: body.clone(),
                timeout: config.timeout,
            };

            match self.transport.execute(request).await {
                Ok(response) if response.is_success() => {
                    if config.logging_enabled {
                        tracing::debug!(%method, endpoint, attempt, status = response.status,
                            "Request succeeded");
                    }
                    match serde_json::from_str::<T>(&response.body) {
                        Ok(data) => return RequestResult::ok(data),
                        Err(e) => {
                            // Same bytes would fail again; don't burn retries.
                            let failure = RequestFailure::from_status(
                                response.status,
                                &response.status_text,
                                format!("Failed to parse response body: {e}"),
                            );
                            return self.finish_failure(&config, endpoint, failure);
                        }
                    }
                }
                Ok(response) if response.is_client_error() => {
                    let failure = RequestFailure::from_status(
                        response.status,
                        &response.status_text,
                        failure_message(&response),
                    );
                    return self.finish_failure(&config, endpoint, failure);
                }
                Ok(response) => {
                    last_failure = RequestFailure::from_status(
                        response.status,
                        &response.status_text,
                        failure_message(&response),
                    );
                    if config.logging_enabled {
                        tracing::debug!(%method, endpoint, attempt, status = response.status,
                            "Server error, will retry if budget remains");
                    }
                }
                Err(error) => {
                    last_failure = RequestFailure::network(error.to_string());
                    if config.logging_enabled {
                        tracing::debug!(%method, endpoint, attempt, error = %error,
                            "Transport error, will retry if budget remains");
                    }
                }
            }

            if attempt < attempts {
                tokio::time::sleep(backoff_delay(config.retry_delay, attempt)).await;
            }
        }

        self.finish_failure(&config, endpoint, last_failure)
    }

    /// Lightweight liveness probe: single GET, no retry noise, any failure
    /// reduces to `false`.
    pub async fn health_check(&self) -> bool {
        let config = self.config();
        let request = TransportRequest {
            method: Method::Get,
            url: config.endpoint_url("health"),
            body: None,
            timeout: config.timeout,
        };
        matches!(self.transport.execute(request).await, Ok(response) if response.is_success())
    }

    fn finish_failure<T>(
        &self,
        config: &ClientConfig,
        endpoint: &str,
        failure: RequestFailure,
    ) -> RequestResult<T> {
        if config.logging_enabled {
            tracing::warn!(endpoint, error = %failure, "Request failed");
        }
        if config.error_reporting_enabled {
            if let Ok(slot) = self.error_tx.read() {
                if let Some(tx) = slot.as_ref() {
                    // Fire-and-forget: a closed sink must never affect the caller.
                    let _ = tx.send(ErrorReport {
                        endpoint: endpoint.to_string(),
                        failure: failure.clone(),
                    });
                }
            }
        }
        RequestResult::err(failure)
    }
}

/// Backoff before retrying: `base * attempt`, so waits grow linearly with
/// each failed attempt (1s, 2s, 3s at the default base).
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * attempt
}

fn failure_message(response: &TransportResponse) -> String {
    // FastAPI-style errors carry {"detail": "..."}; prefer that over raw body.
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&response.body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    let trimmed = response.body.trim();
    if trimmed.is_empty() {
        format!("HTTP {} {}", response.status, response.status_text)
    } else {
        trimmed.to_string()
    }
}
