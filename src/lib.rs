//! Clinical Canvas data core.
//!
//! The layer between an unreliable backend and the canvas widgets:
//! - `client` — request client with timeouts, retries, and a uniform
//!   result envelope (never throws for ordinary network/HTTP failures)
//! - `transform` — raw payloads (or built-in fixtures) → canonical
//!   `ClinicalRecord`, with flagging, categorization, and urgency inference
//! - `hydrate` — record + layout node → the exact data each widget renders
//! - `store` — session layout state and sequence-guarded record reloads
//!
//! Rendering, drag/resize mechanics, and routing live outside this crate
//! and consume these types.

pub mod cache;
pub mod client;
pub mod config;
pub mod hydrate;
pub mod models;
pub mod store;
pub mod transform;

use tracing_subscriber::EnvFilter;

pub use client::{ApiClient, RequestFailure, RequestResult};
pub use config::ClientConfig;
pub use hydrate::{HydratedWidget, Projector, WidgetData};
pub use models::{ClinicalRecord, Patient, Role, WidgetKind};
pub use store::{CanvasSession, CanvasStore, LoadPhase};
pub use transform::{RecordError, RecordService};

/// Initialize tracing for the embedding app.
///
/// Honors `RUST_LOG` when set, otherwise uses the crate default filter.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::debug!("{} core v{}", config::APP_NAME, config::APP_VERSION);
}
