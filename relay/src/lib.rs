//! Relay server distributing agent events to live companion clients.
//!
//! An external agent POSTs authenticated events to `/agent/ingest`;
//! every viewing client holds a long-lived SSE subscription on
//! `/agent/stream`. The bus in between is a process-wide singleton so
//! hot reloads never orphan live subscribers.

pub mod bus;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod stream;

pub use bus::{EventBus, SubscriberId, global_bus};
pub use config::RelayConfig;

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub bus: &'static EventBus,
    pub connections: Arc<AtomicUsize>,
}

impl AppState {
    /// State wired to the process-wide bus.
    pub fn new(config: RelayConfig) -> Self {
        Self::with_bus(config, global_bus())
    }

    /// State over an explicit bus instance. Tests use this with
    /// isolated, leaked buses instead of the global one.
    pub fn with_bus(config: RelayConfig, bus: &'static EventBus) -> Self {
        Self {
            config: Arc::new(config),
            bus,
            connections: Arc::new(AtomicUsize::new(0)),
        }
    }
}

pub async fn index() -> &'static str {
    "lux relay is running. POST agent events to /agent/ingest; subscribe to /agent/stream."
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/agent/ingest", post(ingest::ingest))
        .route("/agent/stream", get(stream::stream))
        .with_state(state)
}
