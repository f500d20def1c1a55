use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use companion::now_ms;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::AppState;
use crate::bus::{EventBus, SubscriberId};

/// Interval of `: ping` comment frames keeping intermediary proxies
/// from closing an idle stream.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);

/// Framing marker sent before any domain event, so clients can tell
/// "transport up" apart from "first event received".
#[derive(Debug, Serialize)]
struct ConnectedFrame {
    #[serde(rename = "type")]
    kind: &'static str,
    timestamp: i64,
}

/// Unsubscribes and settles the connection gauge when the response
/// stream is dropped — whether the client closed or a write failed.
/// The heartbeat dies with the same drop, so neither can leak.
struct StreamGuard {
    id: SubscriberId,
    bus: &'static EventBus,
    connections: Arc<AtomicUsize>,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
        self.connections.fetch_sub(1, Ordering::SeqCst);
        info!("stream subscriber disconnected");
    }
}

/// `GET /agent/stream` — long-lived SSE fan-out of the bus.
///
/// Frames are forwarded in bus order, best-effort: one that cannot be
/// written is dropped for this subscriber only, never retried or
/// buffered.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, rx) = state.bus.subscribe();
    state.connections.fetch_add(1, Ordering::SeqCst);
    info!(total = state.connections.load(Ordering::SeqCst), "stream subscriber connected");

    let guard = StreamGuard {
        id,
        bus: state.bus,
        connections: state.connections.clone(),
    };

    let hello = serde_json::to_string(&ConnectedFrame {
        kind: "connected",
        timestamp: now_ms(),
    })
    .unwrap();
    let first = tokio_stream::once(Ok(Event::default().data(hello)));

    let events = UnboundedReceiverStream::new(rx).filter_map(move |event| {
        let _teardown = &guard;
        serde_json::to_string(&event)
            .ok()
            .map(|json| Ok(Event::default().data(json)))
    });

    Sse::new(first.chain(events))
        .keep_alive(KeepAlive::new().interval(HEARTBEAT_INTERVAL).text("ping"))
}
