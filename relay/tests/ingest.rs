use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use companion::AgentAction;
use relay::ingest::{ApiError, ingest};
use relay::{AppState, EventBus, RelayConfig};
use serde_json::json;

fn leaked_bus() -> &'static EventBus {
    Box::leak(Box::new(EventBus::new()))
}

fn state_with_secret(secret: Option<&str>) -> AppState {
    AppState::with_bus(RelayConfig::new(secret.map(str::to_owned)), leaked_bus())
}

#[tokio::test]
async fn fails_closed_when_no_secret_is_configured() {
    let state = state_with_secret(None);
    // The payload itself is perfectly valid; it must not matter.
    let err = ingest(
        State(state),
        Json(json!({ "sharedSecret": "anything", "action": "update_status", "data": {} })),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::SecretUnset));
    assert_eq!(
        err.into_response().status(),
        StatusCode::SERVICE_UNAVAILABLE
    );

    // A body missing every required field still gets 503, never 400.
    let state = state_with_secret(None);
    let err = ingest(State(state), Json(json!({ "mangled": true })))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::SecretUnset));
}

#[tokio::test]
async fn rejects_a_wrong_secret() {
    let state = state_with_secret(Some("hunter2"));
    let (_id, mut rx) = state.bus.subscribe();

    let err = ingest(
        State(state),
        Json(json!({ "sharedSecret": "wrong", "action": "update_status", "data": {} })),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    assert!(rx.try_recv().is_err(), "nothing may be published on failure");
}

#[tokio::test]
async fn rejects_unknown_actions_naming_the_offender() {
    let state = state_with_secret(Some("hunter2"));
    let (_id, mut rx) = state.bus.subscribe();

    let err = ingest(
        State(state),
        Json(json!({ "sharedSecret": "hunter2", "action": "dance", "data": {} })),
    )
    .await
    .unwrap_err();

    match &err {
        ApiError::UnknownAction(given) => assert_eq!(given, "dance"),
        other => panic!("unexpected error: {other:?}"),
    }

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("dance"));
    assert!(text.contains("update_status"), "error must list valid actions");

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let state = state_with_secret(Some("hunter2"));
    let (_id, mut rx) = state.bus.subscribe();

    let err = ingest(State(state), Json(json!([1, 2, 3]))).await.unwrap_err();

    assert!(matches!(err, ApiError::MalformedBody(_)));
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn publishes_once_with_a_server_assigned_timestamp() {
    let state = state_with_secret(Some("hunter2"));
    let (_id, mut rx) = state.bus.subscribe();

    let Json(ack) = ingest(
        State(state.clone()),
        Json(json!({
            "sharedSecret": "hunter2",
            "action": "post_echo",
            "data": { "text": "hello", "timestamp": 1 }
        })),
    )
    .await
    .unwrap();

    assert!(ack.ok);
    assert_eq!(ack.action, AgentAction::PostEcho);
    assert_eq!(ack.subscribers, 1);
    assert!(ack.timestamp > 0);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.action, AgentAction::PostEcho);
    // The bus timestamp is the server's, not the producer's.
    assert_eq!(event.timestamp, ack.timestamp);
    assert_eq!(
        event.data.get("text").and_then(|v| v.as_str()),
        Some("hello")
    );
    assert!(rx.try_recv().is_err(), "exactly one publish per request");
}

#[tokio::test]
async fn missing_data_defaults_to_an_empty_map() {
    let state = state_with_secret(Some("hunter2"));
    let (_id, mut rx) = state.bus.subscribe();

    let Json(ack) = ingest(
        State(state),
        Json(json!({ "sharedSecret": "hunter2", "action": "update_status" })),
    )
    .await
    .unwrap();

    assert!(ack.ok);
    assert!(rx.recv().await.unwrap().data.is_empty());
}
