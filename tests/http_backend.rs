mod common;

use serde_json::json;
use shamba_client::api::{ActionRequest, ApiError, GameBackend, HttpBackend, PlayerRequest, Snapshot};
use std::time::{Duration, Instant};

use common::spawn_stub;

fn backend(base_url: &str) -> HttpBackend {
    HttpBackend::new(base_url, Duration::from_secs(5))
}

#[test]
fn test_player_success_round_trip() {
    let stub = spawn_stub();
    let resp = backend(&stub.base_url)
        .create_or_resume(&PlayerRequest {
            player_name: "Amina".to_string(),
            region: "Morogoro".to_string(),
        })
        .unwrap();

    assert!(resp.is_success());
    let snapshot = Snapshot::from_value(resp.state.unwrap()).unwrap();
    assert_eq!(snapshot.player_name.as_deref(), Some("Amina"));
    assert_eq!(snapshot.fields.len(), 3);

    let sent = stub.requests.lock().unwrap();
    assert_eq!(sent[0].1, json!({"playerName": "Amina", "region": "Morogoro"}));
}

#[test]
fn test_error_status_body_is_read() {
    let stub = spawn_stub();
    let resp = backend(&stub.base_url)
        .create_or_resume(&PlayerRequest {
            player_name: "Amina".to_string(),
            region: "Atlantis".to_string(),
        })
        .unwrap();

    assert!(!resp.is_success());
    assert_eq!(resp.message.as_deref(), Some("Invalid region selected."));
    assert!(resp.state.is_none());
}

#[test]
fn test_action_request_shape() {
    let stub = spawn_stub();
    let resp = backend(&stub.base_url)
        .perform_action(&ActionRequest {
            action: "plant".to_string(),
            params: json!({"field_id": 1}),
            player_name: "Amina".to_string(),
        })
        .unwrap();

    // The stub only knows next_day
    assert!(!resp.is_success());
    assert_eq!(resp.message.as_deref(), Some("Action not recognized."));

    let sent = stub.requests.lock().unwrap();
    assert_eq!(sent[0].0, "/api/perform_action");
    assert_eq!(sent[0].1, json!({"action": "plant", "params": {"field_id": 1}, "playerName": "Amina"}));
}

#[test]
fn test_non_json_body_is_invalid_response() {
    let stub = spawn_stub();
    let err = backend(&stub.base_url)
        .perform_action(&ActionRequest {
            action: "garble".to_string(),
            params: json!({}),
            player_name: "Amina".to_string(),
        })
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[test]
fn test_slow_server_times_out() {
    let stub = spawn_stub();
    let backend = HttpBackend::new(&stub.base_url, Duration::from_millis(500));

    let started = Instant::now();
    let err = backend
        .perform_action(&ActionRequest {
            action: "stall".to_string(),
            params: json!({}),
            player_name: "Amina".to_string(),
        })
        .unwrap_err();

    assert!(matches!(err, ApiError::Timeout | ApiError::Network(_)));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[test]
fn test_environment_refresh() {
    let stub = spawn_stub();
    let nasa = backend(&stub.base_url).environment().unwrap();
    assert_eq!(nasa.soil_moisture, Some(0.71));
    assert_eq!(nasa.precipitation_forecast.as_deref(), Some("heavy_rain"));
}
