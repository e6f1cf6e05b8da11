//! In-process stand-in for the farm backend

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Every JSON body the stub received, in order
pub type RequestLog = Arc<Mutex<Vec<(String, Value)>>>;

pub struct StubServer {
    pub base_url: String,
    pub requests: RequestLog,
}

pub fn spawn_stub() -> StubServer {
    let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/player", post(player))
        .route("/api/perform_action", post(perform_action))
        .route("/api/game_state", get(game_state))
        .with_state(requests.clone());

    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
            tx.send(listener.local_addr().expect("addr")).expect("send addr");
            axum::serve(listener, app).await.expect("serve");
        });
    });

    let addr = rx.recv_timeout(Duration::from_secs(5)).expect("stub server address");
    StubServer {
        base_url: format!("http://{}", addr),
        requests,
    }
}

pub fn farm_state(name: &str, day: i64, fields: Value) -> Value {
    json!({
        "playerName": name,
        "region": "Morogoro",
        "currency": "TZS",
        "balance": 50000,
        "current_day": day,
        "fields": fields,
        "inventory": {"Maize Seed": 10, "Fertilizer": 5, "Goat Feed": 20, "Harvested Maize": 0},
        "market_prices": {"Harvested Maize": 650},
        "active_quests": [{
            "id": "main_quest_1",
            "title": "Your First Farm",
            "description": "Plant some maize.",
            "learning_point": "Morogoro is excellent for this.",
            "is_complete": false
        }],
        "nasa_data": {"soil_moisture": 0.45, "precipitation_forecast": "light_rain", "vegetation_index": 0.61}
    })
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"status": "error", "message": message}))).into_response()
}

async fn player(State(log): State<RequestLog>, Json(body): Json<Value>) -> Response {
    log.lock().unwrap().push(("/api/player".to_string(), body.clone()));

    let name = body["playerName"].as_str().unwrap_or_default().to_string();
    if name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Player name is required.");
    }
    if body["region"] == "Atlantis" {
        return error(StatusCode::BAD_REQUEST, "Invalid region selected.");
    }

    let fields = json!([
        {"id": 1, "crop": null, "status": "Fallow", "water_level": 0.5},
        {"id": 2, "crop": null, "status": "Fallow", "water_level": 0.5},
        {"id": 3, "crop": "Maize", "status": "Growing", "water_level": 0.3}
    ]);
    Json(json!({
        "status": "success",
        "message": format!("New farm created for {}!", name),
        "state": farm_state(&name, 1, fields)
    }))
    .into_response()
}

async fn perform_action(State(log): State<RequestLog>, Json(body): Json<Value>) -> Response {
    log.lock().unwrap().push(("/api/perform_action".to_string(), body.clone()));

    let name = body["playerName"].as_str().unwrap_or_default().to_string();
    match body["action"].as_str().unwrap_or_default() {
        "next_day" => {
            let fields = json!([{"id": 1, "crop": "Maize", "status": "Ready to Harvest", "water_level": 0.2}]);
            Json(json!({
                "status": "success",
                "message": "A new day has dawned.",
                "new_state": farm_state(&name, 2, fields)
            }))
            .into_response()
        }
        "stall" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"status": "success", "new_state": {}})).into_response()
        }
        "garble" => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => error(StatusCode::BAD_REQUEST, "Action not recognized."),
    }
}

async fn game_state() -> Response {
    Json(json!({
        "nasa_data": {"soil_moisture": 0.71, "precipitation_forecast": "heavy_rain", "vegetation_index": 0.4}
    }))
    .into_response()
}
