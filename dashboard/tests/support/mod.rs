#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use shift_desk::{
    api::ManagerApiClient,
    config::Config,
    services::clock::FixedClock,
    state::AppState,
};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

/// In-process stand-in for the manager API, served on an ephemeral port.
pub struct FakeManagerApi {
    pub base_url: String,
    fetch_calls: Arc<AtomicUsize>,
    status_calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeManagerApi {
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> Vec<(String, String)> {
        self.status_calls.lock().expect("status calls lock").clone()
    }

    pub fn client(&self) -> ManagerApiClient {
        ManagerApiClient::new(self.base_url.clone()).expect("api client")
    }
}

#[derive(Clone)]
struct FakeState {
    roster: Value,
    fetch_status: StatusCode,
    set_status: StatusCode,
    fetch_calls: Arc<AtomicUsize>,
    status_calls: Arc<Mutex<Vec<(String, String)>>>,
}

pub async fn spawn_manager_api(roster: Value) -> FakeManagerApi {
    spawn_manager_api_with(roster, StatusCode::OK, StatusCode::OK).await
}

pub async fn spawn_manager_api_with(
    roster: Value,
    fetch_status: StatusCode,
    set_status: StatusCode,
) -> FakeManagerApi {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let status_calls = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        roster,
        fetch_status,
        set_status,
        fetch_calls: fetch_calls.clone(),
        status_calls: status_calls.clone(),
    };

    let app = Router::new().route("/", post(handle)).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake manager api");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake manager api");
    });

    FakeManagerApi {
        base_url: format!("http://{}/", addr),
        fetch_calls,
        status_calls,
    }
}

async fn handle(
    State(state): State<FakeState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    match form.get("action").map(String::as_str) {
        Some("get_managers") => {
            state.fetch_calls.fetch_add(1, Ordering::SeqCst);
            (state.fetch_status, Json(state.roster.clone())).into_response()
        }
        Some(action) => {
            let manager_id = form.get("manager_id").cloned().unwrap_or_default();
            state
                .status_calls
                .lock()
                .expect("status calls lock")
                .push((manager_id, action.to_string()));
            state.set_status.into_response()
        }
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

pub fn manager_json(id: Value, status: Value, start_at: &str, started_today: bool) -> Value {
    json!({
        "manager_id": id,
        "manager_name": "Ольга Петрова",
        "working_status": status,
        "start_at": start_at,
        "is_started_today": started_today
    })
}

pub fn test_config(api_base_url: &str) -> Config {
    let api_base_url = api_base_url.to_string();
    Config::from_lookup(move |key| match key {
        "API_FETCH_URL" => Some(api_base_url.clone()),
        _ => None,
    })
    .expect("test config")
}

/// 12:00 in Moscow, inside working hours.
pub fn midday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

/// 21:00 in Moscow, after working hours.
pub fn evening() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap()
}

pub fn test_state(api: &FakeManagerApi, now: DateTime<Utc>) -> AppState {
    AppState::new(
        test_config(&api.base_url),
        api.client(),
        Arc::new(FixedClock(now)),
    )
}
