#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wrenchprep::{
    Config,
    tracking::{Notification, Notifier},
};

pub static SESSION_COOKIE: &str = "connect.sid=s%3Atest-session";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub cookie: Option<String>,
}

#[derive(Debug, Default)]
pub struct StubState {
    pub requests: Vec<Recorded>,
    /// path -> (status, body) returned instead of the real handler
    pub overrides: HashMap<String, (u16, String)>,
    pub tracked: Vec<Value>,
    pub check_badges: Vec<String>,
    pub progress: f64,
    pub progress_after_track: Option<f64>,
    pub streak: u32,
    pub daily: HashMap<String, bool>,
}

/// Shared state of an in-process stand-in for the exam-prep API.
#[derive(Debug, Clone, Default)]
pub struct Stub(Arc<Mutex<StubState>>);

impl Stub {
    pub fn lock(&self) -> MutexGuard<'_, StubState> {
        self.0.lock().unwrap()
    }

    pub fn with_override(self, path: &str, status: u16, body: &str) -> Self {
        self.lock()
            .overrides
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn paths(&self) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.lock().requests.clone()
    }

    /// Binds to a free local port and serves the stub until the test ends.
    pub async fn spawn(&self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(self.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        addr
    }
}

pub fn config_for(addr: SocketAddr) -> Config {
    let raw = format!(
        "[api]\nbase_url = 'http://{addr}'\nsession_cookie = '{SESSION_COOKIE}'\ntimeout_secs = 5\n\
         [notify]\npresentation_delay_ms = 10\n"
    );
    Config::from_slice(raw.as_bytes()).unwrap()
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

fn router(stub: Stub) -> Router {
    Router::new()
        .route("/api/analytics/track-activity", post(track_activity))
        .route("/api/analytics/check-badges", post(check_badges))
        .route("/api/analytics/overview", get(progress))
        .route("/api/analytics/overall-progress", get(progress))
        .route("/api/analytics/category-stats", get(category_stats))
        .route("/api/study-sessions/validate-streak", post(validate_streak))
        .route("/api/study-sessions/streak", get(streak))
        .route("/api/daily-progress/today", get(daily_today))
        .route("/api/daily-progress/{mode}", post(daily_complete))
        .layer(middleware::from_fn_with_state(stub.clone(), record))
        .with_state(stub)
}

async fn record(State(stub): State<Stub>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let cookie = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let overridden = {
        let mut state = stub.lock();
        state.requests.push(Recorded {
            method: req.method().to_string(),
            path: path.clone(),
            cookie,
        });
        state.overrides.get(&path).cloned()
    };

    if let Some((status, body)) = overridden {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, body).into_response();
    }

    next.run(req).await
}

fn daily_json(state: &StubState) -> Value {
    let done = |k: &str| state.daily.get(k).copied().unwrap_or(false);
    json!({
        "date": "2024-06-14",
        "quizCompleted": done("quiz"),
        "reviewTimeCompleted": done("review"),
        "practiceCompleted": done("practice"),
    })
}

async fn track_activity(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    let mut state = stub.lock();
    state.tracked.push(body);
    if let Some(next) = state.progress_after_track.take() {
        state.progress = next;
    }
    Json(json!({ "success": true }))
}

async fn check_badges(State(stub): State<Stub>) -> Json<Value> {
    let state = stub.lock();
    Json(json!({ "newBadges": state.check_badges }))
}

async fn progress(State(stub): State<Stub>) -> Json<Value> {
    let state = stub.lock();
    Json(json!({
        "overallProgress": state.progress,
        "totalStudyTime": 5400,
        "questionsAnswered": 140,
        "correctAnswers": 101,
        "battleWins": 2,
        "battleLosses": 1,
    }))
}

async fn category_stats() -> Json<Value> {
    Json(json!([
        { "categoryId": 1, "name": "General", "progress": 40.0, "questionsAnswered": 80, "correctAnswers": 61 },
        { "categoryId": 2, "name": "Airframe", "progress": 12.5, "questionsAnswered": 20, "correctAnswers": 11 },
    ]))
}

async fn validate_streak(State(stub): State<Stub>) -> Json<Value> {
    let state = stub.lock();
    Json(json!({ "currentStreak": state.streak }))
}

async fn streak(State(stub): State<Stub>) -> Json<Value> {
    let state = stub.lock();
    Json(json!({ "currentStreak": state.streak, "lastActiveDate": "2024-06-14T08:30:00.000Z" }))
}

async fn daily_today(State(stub): State<Stub>) -> Json<Value> {
    let state = stub.lock();
    Json(daily_json(&state))
}

async fn daily_complete(State(stub): State<Stub>, Path(mode): Path<String>) -> Response {
    if !matches!(mode.as_str(), "quiz" | "review" | "practice") {
        return (StatusCode::BAD_REQUEST, "unknown mode").into_response();
    }

    let mut state = stub.lock();
    state.daily.insert(mode, true);
    Json(daily_json(&state)).into_response()
}
