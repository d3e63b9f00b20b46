use axum::{extract::State, Json};
use serde::Serialize;

use super::AppState;

const WELCOME_MESSAGE: &str = "Welcome to CloudDevOpsHub Spring Boot Demo!";
const DESCRIPTION: &str = "Spring Boot Demo for CI/CD Pipeline by CloudDevOpsHub";
const STATUS_UP: &str = "UP";

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub application: String,
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub application: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub application: String,
    pub version: String,
    #[serde(rename = "runtime-version")]
    pub runtime_version: &'static str,
    pub description: &'static str,
}

/// Local wall-clock time, ISO-8601 without an offset.
fn timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.f")
        .to_string()
}

pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        application: state.info.name.clone(),
        message: WELCOME_MESSAGE,
        status: STATUS_UP,
        timestamp: timestamp(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_UP,
        application: state.info.name.clone(),
        version: state.info.version.clone(),
        timestamp: timestamp(),
    })
}

pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        application: state.info.name.clone(),
        version: state.info.version.clone(),
        runtime_version: env!("CARGO_PKG_RUST_VERSION"),
        description: DESCRIPTION,
    })
}
