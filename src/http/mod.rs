//! HTTP surface: health/info endpoints and the `/api/users` resource.

pub mod error;
pub mod health;
pub mod users;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::clients::UserClient;

pub use error::{ApiError, ApiResult};

/// Static metadata reported by the health endpoints.
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub info: Arc<AppInfo>,
}

impl AppState {
    pub fn new(users: UserClient, info: AppInfo) -> Self {
        Self {
            users,
            info: Arc::new(info),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health))
        .route("/info", get(health::info))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
