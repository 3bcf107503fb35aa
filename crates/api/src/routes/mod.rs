//! HTTP surface
//!
//! - `GET|POST /api/listener` - change-notification webhook
//! - `POST /api/joinMeeting` - meeting processing
//! - `GET /health` - liveness

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::AppContext;

pub mod health;
pub mod listener;
pub mod meetings;

/// Build the application router over a shared context.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route(
            "/api/listener",
            get(listener::handle_notification).post(listener::handle_notification),
        )
        .route("/api/joinMeeting", post(meetings::join_meeting))
        .route("/health", get(health::health))
        .with_state(context)
}
