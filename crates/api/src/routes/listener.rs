//! Change-notification webhook

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use reviewbot_core::WebhookRequest;

use crate::utils::logging::log_request;
use crate::AppContext;

const VALIDATION_TOKEN_PARAM: &str = "validationToken";

pub async fn handle_notification(
    State(context): State<Arc<AppContext>>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request = WebhookRequest {
        validation_token: params.get(VALIDATION_TOKEN_PARAM).map(String::as_str),
        body: &body,
    };

    let response = context.gateway.handle(request).await;
    log_request("listener", started.elapsed(), response.status);

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, response.content_type)], response.body).into_response()
}
