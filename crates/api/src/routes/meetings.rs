//! Meeting processing endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reviewbot_core::{PlannerDestination, PublishPlan};
use reviewbot_domain::{ResolveRequest, ReviewBotError};
use serde::Deserialize;
use tracing::{error, info};

use crate::utils::logging::{error_label, log_request};
use crate::AppContext;

/// `{meetingUrl?, eventId?, documentUrls?, planner?}`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinMeetingRequest {
    #[serde(flatten)]
    pub meeting: ResolveRequest,
    #[serde(default)]
    pub document_urls: Vec<String>,
    #[serde(default)]
    pub planner: Option<PlannerDestination>,
}

pub async fn join_meeting(State(context): State<Arc<AppContext>>, body: Bytes) -> Response {
    let started = Instant::now();
    let response = process(&context, &body).await;
    log_request("join_meeting", started.elapsed(), response.status().as_u16());
    response
}

async fn process(context: &AppContext, body: &[u8]) -> Response {
    let request: JoinMeetingRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "join meeting body is not valid JSON");
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {err}")).into_response();
        }
    };

    info!(
        event_id = request.meeting.event_id().unwrap_or_default(),
        has_meeting_url = request.meeting.meeting_url().is_some(),
        documents = request.document_urls.len(),
        "processing meeting"
    );

    let plan = PublishPlan {
        document_urls: request.document_urls,
        planner: request.planner.or_else(|| context.default_planner()),
    };

    match context.pipeline.run(&request.meeting, &plan).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// 4xx/501 carry the bare message, 500 is prefixed with `Error: `.
fn error_response(err: &ReviewBotError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
        error!(error = %err, kind = error_label(err), "error in join meeting");
        (status, format!("Error: {}", err.message())).into_response()
    } else {
        info!(error = %err, kind = error_label(err), "join meeting rejected");
        (status, err.message().to_string()).into_response()
    }
}
