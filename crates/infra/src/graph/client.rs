//! Microsoft Graph implementation of [`GraphCapability`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use reviewbot_core::{CredentialProvider, GraphCapability};
use reviewbot_domain::constants::GRAPH_API_BASE;
use reviewbot_domain::{
    CalendarEvent, PlannerTask, Result, ReviewBotError, Subscription, TranscriptInfo,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use urlencoding::encode;

use super::types::{AcceptRequest, ODataCollection, SubscriptionRenewal};
use crate::http::HttpClient;

/// Graph REST client authenticated through a [`CredentialProvider`].
#[derive(Clone)]
pub struct GraphClient {
    http: HttpClient,
    credentials: Arc<dyn CredentialProvider>,
    base_url: String,
}

impl GraphClient {
    pub fn new(http: HttpClient, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { http, credentials, base_url: GRAPH_API_BASE.to_string() }
    }

    /// Point the client at another Graph root (national clouds, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, builder: RequestBuilder, operation: &str) -> Result<Response> {
        let token = self.credentials.access_token().await?;
        let response = self.http.send(builder.bearer_auth(token)).await?;

        let status = response.status();
        debug!(operation, %status, "graph response");
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        let message = format!("Graph API error during {operation} ({status}): {error_text}");
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ReviewBotError::Auth(message),
            StatusCode::NOT_FOUND => ReviewBotError::NotFound(message),
            _ => ReviewBotError::Provider(message),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, operation: &str) -> Result<T> {
        let builder = self.http.request(Method::GET, self.url(path));
        let response = self.execute(builder, operation).await?;
        parse_json(response, operation).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        operation: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.http.request(method, self.url(path)).json(body);
        let response = self.execute(builder, operation).await?;
        parse_json(response, operation).await
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
    response.json().await.map_err(|err| {
        ReviewBotError::Provider(format!("Failed to parse Graph response for {operation}: {err}"))
    })
}

#[async_trait]
impl GraphCapability for GraphClient {
    async fn get_event(&self, user_id: &str, event_id: &str) -> Result<CalendarEvent> {
        let path = format!("/users/{}/events/{}", encode(user_id), encode(event_id));
        self.get_json(&path, "get event").await
    }

    async fn list_transcripts(
        &self,
        organizer: &str,
        meeting_id: &str,
    ) -> Result<Vec<TranscriptInfo>> {
        let path = format!(
            "/users/{}/onlineMeetings/{}/transcripts",
            encode(organizer),
            encode(meeting_id)
        );
        let collection: ODataCollection<TranscriptInfo> =
            self.get_json(&path, "list transcripts").await?;
        Ok(collection.value)
    }

    async fn get_transcript_content(
        &self,
        organizer: &str,
        meeting_id: &str,
        transcript_id: &str,
    ) -> Result<String> {
        let path = format!(
            "/users/{}/onlineMeetings/{}/transcripts/{}/content",
            encode(organizer),
            encode(meeting_id),
            encode(transcript_id)
        );
        let builder = self.http.request(Method::GET, self.url(&path));
        let response = self.execute(builder, "get transcript content").await?;
        response.text().await.map_err(|err| {
            ReviewBotError::Provider(format!("Failed to read transcript content: {err}"))
        })
    }

    async fn accept_event(
        &self,
        user_id: &str,
        event_id: &str,
        comment: &str,
        send_response: bool,
    ) -> Result<()> {
        let path = format!("/users/{}/events/{}/accept", encode(user_id), encode(event_id));
        let builder = self
            .http
            .request(Method::POST, self.url(&path))
            .json(&AcceptRequest { comment, send_response });
        self.execute(builder, "accept event").await?;
        Ok(())
    }

    async fn create_subscription(&self, subscription: &Subscription) -> Result<Subscription> {
        self.send_json(Method::POST, "/subscriptions", subscription, "create subscription").await
    }

    async fn renew_subscription(
        &self,
        subscription_id: &str,
        expiration: DateTime<Utc>,
    ) -> Result<Subscription> {
        let path = format!("/subscriptions/{}", encode(subscription_id));
        let body = SubscriptionRenewal { expiration_date_time: expiration };
        self.send_json(Method::PATCH, &path, &body, "renew subscription").await
    }

    async fn create_planner_task(&self, task: &PlannerTask) -> Result<()> {
        let builder = self.http.request(Method::POST, self.url("/planner/tasks")).json(task);
        self.execute(builder, "create planner task").await?;
        Ok(())
    }
}
