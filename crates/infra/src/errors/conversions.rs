//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use reviewbot_domain::ReviewBotError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ReviewBotError);

impl From<InfraError> for ReviewBotError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ReviewBotError> for InfraError {
    fn from(value: ReviewBotError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoReviewBotError {
    fn into_reviewbot(self) -> ReviewBotError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ReviewBotError */
/* -------------------------------------------------------------------------- */

impl IntoReviewBotError for HttpError {
    fn into_reviewbot(self) -> ReviewBotError {
        if self.is_timeout() {
            return ReviewBotError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ReviewBotError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => ReviewBotError::Auth(message),
                404 => ReviewBotError::NotFound(message),
                429 | 500..=599 => ReviewBotError::Network(message),
                _ => ReviewBotError::Provider(message),
            };
        }

        if self.is_decode() {
            return ReviewBotError::Provider(format!("invalid response body: {self}"));
        }

        ReviewBotError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_reviewbot())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_error(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let error = status_error(StatusCode::UNAUTHORIZED).await;
        let mapped: ReviewBotError = InfraError::from(error).into();
        match mapped {
            ReviewBotError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_status_404_maps_to_not_found() {
        let error = status_error(StatusCode::NOT_FOUND).await;
        let mapped: ReviewBotError = InfraError::from(error).into();
        assert!(matches!(mapped, ReviewBotError::NotFound(_)));
    }

    #[tokio::test]
    async fn other_client_errors_are_provider_errors() {
        let error = status_error(StatusCode::CONFLICT).await;
        let mapped: ReviewBotError = InfraError::from(error).into();
        match mapped {
            ReviewBotError::Provider(msg) => assert!(msg.contains("409")),
            other => panic!("expected provider error, got {:?}", other),
        }
    }
}
