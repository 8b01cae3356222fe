//! API request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::{
    chat::{ChatService, SERVICE_IDENTITY},
    error::RelayError,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

/// Body of `POST /`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default, alias = "Text")]
    pub text: String,
}

/// `GET /`: fixed identity string
pub async fn identity() -> &'static str {
    SERVICE_IDENTITY
}

/// `POST /`: relay the customer's message to the model
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(req) = payload?;
    let reply = state.chat.reply(&req.text).await?;
    Ok(reply)
}

/// Application error wrapper
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be read or deserialized into a `ChatRequest`
    Rejected(JsonRejection),
    Relay(RelayError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Rejected(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Relay(RelayError::Provider(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Rejected(rejection) => {
                warn!("Rejected chat request: {}", rejection.body_text());
                rejection.body_text()
            }
            ApiError::Relay(RelayError::Provider(e)) => {
                warn!("Model provider call failed: {}", e);
                "Upstream model provider error".to_string()
            }
            ApiError::Relay(e) => {
                warn!("Internal error while handling chat request: {}", e);
                "Internal error".to_string()
            }
        };

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        ApiError::Relay(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;

    #[test]
    fn test_provider_failure_is_bad_gateway() {
        let err = ApiError::from(RelayError::from(ProviderError::RateLimitExceeded));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_failure_is_server_error() {
        let err = ApiError::from(RelayError::Internal("oops".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_chat_request_text_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.text, "");
    }

    #[test]
    fn test_chat_request_accepts_pascal_case_text() {
        let req: ChatRequest = serde_json::from_str(r#"{"Text":"hi"}"#).unwrap();
        assert_eq!(req.text, "hi");
    }

    #[tokio::test]
    async fn test_identity() {
        assert_eq!(identity().await, "eShopBot v1.0");
    }
}
