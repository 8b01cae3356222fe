//! Client for Azure OpenAI chat-completion and embedding deployments

use super::{ChatCompletion, EmbeddingGeneration, models::*};
use crate::config::{AzureOpenAISettings, ModelDeployment};
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Process-wide handle bound to one endpoint, one key and the chat and
/// embedding deployments. Shared read-only across requests.
pub struct AzureOpenAIClient {
    http_client: Client,
    endpoint: String,
    key: Secret<String>,
    api_version: String,
    chat_deployment: ModelDeployment,
    embedding_deployment: ModelDeployment,
}

impl AzureOpenAIClient {
    /// Build the client from validated settings
    pub fn from_settings(settings: &AzureOpenAISettings) -> Result<Self> {
        Url::parse(&settings.endpoint)
            .map_err(|e| ProviderError::InvalidEndpoint(format!("{}: {}", settings.endpoint, e)))?;

        let mut client_builder = Client::builder().pool_max_idle_per_host(10);
        if let Some(timeout) = settings.timeout_secs {
            client_builder = client_builder.timeout(Duration::from_secs(timeout));
        }

        let http_client = client_builder
            .build()
            .map_err(ProviderError::Network)?;

        Self::with_http_client(settings, http_client)
    }

    /// Create client with custom HTTP client
    pub fn with_http_client(settings: &AzureOpenAISettings, http_client: Client) -> Result<Self> {
        info!(
            "Registered chat completion service '{}' (deployment {})",
            settings.chat_completion_model.alias, settings.chat_completion_model.deployment_name
        );
        info!(
            "Registered embedding generation service '{}' (deployment {})",
            settings.embedding_generation_model.alias,
            settings.embedding_generation_model.deployment_name
        );

        Ok(Self {
            http_client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            key: settings.key.clone(),
            api_version: settings.api_version.clone(),
            chat_deployment: settings.chat_completion_model.clone(),
            embedding_deployment: settings.embedding_generation_model.clone(),
        })
    }

    pub fn chat_deployment(&self) -> &ModelDeployment {
        &self.chat_deployment
    }

    pub fn embedding_deployment(&self) -> &ModelDeployment {
        &self.embedding_deployment
    }

    fn deployment_url(&self, deployment: &ModelDeployment, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}",
            self.endpoint, deployment.deployment_name, operation
        )
    }

    /// Make a single API request. No retry: failures go straight to the caller.
    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("Making provider request to {}", url);

        let response = self.http_client
            .post(url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", self.key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Network error during provider request: {}", e);
                ProviderError::Network(e)
            })?;

        let status = response.status();

        match status {
            s if s.is_success() => {
                let bytes = response.bytes().await.map_err(ProviderError::Network)?;
                Ok(serde_json::from_slice(&bytes).map_err(ProviderError::Serialization)?)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("Provider authentication failed");
                Err(ProviderError::AuthenticationFailed.into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Provider rate limit exceeded");
                Err(ProviderError::RateLimitExceeded.into())
            }
            _ => {
                let error_text = response.text().await.unwrap_or_default();
                error!("Provider request failed with status {}: {}", status, error_text);
                Err(ProviderError::Api {
                    status: status.as_u16(),
                    body: error_text,
                }.into())
            }
        }
    }
}

#[async_trait]
impl ChatCompletion for AzureOpenAIClient {
    async fn generate_message(&self, history: &ChatHistory) -> Result<String> {
        let url = self.deployment_url(&self.chat_deployment, "chat/completions");
        let request = ChatCompletionRequest {
            messages: history.messages(),
        };

        let response: ChatCompletionResponse = self.post(&url, &request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)?;

        debug!("Received chat completion of {} characters", content.len());
        Ok(content)
    }
}

#[async_trait]
impl EmbeddingGeneration for AzureOpenAIClient {
    async fn generate_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.deployment_url(&self.embedding_deployment, "embeddings");
        let response: EmbeddingResponse = self.post(&url, &EmbeddingRequest { input: texts }).await?;

        if response.data.len() != texts.len() {
            return Err(ProviderError::Api {
                status: 200,
                body: format!("expected {} embeddings, got {}", texts.len(), response.data.len()),
            }.into());
        }

        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        debug!("Received {} embeddings", data.len());
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}
