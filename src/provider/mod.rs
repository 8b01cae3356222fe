//! Hosted model provider: chat completion and embedding generation

pub mod client;
pub mod models;

pub use client::AzureOpenAIClient;
pub use models::{ChatHistory, ChatMessage, ChatRole};

use async_trait::async_trait;
use crate::error::Result;

/// Trait for chat-completion providers
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send the transcript and return the assistant's reply text
    async fn generate_message(&self, history: &ChatHistory) -> Result<String>;
}

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingGeneration: Send + Sync {
    /// Generate one embedding per input text, in input order
    async fn generate_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
