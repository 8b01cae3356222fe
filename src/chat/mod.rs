//! Chat request handling: transcript construction and the single model call

pub mod prompt;

pub use prompt::{BOT_LABEL, GUARDRAIL, SERVICE_IDENTITY, SYSTEM_PROMPT};

use crate::error::Result;
use crate::provider::{ChatCompletion, ChatHistory};
use std::sync::Arc;
use tracing::{debug, error};

/// Answers one customer message per call. Holds no per-request state.
#[derive(Clone)]
pub struct ChatService {
    completion: Arc<dyn ChatCompletion>,
}

impl ChatService {
    pub fn new(completion: Arc<dyn ChatCompletion>) -> Self {
        Self { completion }
    }

    /// `[system: catalog, user: text, system: guardrail]`
    pub fn build_transcript(text: &str) -> ChatHistory {
        let mut history = ChatHistory::with_system_message(SYSTEM_PROMPT);
        history.add_user_message(text);
        history.add_system_message(GUARDRAIL);
        history
    }

    /// Send the customer's text to the model and return the labelled reply
    pub async fn reply(&self, text: &str) -> Result<String> {
        debug!("Handling chat message of {} characters", text.len());

        let mut history = Self::build_transcript(text);

        let response = self
            .completion
            .generate_message(&history)
            .await
            .map_err(|e| {
                error!("Chat completion failed: {}", e);
                e
            })?;

        history.add_assistant_message(response.as_str());
        debug!("Transcript finished with {} messages", history.len());

        Ok(prompt::label_reply(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, RelayError};
    use crate::provider::ChatRole;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedCompletion {
        reply: String,
        seen: Mutex<Vec<ChatHistory>>,
    }

    #[async_trait]
    impl ChatCompletion for CannedCompletion {
        async fn generate_message(&self, history: &ChatHistory) -> Result<String> {
            self.seen.lock().unwrap().push(history.clone());
            Ok(self.reply.clone())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl ChatCompletion for FailingCompletion {
        async fn generate_message(&self, _history: &ChatHistory) -> Result<String> {
            Err(ProviderError::AuthenticationFailed.into())
        }
    }

    #[test]
    fn test_transcript_shape() {
        let history = ChatService::build_transcript("Do you sell mugs?");
        let messages = history.messages();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "Do you sell mugs?");
        assert_eq!(messages[2].role, ChatRole::System);
        assert_eq!(messages[2].content, GUARDRAIL);
    }

    #[test]
    fn test_empty_text_kept_verbatim() {
        let history = ChatService::build_transcript("");
        assert_eq!(history.messages()[1].content, "");
    }

    #[tokio::test]
    async fn test_reply_calls_model_once() {
        let completion = Arc::new(CannedCompletion {
            reply: "Yes, we sell two mugs.".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let service = ChatService::new(completion.clone());

        let reply = service.reply("Do you sell mugs?").await.unwrap();

        assert_eq!(reply, "eShopBot: Yes, we sell two mugs.");
        let seen = completion.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], ChatService::build_transcript("Do you sell mugs?"));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let service = ChatService::new(Arc::new(FailingCompletion));

        let result = service.reply("hello").await;
        assert!(matches!(
            result,
            Err(RelayError::Provider(ProviderError::AuthenticationFailed))
        ));
    }
}
