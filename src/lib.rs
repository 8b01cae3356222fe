//! eShop Chat API - a single-endpoint relay to Azure OpenAI
//!
//! `POST /` takes `{"text": "..."}`, wraps it in a fixed product-catalog
//! transcript, makes one chat-completion call and answers with
//! `"eShopBot: <reply>"` as plain text. `GET /` returns the service identity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eshop_chat_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load("appsettings.json")?;
//!     let app = eshop_chat_api::server::build_app(&config)?;
//!     eshop_chat_api::server::start_server(&config.bind_address(), app).await
//! }
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod observability;
pub mod provider;
pub mod server;
pub mod shutdown;

pub use config::Config;
pub use error::{RelayError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{AppState, ChatRequest};
    pub use crate::chat::ChatService;
    pub use crate::config::Config;
    pub use crate::error::{ProviderError, RelayError, Result};
    pub use crate::provider::{AzureOpenAIClient, ChatCompletion, ChatHistory, EmbeddingGeneration};
}
