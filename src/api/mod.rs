//! HTTP surface: identity and chat routes

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ChatRequest};
pub use routes::build_router;
