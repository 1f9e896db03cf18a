//! AI client module for LLM-backed recipe transformation.
//!
//! This module provides:
//! - `AiClient` trait for abstracting AI providers
//! - `GeminiClient`, talking to Gemini through its OpenAI-compatible API
//! - `FakeAiClient` for tests and offline development
//! - Prompt templates and reply validation
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `GOOGLE_API_KEY` (required for Gemini): Your Gemini API key
//! - `FLAVOR_AI_PROVIDER` (optional): "gemini" (default) or "fake"
//! - `FLAVOR_AI_MODEL` (optional): Model name, e.g., "gemini-2.0-flash-001"
//! - `FLAVOR_AI_BASE_URL` (optional): API base URL
//! - `FLAVOR_AI_TIMEOUT_SECS` (optional): Request timeout in seconds
//!
//! # Example
//!
//! ```ignore
//! use flavor_core::ai::{create_client_from_env, transform_recipe};
//!
//! let client = create_client_from_env()?;
//! let output = transform_recipe(client.as_ref(), &recipe, "Vegetarian").await?;
//! println!("{:?}", output.recipe.title());
//! ```

mod client;
mod config;
mod fake;
pub mod prompts;
mod transform;
mod types;
mod validate;

pub use client::{AiClient, AiError, GeminiClient};
pub use config::{AiConfig, ConfigError, ProviderKind};
pub use fake::{FakeAiClient, CANNED_TRANSFORMATION};
pub use transform::{transform_recipe, TransformError, TransformOutput};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};
pub use validate::parse_transformed_recipe;

use std::sync::Arc;

/// Create the AI client selected by `FLAVOR_AI_PROVIDER`.
///
/// The Gemini provider fails here when no API key is configured.
pub fn create_client_from_env() -> Result<Arc<dyn AiClient>, AiError> {
    match ProviderKind::from_env()? {
        ProviderKind::Gemini => {
            let client = GeminiClient::from_env()?;
            tracing::info!(model = client.model(), "Using Gemini AI provider");
            Ok(Arc::new(client))
        }
        ProviderKind::Fake => {
            tracing::warn!("Using fake AI provider, transformations return canned data");
            Ok(Arc::new(FakeAiClient::default()))
        }
    }
}
