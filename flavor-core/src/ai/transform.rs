//! Recipe transformation: prompt, call the model, validate the reply.

use thiserror::Error;

use super::prompts::transform::{render_transform_prompt, TRANSFORM_PROMPT_NAME};
use super::validate::parse_transformed_recipe;
use super::{AiClient, AiError, ChatMessage, ChatRequest, Usage};
use crate::recipe::{Recipe, TransformedRecipe};

#[derive(Error, Debug)]
pub enum TransformError {
    /// The model could not be reached, errored, or returned nothing usable.
    #[error("AI Generation failed: {0}")]
    Upstream(#[from] AiError),

    /// The model replied, but not with a JSON object.
    #[error("AI response was not valid JSON: {reason}")]
    MalformedResponse { raw: String, reason: String },
}

/// Result of a transformation.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub recipe: TransformedRecipe,
    pub usage: Usage,
}

/// Ask the model for a `transformation` variant of `recipe`.
///
/// Makes exactly one call to `ai_client`. An empty reply is reported as an
/// upstream failure (typically a safety filter); a non-JSON reply is logged
/// with its raw text and reported as malformed.
pub async fn transform_recipe(
    ai_client: &dyn AiClient,
    recipe: &Recipe,
    transformation: &str,
) -> Result<TransformOutput, TransformError> {
    let prompt = render_transform_prompt(recipe, transformation);
    let request = ChatRequest {
        messages: vec![ChatMessage::user(prompt)],
        json_response: true,
        max_tokens: Some(4096),
        temperature: Some(0.7),
    };

    let response = ai_client.complete(TRANSFORM_PROMPT_NAME, request).await?;

    if response.content.trim().is_empty() {
        return Err(AiError::EmptyResponse.into());
    }

    let transformed = parse_transformed_recipe(&response.content).inspect_err(|e| {
        tracing::warn!(
            transformation = transformation,
            raw = %response.content,
            "JSON parsing of AI response failed: {}",
            e
        );
    })?;

    Ok(TransformOutput {
        recipe: transformed,
        usage: response.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;

    fn omelet() -> Recipe {
        Recipe::new(
            "Test Omelet",
            ["Eggs", "Cheese", "Butter"],
            "Whisk eggs, melt butter, cook.",
        )
    }

    #[tokio::test]
    async fn test_returns_reply_exactly() {
        let client =
            FakeAiClient::always(r#"{"title":"T","ingredients":["a","b"],"instructions":"I"}"#);

        let output = transform_recipe(&client, &omelet(), "Vegetarian")
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&output.recipe).unwrap(),
            serde_json::json!({"title": "T", "ingredients": ["a", "b"], "instructions": "I"})
        );
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_recipe_and_label() {
        let client = FakeAiClient::always("{}");
        transform_recipe(&client, &omelet(), "Gluten-Free")
            .await
            .unwrap();

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Gluten-Free"));
        assert!(prompts[0].contains("Test Omelet"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_upstream_error() {
        let client = FakeAiClient::always("");
        let err = transform_recipe(&client, &omelet(), "Vegan")
            .await
            .unwrap_err();
        assert!(matches!(err, TransformError::Upstream(AiError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_prose_reply_is_malformed() {
        let client = FakeAiClient::always("sorry, I can't help");
        let err = transform_recipe(&client, &omelet(), "Vegan")
            .await
            .unwrap_err();
        assert!(
            matches!(err, TransformError::MalformedResponse { ref raw, .. } if raw == "sorry, I can't help")
        );
    }

    #[tokio::test]
    async fn test_client_failure_is_upstream_error() {
        let client = FakeAiClient::failing("401 Unauthorized");
        let err = transform_recipe(&client, &omelet(), "Spicy")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "AI Generation failed: API error: 401 Unauthorized");
    }
}
