//! Validation of transformation replies.
//!
//! Any JSON object is accepted. The keys the prompt asks
//! for are not enforced, so callers should treat `title`, `ingredients` and
//! `instructions` as best-effort.

use serde_json::Value;

use super::transform::TransformError;
use crate::recipe::TransformedRecipe;

/// Parse a model reply into a [`TransformedRecipe`].
///
/// Fails with [`TransformError::MalformedResponse`] when the reply is empty,
/// is not valid JSON, or is valid JSON but not an object.
pub fn parse_transformed_recipe(raw: &str) -> Result<TransformedRecipe, TransformError> {
    let malformed = |reason: String| TransformError::MalformedResponse {
        raw: raw.to_string(),
        reason,
    };

    if raw.trim().is_empty() {
        return Err(malformed("response was empty".to_string()));
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(TransformedRecipe::from(map)),
        Ok(other) => Err(malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(malformed(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_expected_shape() {
        let recipe = parse_transformed_recipe(
            r#"{"title":"T","ingredients":["a","b"],"instructions":"I"}"#,
        )
        .unwrap();
        assert_eq!(recipe.title(), Some("T"));
        assert_eq!(recipe.ingredients(), Some(vec!["a", "b"]));
        assert_eq!(recipe.instructions(), Some("I"));
    }

    #[test]
    fn test_accepts_object_missing_keys() {
        let recipe = parse_transformed_recipe(r#"{"name": "Vegan Omelet"}"#).unwrap();
        assert_eq!(recipe.title(), None);
        assert_eq!(recipe.as_map().len(), 1);
    }

    #[test]
    fn test_rejects_empty() {
        for raw in ["", "   \n"] {
            let err = parse_transformed_recipe(raw).unwrap_err();
            assert!(matches!(err, TransformError::MalformedResponse { .. }));
        }
    }

    #[test]
    fn test_rejects_prose_and_keeps_raw_text() {
        let err = parse_transformed_recipe("sorry, I can't help").unwrap_err();
        match err {
            TransformError::MalformedResponse { raw, .. } => {
                assert_eq!(raw, "sorry, I can't help");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_object_json() {
        let err = parse_transformed_recipe(r#"["a", "b"]"#).unwrap_err();
        match err {
            TransformError::MalformedResponse { reason, .. } => {
                assert!(reason.contains("an array"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_truncated_json() {
        assert!(parse_transformed_recipe(r#"{"title": "Vegan Om"#).is_err());
    }
}
