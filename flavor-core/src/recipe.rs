//! Recipe records and transformed-recipe results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A stored recipe. Ingredients never contain blank entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecipeFields")]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// Wire shape of a recipe; deserialization goes through [`Recipe::new`].
#[derive(Deserialize)]
struct RecipeFields {
    title: String,
    ingredients: Vec<String>,
    instructions: String,
}

impl From<RecipeFields> for Recipe {
    fn from(fields: RecipeFields) -> Self {
        Recipe::new(fields.title, fields.ingredients, fields.instructions)
    }
}

impl Recipe {
    /// Build a recipe, trimming ingredient lines and dropping blank ones.
    pub fn new<I, S>(
        title: impl Into<String>,
        ingredients: I,
        instructions: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            title: title.into(),
            ingredients: normalize_ingredients(ingredients),
            instructions: instructions.into(),
        }
    }
}

/// Trim each ingredient and drop the empty ones, preserving order.
pub fn normalize_ingredients<I, S>(ingredients: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ingredients
        .into_iter()
        .map(|i| i.as_ref().trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

/// Split newline-separated ingredient text into one ingredient per line.
pub fn split_ingredient_lines(text: &str) -> Vec<String> {
    normalize_ingredients(text.lines())
}

/// The JSON object returned by the model for a transformation.
///
/// Only the shape "is a JSON object" is guaranteed. The model is asked for
/// `title`, `ingredients` and `instructions`, but those keys are not enforced,
/// so the accessors return `None` when a key is missing or has the wrong type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformedRecipe(Map<String, Value>);

impl TransformedRecipe {
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Ingredients, if present as an array of strings.
    pub fn ingredients(&self) -> Option<Vec<&str>> {
        self.0
            .get("ingredients")?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    pub fn instructions(&self) -> Option<&str> {
        self.0.get("instructions").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for TransformedRecipe {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Transformations offered as a fixed menu by clients.
///
/// The API itself accepts any free-text label; this list only exists for
/// convenience in user-facing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformationKind {
    Vegetarian,
    Vegan,
    GlutenFree,
    Spicy,
    LowCarb,
}

impl TransformationKind {
    pub const ALL: [TransformationKind; 5] = [
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::Spicy,
        Self::LowCarb,
    ];

    /// The label sent to the API.
    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-Free",
            Self::Spicy => "Spicy",
            Self::LowCarb => "Low-Carb",
        }
    }
}

impl fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
#[error("Unknown transformation '{0}', expected one of: Vegetarian, Vegan, Gluten-Free, Spicy, Low-Carb")]
pub struct UnknownTransformation(String);

impl FromStr for TransformationKind {
    type Err = UnknownTransformation;

    /// Case-insensitive; spaces, dashes and underscores are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        Self::ALL
            .into_iter()
            .find(|kind| kind.label().replace('-', "").eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownTransformation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_trims_and_drops_blank_ingredients() {
        let recipe = Recipe::new("Soup", ["  Chicken ", "", "   ", "Carrots"], "Simmer.");
        assert_eq!(recipe.ingredients, vec!["Chicken", "Carrots"]);
    }

    #[test]
    fn test_deserialize_normalizes_ingredients() {
        let recipe: Recipe = serde_json::from_value(json!({
            "title": "Soup",
            "ingredients": [" Chicken ", "", "  "],
            "instructions": "Simmer."
        }))
        .unwrap();
        assert_eq!(recipe.ingredients, vec!["Chicken"]);
    }

    #[test]
    fn test_split_ingredient_lines() {
        let lines = split_ingredient_lines("- 1 lb Chicken\n\n  - 4 cups Broth  \r\n");
        assert_eq!(lines, vec!["- 1 lb Chicken", "- 4 cups Broth"]);
    }

    #[test]
    fn test_transformed_recipe_accessors() {
        let value = json!({"title": "T", "ingredients": ["a", "b"], "instructions": "I"});
        let recipe: TransformedRecipe = serde_json::from_value(value).unwrap();

        assert_eq!(recipe.title(), Some("T"));
        assert_eq!(recipe.ingredients(), Some(vec!["a", "b"]));
        assert_eq!(recipe.instructions(), Some("I"));
    }

    #[test]
    fn test_transformed_recipe_tolerates_missing_keys() {
        let value = json!({"title": 42, "ingredients": ["a", 1]});
        let recipe: TransformedRecipe = serde_json::from_value(value).unwrap();

        assert_eq!(recipe.title(), None);
        assert_eq!(recipe.ingredients(), None);
        assert_eq!(recipe.instructions(), None);
    }

    #[test]
    fn test_transformed_recipe_serializes_as_plain_object() {
        let value = json!({"title": "T", "extra": true});
        let recipe: TransformedRecipe = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&recipe).unwrap(), value);
    }

    #[test]
    fn test_transformation_kind_parsing() {
        assert_eq!("vegan".parse::<TransformationKind>().unwrap(), TransformationKind::Vegan);
        assert_eq!(
            "gluten free".parse::<TransformationKind>().unwrap(),
            TransformationKind::GlutenFree
        );
        assert_eq!(
            "LOW_CARB".parse::<TransformationKind>().unwrap(),
            TransformationKind::LowCarb
        );
        assert!("keto".parse::<TransformationKind>().is_err());
    }

    #[test]
    fn test_transformation_kind_labels() {
        let labels: Vec<&str> = TransformationKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec!["Vegetarian", "Vegan", "Gluten-Free", "Spicy", "Low-Carb"]
        );
    }
}
