use flavor_core::Recipe;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored recipe as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeContent {
    #[schema(example = "Test Omelet")]
    pub title: String,
    /// One entry per ingredient, trimmed, never blank.
    pub ingredients: Vec<String>,
    pub instructions: String,
}

impl From<Recipe> for RecipeContent {
    fn from(recipe: Recipe) -> Self {
        Self {
            title: recipe.title,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
        }
    }
}
