pub mod ai;
pub mod error;
pub mod recipe;
pub mod store;

pub use error::StoreError;
pub use recipe::{
    normalize_ingredients, split_ingredient_lines, Recipe, TransformationKind, TransformedRecipe,
    UnknownTransformation,
};
pub use store::{resolve_id, MemoryRecipeStore, RecipeId, RecipeStore};
