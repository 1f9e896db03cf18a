//! Process-lifetime recipe storage.
//!
//! A recipe's identifier is its zero-based position in the store at the time
//! it was appended. Identifiers are never reused, but they do not survive a
//! restart since the store starts empty again.

use std::sync::{PoisonError, RwLock};

use crate::error::StoreError;
use crate::recipe::Recipe;

/// Identifier of a stored recipe.
pub type RecipeId = usize;

/// Append-only recipe storage.
///
/// Implementations must serialize appends so concurrent callers never observe
/// lost or duplicated identifiers.
pub trait RecipeStore: Send + Sync {
    /// Store a recipe and return its identifier.
    fn append(&self, recipe: Recipe) -> RecipeId;

    /// Look up a recipe by identifier.
    fn get(&self, id: RecipeId) -> Result<Recipe, StoreError>;

    /// All recipes, in identifier order.
    fn list(&self) -> Vec<Recipe>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Convert an externally supplied identifier, rejecting negative values.
pub fn resolve_id(raw: i64) -> Result<RecipeId, StoreError> {
    RecipeId::try_from(raw).map_err(|_| StoreError::NotFound)
}

/// In-memory store backed by a lock-guarded vector.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// A panic while holding the lock cannot leave the vector half-written, so a
// poisoned lock is still safe to read through.
impl RecipeStore for MemoryRecipeStore {
    fn append(&self, recipe: Recipe) -> RecipeId {
        let mut recipes = self.recipes.write().unwrap_or_else(PoisonError::into_inner);
        recipes.push(recipe);
        recipes.len() - 1
    }

    fn get(&self, id: RecipeId) -> Result<Recipe, StoreError> {
        self.recipes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn list(&self) -> Vec<Recipe> {
        self.recipes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn len(&self) -> usize {
        self.recipes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn omelet() -> Recipe {
        Recipe::new(
            "Test Omelet",
            ["Eggs", "Cheese", "Butter"],
            "Whisk eggs, melt butter, cook.",
        )
    }

    #[test]
    fn test_append_returns_position() {
        let store = MemoryRecipeStore::new();
        assert!(store.is_empty());

        assert_eq!(store.append(omelet()), 0);
        assert_eq!(store.append(Recipe::new("Toast", ["Bread"], "Toast it.")), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[1].title, "Toast");
    }

    #[test]
    fn test_get_existing_and_missing() {
        let store = MemoryRecipeStore::new();
        let id = store.append(omelet());

        assert_eq!(store.get(id).unwrap(), omelet());
        assert_eq!(store.get(id + 1), Err(StoreError::NotFound));
    }

    #[test]
    fn test_resolve_id_rejects_negative() {
        assert_eq!(resolve_id(-1), Err(StoreError::NotFound));
        assert_eq!(resolve_id(3), Ok(3));
    }

    #[test]
    fn test_list_is_idempotent() {
        let store = MemoryRecipeStore::new();
        store.append(omelet());
        assert_eq!(store.list(), store.list());
    }

    #[test]
    fn test_concurrent_appends_keep_unique_ids() {
        let store = Arc::new(MemoryRecipeStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..50)
                        .map(|i| store.append(Recipe::new(format!("{t}-{i}"), ["x"], "y")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<RecipeId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(ids.len(), 400);
        assert_eq!(ids, (0..400).collect());

        let titles: HashSet<String> = store.list().into_iter().map(|r| r.title).collect();
        assert_eq!(titles.len(), 400);
    }
}
