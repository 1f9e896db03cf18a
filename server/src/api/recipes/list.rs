use crate::types::RecipeContent;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListRecipesResponse {
    /// All stored recipes; a recipe's index is its id
    pub recipes: Vec<RecipeContent>,
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All stored recipes, in creation order", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> impl IntoResponse {
    let recipes = state
        .store
        .list()
        .into_iter()
        .map(RecipeContent::from)
        .collect();

    (StatusCode::OK, Json(ListRecipesResponse { recipes }))
}
