use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use flavor_core::{normalize_ingredients, split_ingredient_lines, Recipe, RecipeId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ingredients as either newline-separated text or a list.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum IngredientsInput {
    /// One ingredient per line
    Text(String),
    List(Vec<String>),
}

impl IngredientsInput {
    /// Trimmed, non-blank ingredient lines.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            IngredientsInput::Text(text) => split_ingredient_lines(&text),
            IngredientsInput::List(items) => normalize_ingredients(items),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub ingredients: IngredientsInput,
    pub instructions: String,
}

impl From<CreateRecipeRequest> for Recipe {
    fn from(request: CreateRecipeRequest) -> Self {
        Recipe::new(
            request.title,
            request.ingredients.into_lines(),
            request.instructions,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRecipeResponse {
    /// Identifier to use for transformations (position in the store)
    pub id: RecipeId,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 200, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 422, description = "Malformed recipe payload", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Rejected recipe payload: {}", rejection);
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    let id = state.store.append(Recipe::from(request));
    tracing::info!(recipe_id = id, "Recipe added");

    (
        StatusCode::OK,
        Json(CreateRecipeResponse {
            id,
            message: "Recipe added successfully".to_string(),
        }),
    )
        .into_response()
}
