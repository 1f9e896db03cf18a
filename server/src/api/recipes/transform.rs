use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{http::StatusCode, response::IntoResponse, Json};
use flavor_core::ai::{transform_recipe as run_transform, TransformError};
use flavor_core::{resolve_id, RecipeId, StoreError, TransformedRecipe};
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransformParams {
    /// Free-text transformation, e.g. "Vegetarian", "Vegan", "Gluten-Free", "Spicy", "Low-Carb"
    pub transformation_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransformRecipeResponse {
    /// The model's JSON object, normally with `title`, `ingredients` and `instructions`
    #[schema(value_type = Object)]
    pub transformed_recipe: TransformedRecipe,
}

/// Parse a path id. Integers too large for `i64` can never name a stored
/// recipe, so they resolve to not found like any other out-of-range id.
fn parse_recipe_id(raw: &str) -> Result<Result<RecipeId, StoreError>, String> {
    match raw.parse::<i64>() {
        Ok(id) => Ok(resolve_id(id)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(Err(StoreError::NotFound))
        }
        Err(_) => Err(format!("Invalid URL: Cannot parse `{}` to an integer", raw)),
    }
}

/// Transform a stored recipe with the AI model
///
/// The stored recipe is not modified; the transformed version is returned and discarded.
#[utoipa::path(
    post,
    path = "/recipes/{id}/transform",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe id returned at creation"),
        TransformParams
    ),
    responses(
        (status = 200, description = "Transformed recipe", body = TransformRecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 422, description = "Invalid id or missing transformation_type", body = ErrorResponse),
        (status = 500, description = "AI generation failed or returned invalid JSON", body = ErrorResponse)
    )
)]
pub async fn transform_recipe(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    params: Result<Query<TransformParams>, QueryRejection>,
) -> impl IntoResponse {
    let Path(raw_id) = match id {
        Ok(id) => id,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    let id = match parse_recipe_id(&raw_id) {
        Ok(id) => id,
        Err(message) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, message),
    };

    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    let found = id.and_then(|id| state.store.get(id).map(|recipe| (id, recipe)));
    let (id, recipe) = match found {
        Ok(found) => found,
        Err(e) => return error_response(StatusCode::NOT_FOUND, e.to_string()),
    };

    let transformation = params.transformation_type;

    match run_transform(state.ai_client.as_ref(), &recipe, &transformation).await {
        Ok(output) => {
            tracing::info!(
                recipe_id = id,
                transformation = %transformation,
                total_tokens = output.usage.total_tokens,
                "Recipe transformed"
            );
            (
                StatusCode::OK,
                Json(TransformRecipeResponse {
                    transformed_recipe: output.recipe,
                }),
            )
                .into_response()
        }
        Err(e @ TransformError::MalformedResponse { .. }) => {
            tracing::error!(recipe_id = id, "Transformation failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI response was not valid JSON.",
            )
        }
        Err(e @ TransformError::Upstream(_)) => {
            tracing::error!(recipe_id = id, "Transformation failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
