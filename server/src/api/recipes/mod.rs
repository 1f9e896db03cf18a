pub mod create;
pub mod list;
pub mod transform;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

pub mod paths {
    pub const RECIPES: &str = "/recipes";
    pub const RECIPES_TRAILING: &str = "/recipes/";
    pub const TRANSFORM: &str = "/recipes/{id}/transform";
}

/// Returns the router for the /recipes endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            paths::RECIPES,
            get(list::list_recipes).post(create::create_recipe),
        )
        .route(
            paths::RECIPES_TRAILING,
            get(list::list_recipes).post(create::create_recipe),
        )
        .route(paths::TRANSFORM, post(transform::transform_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        transform::transform_recipe,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        create::IngredientsInput,
        create::CreateRecipeResponse,
        list::ListRecipesResponse,
        transform::TransformRecipeResponse,
    ))
)]
pub struct ApiDoc;
