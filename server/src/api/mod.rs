pub mod recipes;

#[cfg(test)]
mod test_support;

use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::types::RecipeContent;

/// Where `/` sends browsers.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build an error response with the shared body shape.
pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// All API routes, without documentation or tracing layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_redirect))
        .merge(recipes::router())
}

async fn root_redirect() -> Redirect {
    Redirect::temporary(&format!("{SWAGGER_UI_PATH}/"))
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Flavor Fusion API",
            description = "Create recipes and transform them with a generative model"
        ),
        components(schemas(ErrorResponse, RecipeContent))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![recipes::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
