//! Minimal typed client for the Flavor Fusion HTTP API.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use flavor_core::TransformedRecipe;
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePayload {
    pub title: String,
    pub ingredients: Value,
    pub instructions: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeResponse {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ListRecipesResponse {
    recipes: Vec<StoredRecipe>,
}

#[derive(Debug, Deserialize)]
struct TransformRecipeResponse {
    transformed_recipe: TransformedRecipe,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(server: &str) -> Self {
        Self {
            base_url: server.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn create_recipe(&self, payload: &RecipePayload) -> Result<CreateRecipeResponse> {
        let response = self
            .http
            .post(format!("{}/recipes", self.base_url))
            .json(payload)
            .send()
            .await
            .with_context(|| self.connection_hint())?;
        parse(response).await
    }

    pub async fn list_recipes(&self) -> Result<Vec<StoredRecipe>> {
        let response = self
            .http
            .get(format!("{}/recipes", self.base_url))
            .send()
            .await
            .with_context(|| self.connection_hint())?;
        let list: ListRecipesResponse = parse(response).await?;
        Ok(list.recipes)
    }

    pub async fn transform_recipe(&self, id: u64, label: &str) -> Result<TransformedRecipe> {
        let response = self
            .http
            .post(format!("{}/recipes/{}/transform", self.base_url, id))
            .query(&[("transformation_type", label)])
            .send()
            .await
            .with_context(|| self.connection_hint())?;
        let transformed: TransformRecipeResponse = parse(response).await?;
        Ok(transformed.transformed_recipe)
    }

    fn connection_hint(&self) -> String {
        format!(
            "Could not connect to the backend API at {}. Is it running?",
            self.base_url
        )
    }
}

/// Decode a success body, or turn the server's error body into an error.
async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.context("Failed to read response body")?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        bail!("Server responded with {}: {}", status, message);
    }

    serde_json::from_str(&body).with_context(|| format!("Unexpected response body: {}", body))
}
