//! End-to-end smoke test against a running server.

use anyhow::{ensure, Result};
use serde_json::json;

use crate::client::{ApiClient, RecipePayload};

pub async fn run(server: &str) -> Result<()> {
    let client = ApiClient::new(server);
    println!("Testing API at {}...\n", server);

    println!("1. GET /recipes (initial state)");
    let before = client.list_recipes().await?;
    println!("   SUCCESS: {} recipe(s)", before.len());

    println!("\n2. POST /recipes (adding data)");
    let created = client
        .create_recipe(&RecipePayload {
            title: "Test Omelet".to_string(),
            ingredients: json!(["Eggs", "Cheese", "Butter"]),
            instructions: "Whisk eggs, melt butter, cook.".to_string(),
        })
        .await?;
    println!("   SUCCESS: id={} ({})", created.id, created.message);
    ensure!(
        created.id == before.len() as u64,
        "expected id {} but server assigned {}",
        before.len(),
        created.id
    );

    println!("\n3. GET /recipes (after update)");
    let after = client.list_recipes().await?;
    ensure!(
        after.len() == before.len() + 1,
        "expected {} recipe(s), found {}",
        before.len() + 1,
        after.len()
    );
    let stored = &after[created.id as usize];
    ensure!(
        stored.title == "Test Omelet" && stored.ingredients == ["Eggs", "Cheese", "Butter"],
        "stored recipe does not match what was sent"
    );
    println!("   SUCCESS: retrieved {} recipe(s)", after.len());

    println!("\nSmoke test passed");
    Ok(())
}
