//! Transformation prompt: rewrite a recipe in a requested style.

use crate::recipe::Recipe;

/// Prompt name used in logs.
pub const TRANSFORM_PROMPT_NAME: &str = "transform_recipe";

/// Render the transformation prompt for a recipe and a free-text label
/// such as "Vegetarian" or "extra smoky".
pub fn render_transform_prompt(recipe: &Recipe, transformation: &str) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| format!("  - {i}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a cooking assistant that transforms recipes. Convert the following recipe into a {transformation} version.

Original recipe:
- Title: {title}
- Ingredients:
{ingredients}
- Instructions: {instructions}

Respond with ONLY a JSON object, no other text, with exactly these three keys:
- "title": string
- "ingredients": list of strings, one ingredient per entry
- "instructions": string

Example shape: {{"title": "...", "ingredients": ["...", "..."], "instructions": "..."}}"#,
        transformation = transformation.trim(),
        title = recipe.title,
        ingredients = ingredients,
        instructions = recipe.instructions
    )
}
