mod client;
mod seed;
mod smoke;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flavor_core::ai::{AiConfig, GeminiClient};
use flavor_core::{TransformationKind, TransformedRecipe};
use serde_json::json;

use client::{ApiClient, RecipePayload};

const DEFAULT_SERVER: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(name = "flavor")]
#[command(about = "Flavor Fusion CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a recipe
    Create {
        /// Server URL (default: http://localhost:8000)
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
        #[arg(long)]
        title: String,
        /// Ingredients, one per line
        #[arg(long)]
        ingredients: String,
        #[arg(long)]
        instructions: String,
    },
    /// Print all stored recipes
    List {
        /// Server URL (default: http://localhost:8000)
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Ask the server to transform a stored recipe
    Transform {
        /// Server URL (default: http://localhost:8000)
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
        /// Recipe id, as returned by `create`
        id: u64,
        #[command(flatten)]
        transformation: TransformationArg,
    },
    /// Post a handful of sample recipes
    Seed {
        /// Server URL (default: http://localhost:8000)
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Run an end-to-end check against a running server
    Smoke {
        /// Server URL (default: http://localhost:8000)
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// List the models available to the configured API key
    Models,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TransformationArg {
    /// One of: Vegetarian, Vegan, Gluten-Free, Spicy, Low-Carb
    #[arg(long)]
    kind: Option<TransformationKind>,
    /// Any free-text transformation, e.g. "Keto"
    #[arg(long)]
    label: Option<String>,
}

impl TransformationArg {
    fn label(&self) -> String {
        // clap guarantees exactly one of the two is set.
        match self.kind {
            Some(kind) => kind.label().to_string(),
            None => self.label.clone().unwrap_or_default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    if let Some(warning) = dotenv_warning(&dotenv) {
        eprintln!("{}", warning);
    }
    let cli = Cli::parse();

    match cli.command {
        Commands::Create {
            server,
            title,
            ingredients,
            instructions,
        } => {
            create(&server, title, &ingredients, instructions).await?;
        }
        Commands::List { server } => {
            list(&server).await?;
        }
        Commands::Transform {
            server,
            id,
            transformation,
        } => {
            transform(&server, id, &transformation.label()).await?;
        }
        Commands::Seed { server } => {
            seed::seed(&server).await?;
        }
        Commands::Smoke { server } => {
            smoke::run(&server).await?;
        }
        Commands::Models => {
            models().await?;
        }
    }

    Ok(())
}

/// A missing `.env` is normal; anything else is worth reporting.
fn dotenv_warning<T>(result: &Result<T, dotenvy::Error>) -> Option<String> {
    match result {
        Err(e) if !e.not_found() => Some(format!("Warning: failed to load .env file: {}", e)),
        _ => None,
    }
}

/// Ingredients go out as typed; the server splits and trims them.
fn recipe_payload(title: String, ingredients: &str, instructions: String) -> RecipePayload {
    RecipePayload {
        title,
        ingredients: json!(ingredients),
        instructions,
    }
}

async fn create(
    server: &str,
    title: String,
    ingredients: &str,
    instructions: String,
) -> Result<()> {
    let created = ApiClient::new(server)
        .create_recipe(&recipe_payload(title, ingredients, instructions))
        .await?;

    println!("{} (id {})", created.message, created.id);
    Ok(())
}

async fn list(server: &str) -> Result<()> {
    let recipes = ApiClient::new(server).list_recipes().await?;

    if recipes.is_empty() {
        println!("No recipes yet.");
        return Ok(());
    }

    for (id, recipe) in recipes.iter().enumerate() {
        println!("[{}] {}", id, recipe.title);
        for ingredient in &recipe.ingredients {
            println!("    - {}", ingredient);
        }
        println!("    {}", recipe.instructions.replace('\n', "\n    "));
        println!();
    }

    Ok(())
}

async fn transform(server: &str, id: u64, label: &str) -> Result<()> {
    println!("Transforming recipe {} into a {} version...", id, label);

    let transformed = ApiClient::new(server).transform_recipe(id, label).await?;

    match render_transformed(&transformed) {
        Some(text) => println!("{}", text),
        // Not the usual three keys; show whatever the model sent.
        None => println!("{}", serde_json::to_string_pretty(&transformed)?),
    }
    Ok(())
}

/// Human-readable rendering, when the reply has all three expected keys.
fn render_transformed(recipe: &TransformedRecipe) -> Option<String> {
    let title = recipe.title()?;
    let ingredients = recipe.ingredients()?;
    let instructions = recipe.instructions()?;

    let mut out = format!("{}\n\nIngredients:\n", title);
    for ingredient in ingredients {
        out.push_str(&format!("  - {}\n", ingredient));
    }
    out.push_str(&format!("\nInstructions:\n{}", instructions));
    Some(out)
}

async fn models() -> Result<()> {
    let config = AiConfig::from_env().context("Failed to load AI configuration")?;
    let client = GeminiClient::new(config)?;

    println!("Models available to this key:");
    for id in client.list_models().await? {
        println!("  - {}", id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_transform(args: &[&str]) -> Result<TransformationArg, clap::Error> {
        let mut argv = vec!["flavor", "transform", "3"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv)?.command {
            Commands::Transform { transformation, .. } => Ok(transformation),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_transform_kind_uses_menu_label() {
        let arg = parse_transform(&["--kind", "gluten-free"]).unwrap();
        assert_eq!(arg.label(), "Gluten-Free");
    }

    #[test]
    fn test_transform_free_text_label() {
        let arg = parse_transform(&["--label", "Keto"]).unwrap();
        assert_eq!(arg.label(), "Keto");
    }

    #[test]
    fn test_transform_requires_exactly_one_choice() {
        assert!(parse_transform(&[]).is_err());
        assert!(parse_transform(&["--kind", "Vegan", "--label", "Keto"]).is_err());
        assert!(parse_transform(&["--kind", "Paleo"]).is_err());
    }

    #[test]
    fn test_create_sends_ingredient_text_as_typed() {
        let payload = recipe_payload(
            "Soup".to_string(),
            "Chicken\n\n  Broth ",
            "Boil.".to_string(),
        );
        assert_eq!(payload.ingredients, json!("Chicken\n\n  Broth "));
    }

    #[test]
    fn test_render_transformed_recipe() {
        let recipe: TransformedRecipe = serde_json::from_value(json!({
            "title": "Vegan Omelet",
            "ingredients": ["Tofu", "Nutritional yeast"],
            "instructions": "Crumble and fry."
        }))
        .unwrap();

        assert_eq!(
            render_transformed(&recipe).unwrap(),
            "Vegan Omelet\n\nIngredients:\n  - Tofu\n  - Nutritional yeast\n\nInstructions:\nCrumble and fry."
        );
    }

    #[test]
    fn test_render_falls_back_without_expected_keys() {
        let recipe: TransformedRecipe =
            serde_json::from_value(json!({"name": "Vegan Omelet"})).unwrap();
        assert!(render_transformed(&recipe).is_none());
    }

    #[test]
    fn test_dotenv_warning_ignores_missing_file() {
        let missing: Result<(), dotenvy::Error> = Err(dotenvy::Error::Io(std::io::Error::from(
            std::io::ErrorKind::NotFound,
        )));
        assert_eq!(dotenv_warning(&missing), None);
        assert_eq!(dotenv_warning(&Ok::<(), dotenvy::Error>(())), None);
    }

    #[test]
    fn test_dotenv_warning_reports_parse_errors() {
        let bad: Result<(), dotenvy::Error> =
            Err(dotenvy::Error::LineParse("NOT VALID".to_string(), 3));
        let warning = dotenv_warning(&bad).unwrap();
        assert!(warning.contains("failed to load .env"), "{warning}");
    }

    #[test]
    fn test_server_defaults_to_localhost() {
        let cli = Cli::try_parse_from(["flavor", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List { server } if server == DEFAULT_SERVER));
    }
}
