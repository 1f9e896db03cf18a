use anyhow::{Context, Result};
use serde_json::json;

use crate::client::{ApiClient, RecipePayload};

struct SeedRecipe {
    title: &'static str,
    ingredients: &'static [&'static str],
    instructions: &'static str,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "Chicken Tikka Masala",
        ingredients: &[
            "800 g chicken thighs, boneless and skinless",
            "1 cup yogurt",
            "2 tbsp garam masala",
            "1 tsp cumin",
            "2 large onions, diced",
            "4 cloves garlic, minced",
            "2 inch ginger, grated",
            "400 g tomato puree",
            "1 cup heavy cream",
            "cilantro, for garnish",
        ],
        instructions: "1. Marinate chicken in yogurt, garam masala, cumin, and salt for at least 2 hours.
2. Grill or broil marinated chicken until charred and cooked through.
3. In a large pan, saute onions until golden, then add garlic and ginger.
4. Add tomato puree, cream, and spices. Simmer for 15 minutes.
5. Add the chicken and simmer together for 10 minutes.
6. Garnish with fresh cilantro and serve with basmati rice or naan.",
    },
    SeedRecipe {
        title: "Banana Bread",
        ingredients: &[
            "3 large ripe bananas",
            "1/3 cup butter, melted",
            "3/4 cup sugar",
            "1 large egg",
            "1 tsp vanilla extract",
            "1 tsp baking soda",
            "1/4 tsp salt",
            "1.5 cups all-purpose flour",
        ],
        instructions: "1. Preheat oven to 350°F (175°C). Grease a 9x5 inch loaf pan.
2. Mash bananas in a large bowl until smooth.
3. Mix in melted butter, then sugar, egg, and vanilla.
4. Stir in baking soda and salt, then fold in flour until just combined.
5. Bake for 55-65 minutes until a toothpick comes out clean.",
    },
    SeedRecipe {
        title: "Thai Green Curry",
        ingredients: &[
            "3 tbsp green curry paste",
            "400 ml coconut milk",
            "500 g chicken breast, sliced",
            "1 cup Thai eggplant, quartered",
            "1/2 cup bamboo shoots",
            "2 tbsp fish sauce",
            "1 tbsp palm sugar",
            "1 cup Thai basil",
            "1 lime, juiced",
        ],
        instructions: "1. Fry the curry paste in oil for 1 minute until fragrant.
2. Add coconut milk and bring to a simmer.
3. Add chicken and cook until nearly done.
4. Add vegetables and simmer until tender-crisp.
5. Season with fish sauce, palm sugar, and lime juice.
6. Stir in Thai basil and serve over jasmine rice.",
    },
    SeedRecipe {
        title: "Classic Pancakes",
        ingredients: &[
            "1.5 cups all-purpose flour",
            "3.5 tsp baking powder",
            "1 tbsp sugar",
            "1/4 tsp salt",
            "1.25 cups milk",
            "1 large egg",
            "3 tbsp butter, melted",
        ],
        instructions: "1. Whisk the dry ingredients together.
2. Make a well and pour in milk, egg, and melted butter. Mix until smooth.
3. Pour 1/4 cup batter per pancake onto a hot griddle.
4. Flip when bubbles form and cook until golden.",
    },
];

/// Post the sample recipes to a running server.
pub async fn seed(server: &str) -> Result<()> {
    let client = ApiClient::new(server);

    println!("Creating {} sample recipes...", SAMPLE_RECIPES.len());

    for recipe in SAMPLE_RECIPES {
        let created = client
            .create_recipe(&RecipePayload {
                title: recipe.title.to_string(),
                ingredients: json!(recipe.ingredients),
                instructions: recipe.instructions.to_string(),
            })
            .await
            .with_context(|| format!("Failed to create recipe '{}'", recipe.title))?;

        println!("  Created: {} (id {})", recipe.title, created.id);
    }

    println!();
    println!("{}", "=".repeat(50));
    println!("SEED DATA COMPLETE");
    println!("{}", "=".repeat(50));
    println!("Base URL: {}", server);
    println!("{}", "=".repeat(50));

    Ok(())
}
