//! Recipe search proxy.
//!
//! Thin pass-through to the upstream recipe search API. The upstream
//! response is flattened to the compact records the browser UI consumes;
//! those same title/ingredient/step strings are what callers later
//! submit to the translation endpoint.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use recetario_core::{types::Recipe, Error, Result};

/// Fields requested from the upstream API.
const FIELDS: [&str; 6] = [
    "label",
    "ingredientLines",
    "instructionLines",
    "dishType",
    "calories",
    "image",
];

pub struct RecipeSearchClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: Secret<String>,
    default_limit: usize,
    max_limit: usize,
}

impl RecipeSearchClient {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        app_id: String,
        app_key: Secret<String>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        Self {
            http,
            base_url,
            app_id,
            app_key,
            default_limit,
            max_limit,
        }
    }

    /// Search recipes matching `query`, returning at most `limit` hits
    /// (clamped to the configured maximum).
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<Recipe>> {
        let limit = limit.unwrap_or(self.default_limit).min(self.max_limit);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("type", "public"),
                ("q", query),
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.expose_secret().as_str()),
            ])
            .query(&FIELDS.map(|field| ("field", field)))
            .send()
            .await
            .map_err(|e| Error::recipe_search(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::recipe_search(format!(
                "upstream status {}",
                response.status()
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::recipe_search(format!("invalid response: {e}")))?;

        Ok(parsed
            .hits
            .into_iter()
            .take(limit)
            .map(|hit| flatten(hit.recipe))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    recipe: UpstreamRecipe,
}

#[derive(Debug, Deserialize)]
struct UpstreamRecipe {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    label: String,
    #[serde(default, rename = "dishType")]
    dish_type: Vec<String>,
    #[serde(default, rename = "ingredientLines")]
    ingredient_lines: Vec<String>,
    #[serde(default, rename = "instructionLines")]
    instruction_lines: Vec<String>,
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    image: Option<String>,
}

fn flatten(recipe: UpstreamRecipe) -> Recipe {
    Recipe {
        id: recipe.uri,
        title: recipe.label,
        category: recipe
            .dish_type
            .into_iter()
            .next()
            .unwrap_or_else(|| "general".to_string()),
        ingredients: recipe.ingredient_lines,
        steps: recipe.instruction_lines,
        kcal: recipe.calories.map(|calories| calories.round() as u64),
        image: recipe.image,
    }
}
