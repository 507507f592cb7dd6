//! WebAssembly bindings for Totalraw.
//!
//! This module provides JavaScript-accessible functions over a JSON string API.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::data::parse_recipes;
use crate::index::ProductionIndex;
use crate::models::CostVariant;
use crate::resolver::RawCostResolver;

/// JavaScript-friendly input for a resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct JsResolveInput {
    /// Recipe data in the CSV format read by [`crate::data::parse_recipes`]
    pub csv: String,
    /// Name of the recipe to resolve
    pub recipe: String,
    #[serde(default)]
    pub variant: CostVariant,
}

/// One raw material entry.
#[derive(Debug, Clone, Serialize)]
pub struct JsRawAmount {
    pub item: String,
    pub amount: f64,
}

/// JavaScript-friendly resolution result.
#[derive(Debug, Clone, Serialize)]
pub struct JsResolveResult {
    pub success: bool,
    pub error: Option<String>,
    pub recipe: String,
    pub variant: CostVariant,
    pub time: f64,
    pub raw: Vec<JsRawAmount>,
}

impl JsResolveResult {
    fn failure(recipe: String, variant: CostVariant, error: String) -> Self {
        JsResolveResult {
            success: false,
            error: Some(error),
            recipe,
            variant,
            time: 0.0,
            raw: vec![],
        }
    }
}

fn run_resolve(input: JsResolveInput) -> JsResolveResult {
    let book = match parse_recipes(input.csv.as_bytes()) {
        Ok(book) => book,
        Err(e) => return JsResolveResult::failure(input.recipe, input.variant, format!("Invalid recipe data: {}", e)),
    };

    let index = match ProductionIndex::build(input.variant, book.recipes(input.variant).to_vec()) {
        Ok(index) => index,
        Err(e) => return JsResolveResult::failure(input.recipe, input.variant, e.to_string()),
    };

    match RawCostResolver::new(&index).resolve_by_name(&input.recipe) {
        Ok(costs) => JsResolveResult {
            success: true,
            error: None,
            time: costs.time(),
            raw: costs
                .items()
                .map(|(item, amount)| JsRawAmount {
                    item: item.to_string(),
                    amount,
                })
                .collect(),
            recipe: input.recipe,
            variant: input.variant,
        },
        Err(e) => JsResolveResult::failure(input.recipe, input.variant, e.to_string()),
    }
}

/// Resolve the total raw cost of one recipe.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn resolve_totals(input_json: &str) -> String {
    let result = match serde_json::from_str::<JsResolveInput>(input_json) {
        Ok(input) => run_resolve(input),
        Err(e) => JsResolveResult::failure(String::new(), CostVariant::Normal, format!("Invalid input: {}", e)),
    };
    serde_json::to_string(&result).unwrap_or_default()
}

/// Get the version of the resolver.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the sorted recipe names found in CSV recipe data.
/// Returns a JSON array, empty if the data cannot be parsed.
#[wasm_bindgen]
pub fn get_recipe_names(csv: &str) -> String {
    match parse_recipes(csv.as_bytes()) {
        Ok(book) => serde_json::to_string(&book.recipe_names()).unwrap_or_default(),
        Err(_) => "[]".to_string(),
    }
}
