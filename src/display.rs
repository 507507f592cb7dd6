//! Display and formatting utilities for Totalraw.
//!
//! This module turns recipes and their resolved raw costs into wiki infobox
//! lines and writes the complete recipes-totals report.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::error::ResolveError;
use crate::index::ProductionIndex;
use crate::models::{CostVariant, RawCostMap, Recipe};
use crate::names::NameMapping;
use crate::resolver::RawCostResolver;

/// Formats a number for the wiki: whole values print without a fraction.
///
/// # Example
///
/// ```
/// use totalraw::display::format_number;
///
/// assert_eq!(format_number(2.0), "2");
/// assert_eq!(format_number(6.9), "6.9");
/// assert_eq!(format_number(0.25), "0.25");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Formats a recipe as `Time, E + Ingredient, n + ... [= Product, n + ...]`.
///
/// Ingredients and products are sorted by id. The product part is only
/// written when the recipe makes something other than exactly one unit of a
/// single item.
pub fn format_recipe_line(recipe: &Recipe, names: &NameMapping) -> String {
    let mut line = format!("Time, {}", format_number(recipe.energy_required));

    let mut inputs: Vec<&(String, u32)> = recipe.inputs.iter().collect();
    inputs.sort_by(|a, b| a.0.cmp(&b.0));
    for (item, count) in inputs {
        line.push_str(&format!(" + {}, {}", names.display_name(item), count));
    }

    let single_unit = recipe.outputs.len() == 1 && recipe.outputs[0].1 == 1;
    if !single_unit {
        let mut outputs: Vec<&(String, u32)> = recipe.outputs.iter().collect();
        outputs.sort_by(|a, b| a.0.cmp(&b.0));
        let products: Vec<String> = outputs
            .into_iter()
            .map(|(item, count)| format!("{}, {}", names.display_name(item), count))
            .collect();
        line.push_str(" = ");
        line.push_str(&products.join(" + "));
    }

    line
}

/// Formats a raw-cost map as `Time, T + Raw item, q + ...`, items sorted by id.
pub fn format_total_raw_line(costs: &RawCostMap, names: &NameMapping) -> String {
    let mut line = format!("Time, {}", format_number(costs.time()));
    for (item, amount) in costs.items() {
        line.push_str(&format!(" + {}, {}", names.display_name(item), format_number(amount)));
    }
    line
}

/// A recipe that could not be resolved in one cost variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFailure {
    pub recipe: String,
    pub variant: CostVariant,
    pub error: ResolveError,
}

/// Outcome of writing a report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    /// Recipe entries written
    pub recipes: usize,
    /// Successful resolutions, counted per variant
    pub resolved: usize,
    /// Resolutions that failed; their total-raw line was skipped
    pub failures: Vec<ReportFailure>,
    /// Selected recipe names found in no variant
    pub unmatched: Vec<String>,
}

/// Writes the recipes-totals report.
///
/// For every recipe name across `indices` (sorted), writes its display name
/// and then, per variant the recipe exists in, the `|recipe` and
/// `|total-raw` lines (prefixed `expensive-` for the expensive variant),
/// followed by a blank line. When `selected` is non-empty only those recipes
/// are written; selected names that match no recipe are logged and listed
/// in [`ReportSummary::unmatched`].
///
/// A recipe that fails to resolve keeps its recipe line, loses its total
/// line, and is recorded in the returned summary; the report carries on.
pub fn write_recipe_totals<W: Write>(
    indices: &[ProductionIndex],
    names: &NameMapping,
    selected: &[String],
    out: &mut W,
) -> io::Result<ReportSummary> {
    let mut resolvers: Vec<RawCostResolver<'_>> = indices.iter().map(RawCostResolver::new).collect();
    resolvers.sort_by_key(|resolver| resolver.index().variant());

    let mut recipe_names: Vec<&str> = indices
        .iter()
        .flat_map(|index| index.recipes())
        .map(|recipe| recipe.name.as_str())
        .filter(|name| selected.is_empty() || selected.iter().any(|s| s == name))
        .collect();
    recipe_names.sort_unstable();
    recipe_names.dedup();

    let mut summary = ReportSummary::default();

    for name in selected {
        if !indices.iter().any(|index| index.recipe(name).is_some()) {
            warn!(recipe = %name, "selected recipe not found in any variant");
            summary.unmatched.push(name.clone());
        }
    }

    for name in recipe_names {
        writeln!(out, "{}", names.display_name(name))?;

        for resolver in resolvers.iter_mut() {
            let index = resolver.index();
            let Some(recipe) = index.recipe(name) else {
                continue;
            };
            let variant = index.variant();
            let prefix = variant.key_prefix();

            writeln!(out, "|{}recipe = {}", prefix, format_recipe_line(recipe, names))?;

            match resolver.resolve(recipe) {
                Ok(costs) => {
                    writeln!(out, "|{}total-raw = {}", prefix, format_total_raw_line(&costs, names))?;
                    summary.resolved += 1;
                }
                Err(error) => {
                    warn!(recipe = name, %variant, %error, "skipping total raw");
                    summary.failures.push(ReportFailure {
                        recipe: name.to_string(),
                        variant,
                        error,
                    });
                }
            }
        }

        writeln!(out)?;
        summary.recipes += 1;
    }

    info!(
        recipes = summary.recipes,
        resolved = summary.resolved,
        failed = summary.failures.len(),
        "recipe totals written"
    );
    Ok(summary)
}
