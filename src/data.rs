//! Data loading functionality for Totalraw.
//!
//! Recipes for both cost variants live in one CSV file, one row per recipe:
//!
//! ```text
//! variant,name,energy_required,hand_craftable,inputs,outputs
//! normal,iron-gear-wheel,0.5,true,iron-plate:2,iron-gear-wheel:1
//! expensive,iron-gear-wheel,1,true,iron-plate:4,iron-gear-wheel:1
//! ```
//!
//! Ingredient and product lists are semicolon-separated `item:count` pairs.

use csv::ReaderBuilder;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::IndexError;
use crate::index::ProductionIndex;
use crate::models::{CostVariant, Recipe, RecipeRow};

/// The complete recipe data set: one collection per cost variant.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    /// Recipes of the normal variant, in file order
    pub normal: Vec<Recipe>,
    /// Recipes of the expensive variant, in file order
    pub expensive: Vec<Recipe>,
}

impl RecipeBook {
    /// The recipe collection for `variant`.
    pub fn recipes(&self, variant: CostVariant) -> &[Recipe] {
        match variant {
            CostVariant::Normal => &self.normal,
            CostVariant::Expensive => &self.expensive,
        }
    }

    /// Total number of recipes across both variants.
    pub fn len(&self) -> usize {
        self.normal.len() + self.expensive.len()
    }

    /// Returns `true` if neither variant has any recipe.
    pub fn is_empty(&self) -> bool {
        self.normal.is_empty() && self.expensive.is_empty()
    }

    /// Sorted union of recipe names across both variants.
    pub fn recipe_names(&self) -> BTreeSet<&str> {
        self.normal
            .iter()
            .chain(&self.expensive)
            .map(|recipe| recipe.name.as_str())
            .collect()
    }

    /// Builds a production index for every variant that has recipes.
    pub fn indices(&self) -> Result<Vec<ProductionIndex>, IndexError> {
        CostVariant::ALL
            .into_iter()
            .filter(|&variant| !self.recipes(variant).is_empty())
            .map(|variant| ProductionIndex::build(variant, self.recipes(variant).to_vec()))
            .collect()
    }
}

/// Parses a semicolon-separated `item:count` list (e.g., "iron-plate:2;copper-cable:3").
///
/// An empty string yields an empty list. Counts must be positive integers and
/// items may not repeat.
///
/// # Example
///
/// ```
/// use totalraw::data::parse_item_counts;
///
/// let pairs = parse_item_counts("iron-plate:2; copper-cable:3").unwrap();
/// assert_eq!(pairs, vec![("iron-plate".to_string(), 2), ("copper-cable".to_string(), 3)]);
/// assert!(parse_item_counts("").unwrap().is_empty());
/// assert!(parse_item_counts("iron-plate:0").is_err());
/// ```
pub fn parse_item_counts(field: &str) -> Result<Vec<(String, u32)>, Box<dyn Error>> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();

    for part in field.split(';').map(str::trim).filter(|part| !part.is_empty()) {
        let Some((item, count)) = part.rsplit_once(':') else {
            return Err(format!("expected 'item:count', got '{}'", part).into());
        };
        let item = item.trim();
        if item.is_empty() {
            return Err(format!("missing item name in '{}'", part).into());
        }
        let count: u32 = count
            .trim()
            .parse()
            .map_err(|e| format!("invalid count in '{}': {}", part, e))?;
        if count == 0 {
            return Err(format!("count must be positive in '{}'", part).into());
        }
        if !seen.insert(item.to_string()) {
            return Err(format!("item '{}' listed twice", item).into());
        }
        pairs.push((item.to_string(), count));
    }

    Ok(pairs)
}

fn recipe_from_row(row: RecipeRow) -> Result<(CostVariant, Recipe), Box<dyn Error>> {
    let variant: CostVariant = row.variant.parse()?;
    let with_context = |e: Box<dyn Error>| format!("recipe '{}': {}", row.name, e);

    if !row.energy_required.is_finite() || row.energy_required < 0.0 {
        return Err(format!(
            "recipe '{}': energy_required must be a non-negative number, got {}",
            row.name, row.energy_required
        )
        .into());
    }

    let inputs = parse_item_counts(&row.inputs).map_err(with_context)?;
    let outputs = parse_item_counts(&row.outputs).map_err(with_context)?;
    if outputs.is_empty() {
        return Err(format!("recipe '{}' has no outputs", row.name).into());
    }

    Ok((
        variant,
        Recipe {
            name: row.name,
            energy_required: row.energy_required,
            inputs,
            outputs,
            hand_craftable: row.hand_craftable,
        },
    ))
}

/// Parses recipe CSV data from any reader.
///
/// # Returns
///
/// A [`RecipeBook`] with each variant's recipes in row order, or an error if
/// a row is malformed or a recipe name repeats within one variant.
///
/// # CSV Format
///
/// Expected columns: `variant, name, energy_required, hand_craftable, inputs, outputs`
pub fn parse_recipes<R: Read>(reader: R) -> Result<RecipeBook, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut book = RecipeBook::default();
    let mut seen: HashSet<(CostVariant, String)> = HashSet::new();

    for result in rdr.deserialize() {
        let row: RecipeRow = result?;
        let (variant, recipe) = recipe_from_row(row)?;
        if !seen.insert((variant, recipe.name.clone())) {
            return Err(format!("duplicate {} recipe '{}'", variant, recipe.name).into());
        }
        match variant {
            CostVariant::Normal => book.normal.push(recipe),
            CostVariant::Expensive => book.expensive.push(recipe),
        }
    }

    Ok(book)
}

/// Loads recipe data from a CSV file.
///
/// # Arguments
///
/// * `path` - Path to the recipe CSV file
pub fn load_recipes(path: &Path) -> Result<RecipeBook, Box<dyn Error>> {
    let file = File::open(path)?;
    let book = parse_recipes(file)?;
    info!(
        path = %path.display(),
        normal = book.normal.len(),
        expensive = book.expensive.len(),
        "loaded recipes"
    );
    Ok(book)
}
