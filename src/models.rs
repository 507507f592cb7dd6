//! Data models and structures for Totalraw.
//!
//! This module contains the core data structures used throughout the crate:
//! recipes, the two cost variants, and the flattened raw-cost map produced
//! by the resolver.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two independent recipe collections shipped by the game.
///
/// Each variant is indexed and resolved on its own; recipes from different
/// variants are never mixed within one resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostVariant {
    #[default]
    Normal,
    Expensive,
}

impl CostVariant {
    /// Both variants, in report order.
    pub const ALL: [CostVariant; 2] = [CostVariant::Normal, CostVariant::Expensive];

    /// Prefix used for this variant's infobox keys (`|recipe` vs `|expensive-recipe`).
    pub fn key_prefix(self) -> &'static str {
        match self {
            CostVariant::Normal => "",
            CostVariant::Expensive => "expensive-",
        }
    }
}

impl fmt::Display for CostVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostVariant::Normal => f.write_str("normal"),
            CostVariant::Expensive => f.write_str("expensive"),
        }
    }
}

impl FromStr for CostVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(CostVariant::Normal),
            "expensive" => Ok(CostVariant::Expensive),
            other => Err(format!("unknown cost variant '{}'", other)),
        }
    }
}

/// A transformation consuming input items and producing output items,
/// at a fixed crafting time per run.
///
/// Inputs and outputs keep the order they were loaded in; item keys within
/// each list are unique.
///
/// # Example
///
/// ```
/// use totalraw::models::Recipe;
///
/// let gear = Recipe::new("iron-gear-wheel", 0.5)
///     .with_input("iron-plate", 2)
///     .with_output("iron-gear-wheel", 1);
///
/// assert_eq!(gear.output_count("iron-gear-wheel"), Some(1));
/// assert_eq!(gear.input_count("iron-plate"), Some(2));
/// assert!(gear.hand_craftable);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Unique name within its collection (e.g., "iron-gear-wheel")
    pub name: String,
    /// Crafting time for one run, in game seconds
    pub energy_required: f64,
    /// Required items and their counts per run
    pub inputs: Vec<(String, u32)>,
    /// Produced items and their counts per run
    pub outputs: Vec<(String, u32)>,
    /// Whether this recipe may be inlined when flattening an ingredient
    pub hand_craftable: bool,
}

impl Recipe {
    /// Creates a hand-craftable recipe with no inputs or outputs yet.
    pub fn new(name: impl Into<String>, energy_required: f64) -> Self {
        Recipe {
            name: name.into(),
            energy_required,
            inputs: Vec::new(),
            outputs: Vec::new(),
            hand_craftable: true,
        }
    }

    /// Adds an ingredient.
    pub fn with_input(mut self, item: impl Into<String>, count: u32) -> Self {
        self.inputs.push((item.into(), count));
        self
    }

    /// Adds a product.
    pub fn with_output(mut self, item: impl Into<String>, count: u32) -> Self {
        self.outputs.push((item.into(), count));
        self
    }

    /// Marks the recipe as machine-only (or hand-craftable again).
    pub fn with_hand_craftable(mut self, hand_craftable: bool) -> Self {
        self.hand_craftable = hand_craftable;
        self
    }

    /// Number of `item` consumed per run, if it is an ingredient.
    pub fn input_count(&self, item: &str) -> Option<u32> {
        self.inputs.iter().find(|(name, _)| name == item).map(|(_, count)| *count)
    }

    /// Number of `item` produced per run, if it is a product.
    pub fn output_count(&self, item: &str) -> Option<u32> {
        self.outputs.iter().find(|(name, _)| name == item).map(|(_, count)| *count)
    }

    /// Returns `true` if running this recipe yields `item`.
    pub fn produces(&self, item: &str) -> bool {
        self.outputs.iter().any(|(name, _)| name == item)
    }
}

/// Key of a [`RawCostMap`] entry.
///
/// `Time` sorts before every item so it always leads when iterating.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CostKey {
    /// Accumulated crafting time
    Time,
    /// An irreducible raw material
    Item(String),
}

impl fmt::Display for CostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostKey::Time => f.write_str("Time"),
            CostKey::Item(name) => f.write_str(name),
        }
    }
}

/// Flattened cost of one recipe run: raw materials plus total crafting time.
///
/// The time key is always present. Item keys are only created when a
/// quantity is actually added, so a map never carries zero-valued items.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCostMap {
    entries: BTreeMap<CostKey, f64>,
}

impl Default for RawCostMap {
    fn default() -> Self {
        Self::new()
    }
}

impl RawCostMap {
    /// An empty map with zero accumulated time.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(CostKey::Time, 0.0);
        RawCostMap { entries }
    }

    /// Accumulated crafting time.
    pub fn time(&self) -> f64 {
        self.entries.get(&CostKey::Time).copied().unwrap_or(0.0)
    }

    /// Accumulated quantity of a raw item, if any.
    pub fn item(&self, item: &str) -> Option<f64> {
        self.entries.get(&CostKey::Item(item.to_string())).copied()
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &CostKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Adds `amount` to `key`, creating the entry if needed.
    ///
    /// Zero amounts never create item entries.
    pub fn add(&mut self, key: CostKey, amount: f64) {
        if amount == 0.0 && key != CostKey::Time {
            return;
        }
        *self.entries.entry(key).or_insert(0.0) += amount;
    }

    /// Adds crafting time.
    pub fn add_time(&mut self, amount: f64) {
        self.add(CostKey::Time, amount);
    }

    /// Adds a raw item quantity.
    pub fn add_item(&mut self, item: &str, amount: f64) {
        self.add(CostKey::Item(item.to_string()), amount);
    }

    /// Adds every entry of `other`, multiplied by `scale`, key-wise into `self`.
    pub fn add_scaled(&mut self, other: &RawCostMap, scale: f64) {
        for (key, value) in &other.entries {
            self.add(key.clone(), value * scale);
        }
    }

    /// All entries, time first, then items by id.
    pub fn iter(&self) -> impl Iterator<Item = (&CostKey, f64)> + '_ {
        self.entries.iter().map(|(key, value)| (key, *value))
    }

    /// Raw item entries sorted by id, excluding time.
    pub fn items(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().filter_map(|(key, value)| match key {
            CostKey::Item(name) => Some((name.as_str(), *value)),
            CostKey::Time => None,
        })
    }

    /// Number of entries, including time.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the time key is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for the recipe data file.
///
/// `inputs` and `outputs` hold semicolon-separated `item:count` pairs.
#[derive(Debug, Deserialize)]
pub struct RecipeRow {
    /// Cost variant ("normal" or "expensive")
    pub variant: String,
    /// Recipe name
    pub name: String,
    /// Crafting time per run
    pub energy_required: f64,
    /// Whether the recipe can be crafted by hand
    pub hand_craftable: bool,
    /// Ingredients, e.g. "iron-plate:2;copper-cable:3"
    #[serde(default)]
    pub inputs: String,
    /// Products, e.g. "iron-gear-wheel:1"
    pub outputs: String,
}
