//! Display names for items and recipes.
//!
//! The wiki uses hand-curated names ("Iron gear wheel", "Uranium-235") kept
//! in a JSON dictionary. Ids missing from the dictionary fall back to
//! [`default_display_name`] and are logged once, in dictionary syntax, so
//! they can be pasted into the file.

use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;

/// On-disk dictionary layouts: either the grouped wiki file or a flat map.
#[derive(Deserialize)]
#[serde(untagged)]
enum NamingFile {
    Grouped {
        #[serde(rename = "items and recipes")]
        items_and_recipes: HashMap<String, String>,
    },
    Flat(HashMap<String, String>),
}

/// Read-only id -> display name dictionary.
///
/// Ids that fall back to their default name are remembered so each one is
/// logged only once per dictionary.
#[derive(Debug, Default)]
pub struct NameMapping {
    names: HashMap<String, String>,
    missing: Mutex<BTreeSet<String>>,
}

impl Clone for NameMapping {
    fn clone(&self) -> Self {
        NameMapping {
            names: self.names.clone(),
            missing: Mutex::new(self.missing_ids().into_iter().collect()),
        }
    }
}

impl NameMapping {
    /// An empty dictionary; every id uses its default name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a dictionary from JSON.
    ///
    /// Accepts `{"iron-plate": "Iron plate"}` as well as the grouped form
    /// `{"items and recipes": {...}, "technologies": {...}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let names = match serde_json::from_str(json)? {
            NamingFile::Grouped { items_and_recipes } => items_and_recipes,
            NamingFile::Flat(names) => names,
        };
        Ok(NameMapping {
            names,
            ..Self::default()
        })
    }

    /// Loads a dictionary from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let json = fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Adds or replaces one entry.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Number of dictionary entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display name for `id`, falling back to [`default_display_name`].
    pub fn display_name(&self, id: &str) -> String {
        match self.names.get(id) {
            Some(name) => name.clone(),
            None => {
                let name = default_display_name(id);
                let first_miss = match self.missing.lock() {
                    Ok(mut missing) => missing.insert(id.to_string()),
                    Err(poisoned) => poisoned.into_inner().insert(id.to_string()),
                };
                if first_miss {
                    info!("\"{}\":\"{}\",", id, name);
                }
                name
            }
        }
    }

    /// Ids looked up so far that are not in the dictionary, sorted.
    pub fn missing_ids(&self) -> Vec<String> {
        match self.missing.lock() {
            Ok(missing) => missing.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Like [`display_name`](Self::display_name), but appends `", N"` when the
    /// name ends in a number so the wiki icon shows the tier.
    ///
    /// # Example
    ///
    /// ```
    /// use totalraw::names::NameMapping;
    ///
    /// let names = NameMapping::new();
    /// assert_eq!(names.icon_name("assembling-machine-2"), "Assembling machine 2, 2");
    /// assert_eq!(names.icon_name("iron-plate"), "Iron plate");
    /// ```
    pub fn icon_name(&self, id: &str) -> String {
        let name = self.display_name(id);
        let tier = name
            .split_whitespace()
            .last()
            .and_then(|word| word.parse::<i64>().ok());
        match tier {
            Some(tier) => format!("{}, {}", name, tier),
            None => name,
        }
    }
}

/// Formats an id the way the wiki names things by default: words separated
/// by spaces, only the first capitalized. Uranium isotopes keep their hyphen.
///
/// # Example
///
/// ```
/// use totalraw::names::default_display_name;
///
/// assert_eq!(default_display_name("iron-gear-wheel"), "Iron gear wheel");
/// assert_eq!(default_display_name("uranium-235"), "Uranium-235");
/// assert_eq!(default_display_name("uranium-fuel-cell"), "Uranium fuel cell");
/// ```
pub fn default_display_name(id: &str) -> String {
    let mut words = id.split('-');
    let first = words.next().unwrap_or_default();

    let mut chars = first.chars();
    let mut formatted: String = match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    let mut rest: Vec<&str> = words.collect();
    while rest.last().is_some_and(|word| word.is_empty()) {
        rest.pop();
    }
    if formatted == "Uranium" && rest.len() == 1 && rest[0].starts_with('2') {
        formatted.push('-');
        formatted.push_str(rest[0]);
        return formatted;
    }

    for word in rest {
        formatted.push(' ');
        formatted.push_str(word);
    }
    formatted
}
