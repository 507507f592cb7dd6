//! # Totalraw
//!
//! A command-line tool and library that writes wiki "total raw" infobox text
//! for a crafting game's recipes.
//!
//! For every recipe the tool prints its ingredients and the flattened cost of
//! one run: the irreducible raw materials plus total crafting time, found by
//! recursively substituting each ingredient that has a hand-craftable
//! producer recipe, scaled by that producer's yield.
//!
//! ## Modules
//!
//! - [`models`] - Recipes, cost variants and raw-cost maps
//! - [`index`] - Producer lookups over one recipe collection
//! - [`resolver`] - Raw-cost flattening
//! - [`error`] - Index and resolution errors
//! - [`data`] - CSV data loading functionality
//! - [`names`] - Display-name dictionary and default names
//! - [`display`] - Wiki line formatting and report output
//! - [`wasm`] - WebAssembly bindings over a JSON string API
//!
//! ## Example Usage
//!
//! ```no_run
//! use totalraw::{data::load_recipes, display::write_recipe_totals, names::NameMapping};
//! use std::path::Path;
//!
//! // Load both cost variants
//! let book = load_recipes(Path::new("data/recipes.csv")).unwrap();
//!
//! // One production index per variant
//! let indices = book.indices().unwrap();
//!
//! // Write the report for every recipe
//! let mut out = std::io::stdout().lock();
//! let summary = write_recipe_totals(&indices, &NameMapping::new(), &[], &mut out).unwrap();
//! eprintln!("{} recipes, {} failed", summary.recipes, summary.failures.len());
//! ```
//!
//! ## Producer Selection
//!
//! When several recipes produce the same item, the resolver inlines the
//! first hand-craftable one in data-file order. Machine-only producers are
//! never inlined; their products count as raw materials.

pub mod data;
pub mod display;
pub mod error;
pub mod index;
pub mod models;
pub mod names;
pub mod resolver;
pub mod wasm;
