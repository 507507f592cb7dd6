//! Error types for index construction and raw-cost resolution.

use crate::models::CostVariant;

/// Errors raised while building a [`ProductionIndex`](crate::index::ProductionIndex).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// The recipe collection was empty.
    #[error("cannot index an empty {variant} recipe collection")]
    Empty { variant: CostVariant },

    /// Two recipes in one collection share a name.
    #[error("duplicate recipe name '{name}' in {variant} recipes")]
    DuplicateName { variant: CostVariant, name: String },
}

/// Errors that abort a single raw-cost resolution.
///
/// None of these affect the index or other resolutions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// A hand-craftable producer declares zero output of the item it was
    /// selected for.
    #[error("recipe '{producer}' produces zero '{item}' per run")]
    ZeroYield { producer: String, item: String },

    /// Expansion revisited a recipe that is still being expanded.
    #[error("production cycle detected: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    /// The recipe is not part of the collection the index was built over.
    #[error("recipe '{recipe}' does not belong to the {variant} recipe collection")]
    ForeignRecipe { recipe: String, variant: CostVariant },

    /// No recipe with this name exists in the indexed collection.
    #[error("unknown recipe '{name}' in {variant} recipes")]
    UnknownRecipe { name: String, variant: CostVariant },
}
