//! Producer lookups over one recipe collection.
//!
//! A [`ProductionIndex`] is built once per cost variant at the start of a
//! report run and answers "which recipes produce item X" in the order the
//! recipes were supplied. That order matters: the resolver inlines the
//! *first* hand-craftable producer it finds, so co-products resolve the same
//! way on every run.

use std::collections::HashMap;

use crate::error::IndexError;
use crate::models::{CostVariant, Recipe};

/// Read-only view over a fixed recipe collection.
#[derive(Debug, Clone)]
pub struct ProductionIndex {
    variant: CostVariant,
    recipes: Vec<Recipe>,
    by_name: HashMap<String, usize>,
    producers: HashMap<String, Vec<usize>>,
}

impl ProductionIndex {
    /// Indexes `recipes` for `variant`.
    ///
    /// # Errors
    ///
    /// Fails if the collection is empty or two recipes share a name.
    ///
    /// # Example
    ///
    /// ```
    /// use totalraw::index::ProductionIndex;
    /// use totalraw::models::{CostVariant, Recipe};
    ///
    /// let index = ProductionIndex::build(
    ///     CostVariant::Normal,
    ///     vec![Recipe::new("iron-plate", 3.2).with_input("iron-ore", 1).with_output("iron-plate", 1)],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(index.producers_of("iron-plate").count(), 1);
    /// assert_eq!(index.producers_of("iron-ore").count(), 0);
    /// ```
    pub fn build(variant: CostVariant, recipes: Vec<Recipe>) -> Result<Self, IndexError> {
        if recipes.is_empty() {
            return Err(IndexError::Empty { variant });
        }

        let mut by_name = HashMap::with_capacity(recipes.len());
        let mut producers: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, recipe) in recipes.iter().enumerate() {
            if by_name.insert(recipe.name.clone(), position).is_some() {
                return Err(IndexError::DuplicateName {
                    variant,
                    name: recipe.name.clone(),
                });
            }
            for (item, _) in &recipe.outputs {
                producers.entry(item.clone()).or_default().push(position);
            }
        }

        Ok(ProductionIndex {
            variant,
            recipes,
            by_name,
            producers,
        })
    }

    /// The cost variant this index was built over.
    pub fn variant(&self) -> CostVariant {
        self.variant
    }

    /// Every recipe whose outputs include `item`, in supply order.
    pub fn producers_of<'a>(&'a self, item: &str) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.producers
            .get(item)
            .into_iter()
            .flatten()
            .map(move |&position| &self.recipes[position])
    }

    /// The first hand-craftable producer of `item`, in supply order.
    ///
    /// Machine-only producers are skipped even when they come first.
    pub fn first_hand_craftable_producer(&self, item: &str) -> Option<&Recipe> {
        self.producers_of(item).find(|recipe| recipe.hand_craftable)
    }

    /// Looks up a recipe by name.
    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.by_name.get(name).map(|&position| &self.recipes[position])
    }

    /// Returns `true` if `recipe` is one of the indexed recipes.
    ///
    /// Matching is by name *and* content, so an expensive recipe is not
    /// mistaken for its normal namesake.
    pub fn contains(&self, recipe: &Recipe) -> bool {
        self.recipe(&recipe.name).is_some_and(|own| own == recipe)
    }

    /// All recipes, in supply order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of indexed recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Always `false` for a successfully built index.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
