//! Raw-cost resolution ("total raw") for recipes.
//!
//! Flattens a recipe's ingredient list into irreducible raw materials plus
//! total crafting time. Every ingredient that has a hand-craftable producer
//! is replaced by that producer's own flattened cost, scaled by
//! `required / produced_per_run`. Ingredients without a hand-craftable
//! producer (ores, fluids, machine-only intermediates) are counted as raw.
//!
//! Expansion runs on an explicit work stack rather than the call stack, so
//! deep production chains cannot overflow it. Recipes currently being
//! expanded are tracked; meeting one of them again is reported as a cycle.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::ResolveError;
use crate::index::ProductionIndex;
use crate::models::{Recipe, RawCostMap};

/// Resolves `recipe` against `index` with a fresh memo table.
///
/// `recipe` must come from the collection `index` was built over.
///
/// # Example
///
/// ```
/// use totalraw::index::ProductionIndex;
/// use totalraw::models::{CostVariant, Recipe};
/// use totalraw::resolver::resolve;
///
/// let index = ProductionIndex::build(
///     CostVariant::Normal,
///     vec![
///         Recipe::new("iron-gear-wheel", 0.5).with_input("iron-plate", 2).with_output("iron-gear-wheel", 1),
///         Recipe::new("iron-plate", 3.2).with_input("iron-ore", 1).with_output("iron-plate", 1),
///     ],
/// )
/// .unwrap();
///
/// let gear = index.recipe("iron-gear-wheel").unwrap();
/// let costs = resolve(gear, &index).unwrap();
/// assert!((costs.time() - 6.9).abs() < 1e-9);
/// assert_eq!(costs.item("iron-ore"), Some(2.0));
/// ```
pub fn resolve(recipe: &Recipe, index: &ProductionIndex) -> Result<RawCostMap, ResolveError> {
    RawCostResolver::new(index).resolve(recipe)
}

/// A recipe whose inputs are being walked.
struct Frame<'a> {
    recipe: &'a Recipe,
    next_input: usize,
    /// Scale applied to the child frame's result once it completes.
    pending_scale: f64,
    costs: RawCostMap,
}

impl<'a> Frame<'a> {
    fn new(recipe: &'a Recipe) -> Self {
        let mut costs = RawCostMap::new();
        costs.add_time(recipe.energy_required);
        Frame {
            recipe,
            next_input: 0,
            pending_scale: 0.0,
            costs,
        }
    }
}

/// Resolver bound to one production index.
///
/// Finished cost maps are memoized by recipe name for the lifetime of the
/// resolver, so a sub-recipe shared by many recipes is flattened once per
/// report run. Use one resolver per thread when resolving in parallel.
pub struct RawCostResolver<'a> {
    index: &'a ProductionIndex,
    memo: HashMap<String, RawCostMap>,
}

impl<'a> RawCostResolver<'a> {
    /// Creates a resolver with an empty memo table.
    pub fn new(index: &'a ProductionIndex) -> Self {
        RawCostResolver {
            index,
            memo: HashMap::new(),
        }
    }

    /// The index this resolver reads from.
    pub fn index(&self) -> &'a ProductionIndex {
        self.index
    }

    /// Flattens `recipe` into raw materials and total time.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::ForeignRecipe`] if `recipe` is not part of the
    ///   indexed collection.
    /// - [`ResolveError::ZeroYield`] if a selected producer yields zero of
    ///   the ingredient it was selected for.
    /// - [`ResolveError::Cycle`] if expansion loops back onto itself.
    pub fn resolve(&mut self, recipe: &Recipe) -> Result<RawCostMap, ResolveError> {
        let index = self.index;
        let own = index
            .recipe(&recipe.name)
            .filter(|own| *own == recipe)
            .ok_or_else(|| ResolveError::ForeignRecipe {
                recipe: recipe.name.clone(),
                variant: index.variant(),
            })?;
        self.expand(own)
    }

    /// Flattens the indexed recipe called `name`.
    pub fn resolve_by_name(&mut self, name: &str) -> Result<RawCostMap, ResolveError> {
        let index = self.index;
        let recipe = index.recipe(name).ok_or_else(|| ResolveError::UnknownRecipe {
            name: name.to_string(),
            variant: index.variant(),
        })?;
        self.expand(recipe)
    }

    /// Number of memoized recipes.
    pub fn cached(&self) -> usize {
        self.memo.len()
    }

    fn expand(&mut self, root: &'a Recipe) -> Result<RawCostMap, ResolveError> {
        if let Some(cached) = self.memo.get(&root.name) {
            return Ok(cached.clone());
        }

        let index = self.index;
        let mut stack = vec![Frame::new(root)];
        let mut active: HashSet<&'a str> = HashSet::from([root.name.as_str()]);

        while let Some(mut frame) = stack.pop() {
            let recipe = frame.recipe;

            let Some((item, count)) = recipe.inputs.get(frame.next_input) else {
                active.remove(recipe.name.as_str());
                debug!(recipe = %recipe.name, entries = frame.costs.len(), "resolved raw cost");
                self.memo.insert(recipe.name.clone(), frame.costs.clone());

                match stack.last_mut() {
                    Some(parent) => {
                        parent.costs.add_scaled(&frame.costs, parent.pending_scale);
                        parent.next_input += 1;
                        continue;
                    }
                    None => return Ok(frame.costs),
                }
            };

            let Some(producer) = index.first_hand_craftable_producer(item) else {
                frame.costs.add_item(item, f64::from(*count));
                frame.next_input += 1;
                stack.push(frame);
                continue;
            };

            let produced = producer.output_count(item).unwrap_or(0);
            if produced == 0 {
                return Err(ResolveError::ZeroYield {
                    producer: producer.name.clone(),
                    item: item.clone(),
                });
            }
            let scale = f64::from(*count) / f64::from(produced);

            if let Some(cached) = self.memo.get(&producer.name) {
                frame.costs.add_scaled(cached, scale);
                frame.next_input += 1;
                stack.push(frame);
                continue;
            }

            if active.contains(producer.name.as_str()) {
                let mut path: Vec<String> = stack
                    .iter()
                    .map(|f| f.recipe)
                    .chain([recipe])
                    .skip_while(|r| r.name != producer.name)
                    .map(|r| r.name.clone())
                    .collect();
                path.push(producer.name.clone());
                return Err(ResolveError::Cycle { path });
            }

            frame.pending_scale = scale;
            stack.push(frame);
            active.insert(producer.name.as_str());
            stack.push(Frame::new(producer));
        }

        unreachable!("work stack drained before '{}' completed", root.name)
    }
}
