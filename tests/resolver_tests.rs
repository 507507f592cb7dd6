//! Tests for raw-cost resolution.

use totalraw::error::ResolveError;
use totalraw::index::ProductionIndex;
use totalraw::models::{CostKey, CostVariant, RawCostMap, Recipe};
use totalraw::resolver::{resolve, RawCostResolver};

fn index_of(recipes: Vec<Recipe>) -> ProductionIndex {
    ProductionIndex::build(CostVariant::Normal, recipes).expect("Failed to build index")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn gear_and_plate() -> ProductionIndex {
    index_of(vec![
        Recipe::new("gear", 0.5)
            .with_input("iron-plate", 2)
            .with_output("gear", 1),
        Recipe::new("iron-plate", 3.2)
            .with_input("iron-ore", 1)
            .with_output("iron-plate", 1),
    ])
}

#[test]
fn test_gear_end_to_end() {
    let index = gear_and_plate();
    let gear = index.recipe("gear").unwrap();

    let costs = resolve(gear, &index).expect("gear should resolve");

    assert_close(costs.time(), 6.9);
    assert_eq!(costs.item("iron-ore"), Some(2.0));
    assert_eq!(costs.item("iron-plate"), None, "hand-craftable plates are inlined");
    assert_eq!(costs.len(), 2);
}

#[test]
fn test_linear_scaling_two_levels() {
    let index = index_of(vec![
        Recipe::new("plate", 1.0).with_input("ore", 2).with_output("plate", 1),
        Recipe::new("gear", 0.0).with_input("plate", 2).with_output("gear", 1),
    ]);

    let plate = resolve(index.recipe("plate").unwrap(), &index).unwrap();
    let gear = resolve(index.recipe("gear").unwrap(), &index).unwrap();

    assert_close(gear.time(), 2.0 * plate.time());
    assert_eq!(gear.item("ore"), Some(4.0));
}

#[test]
fn test_fractional_yield_scaling() {
    // 3 cables from a recipe yielding 2 per run = 1.5 runs
    let index = index_of(vec![
        Recipe::new("copper-cable", 0.5)
            .with_input("copper-plate", 1)
            .with_output("copper-cable", 2),
        Recipe::new("circuit", 0.5)
            .with_input("iron-plate", 1)
            .with_input("copper-cable", 3)
            .with_output("circuit", 1),
    ]);

    let costs = resolve(index.recipe("circuit").unwrap(), &index).unwrap();

    assert_close(costs.time(), 1.25);
    assert_close(costs.item("copper-plate").unwrap(), 1.5);
    assert_eq!(costs.item("iron-plate"), Some(1.0));
}

#[test]
fn test_time_equals_energy_without_craftable_inputs() {
    let index = index_of(vec![Recipe::new("smelt", 3.2)
        .with_input("ore", 7)
        .with_output("plate", 1)
        .with_hand_craftable(false)]);

    let costs = resolve(index.recipe("smelt").unwrap(), &index).unwrap();

    assert_eq!(costs.time(), 3.2);
}

#[test]
fn test_raw_pass_through() {
    let index = index_of(vec![Recipe::new("wall", 0.5)
        .with_input("stone-brick", 5)
        .with_output("stone-wall", 1)]);

    let costs = resolve(index.recipe("wall").unwrap(), &index).unwrap();

    assert_eq!(costs.item("stone-brick"), Some(5.0));
}

#[test]
fn test_machine_only_producer_is_raw() {
    let index = index_of(vec![
        Recipe::new("plastic-bar", 1.0)
            .with_input("petroleum-gas", 20)
            .with_output("plastic-bar", 2)
            .with_hand_craftable(false),
        Recipe::new("advanced-circuit", 6.0)
            .with_input("plastic-bar", 2)
            .with_output("advanced-circuit", 1),
    ]);

    let costs = resolve(index.recipe("advanced-circuit").unwrap(), &index).unwrap();

    assert_eq!(costs.time(), 6.0);
    assert_eq!(costs.item("plastic-bar"), Some(2.0));
    assert_eq!(costs.item("petroleum-gas"), None);
}

#[test]
fn test_co_product_picks_first_hand_craftable() {
    let index = index_of(vec![
        Recipe::new("x-by-machine", 10.0)
            .with_input("a", 1)
            .with_output("x", 1)
            .with_hand_craftable(false),
        Recipe::new("x-by-hand", 1.0).with_input("b", 1).with_output("x", 1),
        Recipe::new("x-by-hand-later", 1.0).with_input("c", 1).with_output("x", 1),
        Recipe::new("consumer", 0.0).with_input("x", 1).with_output("y", 1),
    ]);

    let costs = resolve(index.recipe("consumer").unwrap(), &index).unwrap();

    assert_eq!(costs.item("b"), Some(1.0));
    assert_eq!(costs.item("a"), None);
    assert_eq!(costs.item("c"), None);
    assert_eq!(costs.time(), 1.0);
}

#[test]
fn test_two_recipe_cycle_is_rejected() {
    let index = index_of(vec![
        Recipe::new("a", 1.0).with_input("b", 1).with_output("a", 1),
        Recipe::new("b", 1.0).with_input("a", 1).with_output("b", 1),
    ]);

    let err = resolve(index.recipe("a").unwrap(), &index).unwrap_err();

    assert_eq!(
        err,
        ResolveError::Cycle {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()]
        }
    );
}

#[test]
fn test_cycle_path_starts_at_repeated_recipe() {
    let index = index_of(vec![
        Recipe::new("top", 1.0).with_input("mid", 1).with_output("top", 1),
        Recipe::new("mid", 1.0).with_input("low", 1).with_output("mid", 1),
        Recipe::new("low", 1.0).with_input("mid", 1).with_output("low", 1),
    ]);

    let err = resolve(index.recipe("top").unwrap(), &index).unwrap_err();

    match err {
        ResolveError::Cycle { path } => assert_eq!(path, vec!["mid", "low", "mid"]),
        other => panic!("expected cycle, got {:?}", other),
    }
}

#[test]
fn test_self_consuming_recipe_is_a_cycle() {
    let index = index_of(vec![Recipe::new("kovarex", 60.0)
        .with_input("u235", 40)
        .with_output("u235", 41)]);

    let err = resolve(index.recipe("kovarex").unwrap(), &index).unwrap_err();

    assert!(matches!(err, ResolveError::Cycle { .. }));
}

#[test]
fn test_zero_yield_fails_loudly() {
    let index = index_of(vec![
        Recipe::new("broken", 1.0).with_input("ore", 1).with_output("part", 0),
        Recipe::new("machine", 1.0).with_input("part", 3).with_output("machine", 1),
    ]);

    let err = resolve(index.recipe("machine").unwrap(), &index).unwrap_err();

    assert_eq!(
        err,
        ResolveError::ZeroYield {
            producer: "broken".to_string(),
            item: "part".to_string()
        }
    );
}

#[test]
fn test_foreign_recipe_is_rejected() {
    let index = gear_and_plate();
    let outsider = Recipe::new("pipe", 0.5).with_input("iron-plate", 1).with_output("pipe", 1);
    let imposter = Recipe::new("gear", 1.0).with_input("iron-plate", 4).with_output("gear", 1);

    assert!(matches!(
        resolve(&outsider, &index),
        Err(ResolveError::ForeignRecipe { .. })
    ));
    assert!(matches!(
        resolve(&imposter, &index),
        Err(ResolveError::ForeignRecipe { .. })
    ));
}

#[test]
fn test_equal_recipe_from_another_collection_is_accepted() {
    let index = gear_and_plate();
    let copy = index.recipe("gear").unwrap().clone();

    let costs = resolve(&copy, &index).unwrap();

    assert_eq!(costs.item("iron-ore"), Some(2.0));
}

#[test]
fn test_resolve_by_name_unknown() {
    let index = gear_and_plate();
    let mut resolver = RawCostResolver::new(&index);

    let err = resolver.resolve_by_name("rocket").unwrap_err();

    assert_eq!(
        err,
        ResolveError::UnknownRecipe {
            name: "rocket".to_string(),
            variant: CostVariant::Normal
        }
    );
}

#[test]
fn test_deterministic_and_memoized() {
    let index = index_of(vec![
        Recipe::new("plate", 3.2).with_input("ore", 1).with_output("plate", 1),
        Recipe::new("gear", 0.5).with_input("plate", 2).with_output("gear", 1),
        Recipe::new("belt", 0.5)
            .with_input("plate", 1)
            .with_input("gear", 1)
            .with_output("belt", 2),
        Recipe::new("splitter", 1.0)
            .with_input("belt", 4)
            .with_input("gear", 5)
            .with_output("splitter", 1),
    ]);
    let splitter = index.recipe("splitter").unwrap();

    let first = resolve(splitter, &index).unwrap();
    let second = resolve(splitter, &index).unwrap();
    assert_eq!(first, second);

    let mut resolver = RawCostResolver::new(&index);
    let memoized = resolver.resolve(splitter).unwrap();
    assert_eq!(resolver.cached(), 4);
    assert_eq!(resolver.resolve(splitter).unwrap(), memoized);
    assert_eq!(memoized, first);

    // belt run: 0.5 + 3.2 + (0.5 + 6.4) = 10.6 time, 3 ore; 2 runs for 4 belts
    // gears: 5 * (0.5 + 6.4) = 34.5 time, 10 ore
    assert_close(first.time(), 1.0 + 2.0 * 10.6 + 34.5);
    assert_close(first.item("ore").unwrap(), 2.0 * 3.0 + 10.0);
}

#[test]
fn test_failure_does_not_poison_resolver() {
    let index = index_of(vec![
        Recipe::new("a", 1.0).with_input("b", 1).with_output("a", 1),
        Recipe::new("b", 1.0).with_input("a", 1).with_output("b", 1),
        Recipe::new("plate", 3.2).with_input("ore", 1).with_output("plate", 1),
    ]);
    let mut resolver = RawCostResolver::new(&index);

    assert!(resolver.resolve_by_name("a").is_err());
    assert!(resolver.resolve_by_name("b").is_err());

    let plate = resolver.resolve_by_name("plate").unwrap();
    assert_eq!(plate.item("ore"), Some(1.0));
}

#[test]
fn test_zero_energy_chain_keeps_time_key() {
    let index = index_of(vec![
        Recipe::new("free", 0.0).with_input("dust", 1).with_output("free", 1),
        Recipe::new("also-free", 0.0).with_input("free", 2).with_output("also-free", 1),
    ]);

    let costs = resolve(index.recipe("also-free").unwrap(), &index).unwrap();

    assert_eq!(costs.get(&CostKey::Time), Some(0.0));
    assert_eq!(costs.item("dust"), Some(2.0));
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let depth = 50_000;
    let mut recipes = vec![Recipe::new("step-0", 1.0).with_input("ore", 1).with_output("item-0", 1)];
    for i in 1..depth {
        recipes.push(
            Recipe::new(format!("step-{}", i), 1.0)
                .with_input(format!("item-{}", i - 1), 1)
                .with_output(format!("item-{}", i), 1),
        );
    }
    let index = index_of(recipes);

    let costs = RawCostResolver::new(&index)
        .resolve_by_name(&format!("step-{}", depth - 1))
        .unwrap();

    assert_eq!(costs.time(), depth as f64);
    assert_eq!(costs.item("ore"), Some(1.0));
}

#[test]
fn test_no_residue_keys() {
    let index = gear_and_plate();
    let costs = resolve(index.recipe("gear").unwrap(), &index).unwrap();

    for (key, value) in costs.iter() {
        if *key != CostKey::Time {
            assert!(value > 0.0, "{} has non-positive amount {}", key, value);
        }
    }
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_index_is_send_and_sync() {
    assert_send_sync::<ProductionIndex>();
    assert_send_sync::<RawCostMap>();
}

#[test]
fn test_concurrent_resolution_matches_single_thread() {
    let index = index_of(vec![
        Recipe::new("copper-cable", 0.5)
            .with_input("copper-plate", 1)
            .with_output("copper-cable", 2),
        Recipe::new("circuit", 0.5)
            .with_input("iron-plate", 1)
            .with_input("copper-cable", 3)
            .with_output("circuit", 1),
        Recipe::new("advanced-circuit", 6.0)
            .with_input("circuit", 2)
            .with_input("plastic-bar", 2)
            .with_input("copper-cable", 4)
            .with_output("advanced-circuit", 1),
    ]);
    let expected = RawCostResolver::new(&index).resolve_by_name("advanced-circuit").unwrap();

    let results: Vec<RawCostMap> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| RawCostResolver::new(&index).resolve_by_name("advanced-circuit").unwrap()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(results.len(), 4);
    for costs in &results {
        assert_eq!(costs, &expected);
    }
    assert_close(expected.time(), 6.0 + 2.0 * 1.25 + 2.0 * 0.5);
    assert_close(expected.item("copper-plate").unwrap(), 5.0);
}
