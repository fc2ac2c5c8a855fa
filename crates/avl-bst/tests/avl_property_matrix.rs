use std::collections::BTreeMap;

use avl_bst::AvlTree;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

fn height_bound(n: usize) -> f64 {
    1.44 * ((n + 2) as f64).log2()
}

fn assert_matches_model(tree: &AvlTree<i32, i32>, model: &BTreeMap<i32, i32>) {
    tree.assert_valid().unwrap();
    assert_eq!(tree.len(), model.len());
    assert!(tree.iter().map(|(k, v)| (*k, *v)).eq(model.iter().map(|(k, v)| (*k, *v))));
    assert!((tree.height() as f64) <= height_bound(tree.len()));
}

#[test]
fn seeded_random_ladder_matches_btree_map() {
    for seed in 0..8u64 {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();
        for step in 0..2_000 {
            let key = rng.gen_range(0..400);
            if rng.gen_bool(0.55) {
                assert_eq!(tree.insert(key, step), model.insert(key, step));
            } else {
                assert_eq!(tree.remove(&key), model.remove(&key));
            }
            tree.assert_valid().unwrap();
        }
        assert_matches_model(&tree, &model);
    }
}

#[test]
fn sequential_patterns_stay_within_height_bound() {
    let patterns: Vec<Vec<i32>> = vec![
        (0..1_000).collect(),
        (0..1_000).rev().collect(),
        (0..500).flat_map(|i| [i, 999 - i]).collect(),
        (0..1_000).map(|i| (i * 7919) % 1_000).collect(),
    ];
    for keys in patterns {
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();
        for &k in &keys {
            tree.insert(k, k);
            model.insert(k, k);
        }
        assert_matches_model(&tree, &model);
        for &k in keys.iter().step_by(2) {
            tree.remove(&k);
            model.remove(&k);
        }
        assert_matches_model(&tree, &model);
    }
}

#[test]
fn freed_slots_are_reused() {
    let mut tree = AvlTree::new();
    for k in 0..64 {
        tree.insert(k, k);
    }
    for k in 0..32 {
        tree.remove(&k);
    }
    let ids: Vec<usize> = (100..132)
        .map(|k| {
            tree.insert(k, k);
            tree.find(&k).unwrap()
        })
        .collect();
    assert!(ids.iter().all(|&id| id < 64));
    tree.assert_valid().unwrap();
}

fn keys_and_removal_order() -> impl Strategy<Value = (Vec<i32>, Vec<i32>)> {
    prop::collection::vec(-500..500i32, 0..300).prop_flat_map(|keys| {
        let order = keys.clone();
        (Just(keys), Just(order).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn insert_all_then_remove_all_in_any_order((keys, order) in keys_and_removal_order()) {
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();
        for &k in &keys {
            prop_assert_eq!(tree.insert(k, k), model.insert(k, k));
        }
        prop_assert!(tree.assert_valid().is_ok());
        prop_assert_eq!(tree.len(), model.len());
        prop_assert!((tree.height() as f64) <= height_bound(tree.len()));

        for &k in &order {
            prop_assert_eq!(tree.remove(&k), model.remove(&k));
            prop_assert!(tree.assert_valid().is_ok());
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.root(), None);
    }

    #[test]
    fn inserting_a_pair_twice_is_idempotent(keys in prop::collection::vec(any::<i16>(), 1..100), pick in any::<prop::sample::Index>()) {
        let mut tree = AvlTree::new();
        for &k in &keys {
            tree.insert(k, i32::from(k));
        }
        let before = tree.print();
        let k = keys[pick.index(keys.len())];
        tree.insert(k, i32::from(k));
        prop_assert_eq!(tree.print(), before);
    }

    #[test]
    fn in_order_traversal_is_strictly_ascending(keys in prop::collection::vec(any::<i32>(), 0..200)) {
        let tree: AvlTree<i32, ()> = keys.iter().map(|&k| (k, ())).collect();
        let walked: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        prop_assert!(walked.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(tree.is_balanced());
    }
}
