use core::fmt::Debug;
use alloc::{vec, vec::Vec, string::{String, ToString}};
use crate::storage::{Storage, SparseVecDeque};
use super::*;

type Tree = SparseVecAvlTree<i64, String>;

fn tree_with(keys: &[i64]) -> Tree {
    let mut tree = Tree::new();
    for &key in keys {
        tree.insert(key, Some(key.to_string())).unwrap();
    }
    tree
}

/// Walks the whole tree and asserts every structural invariant: BST ordering,
/// AVL balance, cached height correctness, parent/child link symmetry, the
/// min-cache equation and the length bookkeeping.
fn validate_tree_structure<K, V, Ix, S>(tree: &AvlTree<K, V, Ix, S>)
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
    K: Ord + Copy + Debug,
{
    let total = tree.root().map_or(0, |root| {
        assert!(root.is_root());
        validate_node(&root, None, None).1
    });
    assert_eq!(total, tree.len(), "node count disagrees with len()");
    assert_eq!(tree.is_empty(), total == 0);

    let leftmost = tree.root().map(|mut node| {
        while let Some(left) = node.left_child() {
            node = left;
        }
        node.key()
    });
    assert_eq!(
        tree.min_node().map(|node| node.key()),
        leftmost,
        "cached minimum disagrees with the leftmost walk",
    );
}

/// Returns (height, node count) of the subtree while asserting its invariants.
fn validate_node<K, V, Ix, S>(
    node: &NodeRef<'_, K, V, Ix, S>,
    lower: Option<K>,
    upper: Option<K>,
) -> (usize, usize)
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
    K: Ord + Copy + Debug,
{
    let key = node.key();
    if let Some(lower) = lower {
        assert!(key > lower, "BST ordering violated: {:?} <= {:?}", key, lower);
    }
    if let Some(upper) = upper {
        assert!(key < upper, "BST ordering violated: {:?} >= {:?}", key, upper);
    }
    let (left_height, left_count) = node.left_child().map_or((0, 0), |child| {
        assert_eq!(
            child.parent().map(|parent| parent.raw_index().clone()),
            Some(node.raw_index().clone()),
            "parent link of the left child of {:?} is wrong",
            key,
        );
        validate_node(&child, lower, Some(key))
    });
    let (right_height, right_count) = node.right_child().map_or((0, 0), |child| {
        assert_eq!(
            child.parent().map(|parent| parent.raw_index().clone()),
            Some(node.raw_index().clone()),
            "parent link of the right child of {:?} is wrong",
            key,
        );
        validate_node(&child, Some(key), upper)
    });
    let height = 1 + left_height.max(right_height);
    assert_eq!(node.height(), height, "cached height at {:?} is stale", key);
    let balance = left_height as isize - right_height as isize;
    assert!(
        balance.abs() <= 1,
        "balance factor {} at {:?} violates the AVL invariant",
        balance,
        key,
    );
    (height, 1 + left_count + right_count)
}

fn ascending_keys(tree: &Tree) -> Vec<i64> {
    tree.ascend().map(|node| node.key()).collect()
}

/// (key, parent key, height) for every node, in ascending key order.
fn shape(tree: &Tree) -> Vec<(i64, Option<i64>, usize)> {
    tree.ascend()
        .map(|node| {
            (
                node.key(),
                node.parent().map(|parent| parent.key()),
                node.height(),
            )
        })
        .collect()
}

#[test]
fn empty_tree() {
    let tree = Tree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert!(tree.root().is_none());
    assert!(tree.min_node().is_none());
    assert!(tree.max_node().is_none());
    assert!(tree.search(1).is_none());
    assert_eq!(tree.map_succ(&mut [0; 4]), 0);
    assert_eq!(tree.ascend().count(), 0);
    validate_tree_structure(&tree);
}

#[test]
fn basic_insert_search() {
    let mut tree = Tree::new();
    tree.insert(2, Some("two".to_string())).unwrap();
    tree.insert(1, None).unwrap();
    tree.insert(3, Some("three".to_string())).unwrap();

    assert_eq!(tree.len(), 3);
    assert!(!tree.is_empty());
    assert!(tree.contains_key(1) && tree.contains_key(2) && tree.contains_key(3));
    assert!(!tree.contains_key(0) && !tree.contains_key(4));

    assert_eq!(tree.search(2).unwrap().key(), 2);
    assert_eq!(tree.get(2).map(String::as_str), Some("two"));
    // Key present, but no payload attached.
    assert!(tree.search(1).unwrap().payload().is_none());
    assert_eq!(tree.get(1), None);

    validate_tree_structure(&tree);
}

#[test]
fn removal_returns_the_payload() {
    let mut tree = tree_with(&[5, 2, 8]);
    assert_eq!(tree.remove(2), Some(Some("2".to_string())));
    assert_eq!(tree.remove(2), None);
    assert_eq!(tree.len(), 2);
    let mut payloadless = Tree::new();
    payloadless.insert(1, None).unwrap();
    assert_eq!(payloadless.remove(1), Some(None));
    assert!(payloadless.is_empty());
    validate_tree_structure(&tree);
    validate_tree_structure(&payloadless);
}

#[test]
fn duplicate_insert_is_a_noop() {
    let mut tree = tree_with(&[4, 2, 6, 1, 3, 5, 7]);
    let shape_before = shape(&tree);
    // Payload identity, not just equality: the stored string must not be replaced.
    let payload_ptr_before = tree.search(4).unwrap().payload().unwrap().as_ptr();

    let rejected = tree.insert(4, Some("different".to_string())).unwrap_err();
    assert_eq!(rejected.into_payload().as_deref(), Some("different"));

    assert_eq!(shape(&tree), shape_before);
    let payload_ptr_after = tree.search(4).unwrap().payload().unwrap().as_ptr();
    assert_eq!(payload_ptr_before, payload_ptr_after);
    assert_eq!(tree.get(4).map(String::as_str), Some("4"));
    validate_tree_structure(&tree);
}

#[test]
fn duplicate_insert_of_the_root_key_keeps_the_tree() {
    let mut tree = tree_with(&[10, 20, 30]);
    let root_key = tree.root().unwrap().key();
    assert!(tree.insert(root_key, None).is_err());
    assert_eq!(tree.len(), 3);
    assert_eq!(ascending_keys(&tree), [10, 20, 30]);
    validate_tree_structure(&tree);
}

#[test]
fn ascending_run_triggers_a_single_rotation() {
    let tree = tree_with(&[10, 20, 30]);
    let root = tree.root().unwrap();
    assert_eq!(root.key(), 20);
    assert_eq!(root.height(), 2);
    assert_eq!(root.left_child().unwrap().key(), 10);
    assert_eq!(root.right_child().unwrap().key(), 30);
    assert!(root.left_child().unwrap().is_leaf());
    assert!(root.right_child().unwrap().is_leaf());
    validate_tree_structure(&tree);
}

#[test]
fn descending_run_triggers_a_single_rotation() {
    let tree = tree_with(&[30, 20, 10]);
    let root = tree.root().unwrap();
    assert_eq!(root.key(), 20);
    assert_eq!(root.height(), 2);
    validate_tree_structure(&tree);
}

#[test]
fn zig_zag_runs_trigger_double_rotations() {
    // Left child is right-heavy: left-right double rotation.
    let tree = tree_with(&[30, 10, 20]);
    assert_eq!(tree.root().unwrap().key(), 20);
    validate_tree_structure(&tree);
    // Right child is left-heavy: right-left double rotation.
    let tree = tree_with(&[10, 30, 20]);
    assert_eq!(tree.root().unwrap().key(), 20);
    validate_tree_structure(&tree);
}

#[test]
fn removing_the_root_of_a_three_node_tree() {
    let mut tree = tree_with(&[10, 20, 30]);
    assert_eq!(tree.remove(20), Some(Some("20".to_string())));
    assert_eq!(tree.len(), 2);
    assert_eq!(ascending_keys(&tree), [10, 30]);
    // The predecessor took the root's place.
    assert_eq!(tree.root().unwrap().key(), 10);
    assert_eq!(tree.root().unwrap().right_child().unwrap().key(), 30);
    validate_tree_structure(&tree);
}

#[test]
fn nine_key_scenario() {
    let mut tree = tree_with(&[5, 3, 8, 1, 4, 7, 9, 2, 6]);
    validate_tree_structure(&tree);

    let mut keys = [0; 9];
    assert_eq!(tree.map_succ(&mut keys), 9);
    assert_eq!(keys, [1, 2, 3, 4, 5, 6, 7, 8, 9]);

    assert_eq!(tree.remove(5), Some(Some("5".to_string())));
    validate_tree_structure(&tree);

    let mut keys = [0; 8];
    assert_eq!(tree.map_succ(&mut keys), 8);
    assert_eq!(keys, [1, 2, 3, 4, 6, 7, 8, 9]);
}

#[test]
fn map_succ_prefixes() {
    let tree = tree_with(&[5, 3, 8, 1, 4, 7, 9, 2, 6]);

    // A short buffer receives exactly the smallest keys.
    let mut keys = [0; 4];
    assert_eq!(tree.map_succ(&mut keys), 4);
    assert_eq!(keys, [1, 2, 3, 4]);

    // An oversized buffer receives every key and reports the true count.
    let mut keys = [0; 16];
    assert_eq!(tree.map_succ(&mut keys), 9);
    assert_eq!(&keys[..9], &[1, 2, 3, 4, 5, 6, 7, 8, 9][..]);
    assert_eq!(&keys[9..], &[0; 7][..]);

    // An empty buffer is a silent zero.
    assert_eq!(tree.map_succ(&mut []), 0);
}

#[test]
fn map_in_order_stays_inside_the_subtree() {
    let tree = tree_with(&[5, 3, 8, 1, 4, 7, 9, 2, 6]);
    let root = tree.root().unwrap();
    let left = root.left_child().unwrap();

    let mut keys = [0; 9];
    let written = left.map_in_order(&mut keys);
    // Only keys below the root, never ancestors or the right subtree.
    assert_eq!(&keys[..written], &[1, 2, 3, 4][..]);

    let mut truncated = [0; 2];
    assert_eq!(left.map_in_order(&mut truncated), 2);
    assert_eq!(truncated, [1, 2]);

    assert_eq!(root.map_in_order(&mut []), 0);
}

#[test]
fn map_succ_from_the_minimum_node() {
    let tree = tree_with(&[5, 3, 8, 1, 4, 7, 9, 2, 6]);
    let min = tree.min_node().unwrap();
    assert_eq!(min.key(), 1);
    let mut keys = [0; 9];
    assert_eq!(min.map_succ(&mut keys), 9);
    assert_eq!(keys, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn min_cache_follows_mutations() {
    let mut tree = Tree::new();
    tree.insert(50, None).unwrap();
    assert_eq!(tree.min_node().unwrap().key(), 50);
    tree.insert(30, None).unwrap();
    assert_eq!(tree.min_node().unwrap().key(), 30);
    // Inserting a higher key leaves the cache alone.
    tree.insert(70, None).unwrap();
    assert_eq!(tree.min_node().unwrap().key(), 30);
    tree.insert(10, None).unwrap();
    assert_eq!(tree.min_node().unwrap().key(), 10);

    // Removing a non-minimum key leaves the cache alone.
    tree.remove(50);
    assert_eq!(tree.min_node().unwrap().key(), 10);
    // Removing the minimum re-derives it.
    tree.remove(10);
    assert_eq!(tree.min_node().unwrap().key(), 30);
    tree.remove(30);
    assert_eq!(tree.min_node().unwrap().key(), 70);
    // Removing the last key clears it.
    tree.remove(70);
    assert!(tree.min_node().is_none());
    assert!(tree.is_empty());
    validate_tree_structure(&tree);
}

#[test]
fn removal_in_several_orders_empties_the_tree() {
    let keys = [5, 3, 8, 1, 4, 7, 9, 2, 6];
    let orders: [&[i64]; 3] = [
        &[1, 2, 3, 4, 5, 6, 7, 8, 9],
        &[9, 8, 7, 6, 5, 4, 3, 2, 1],
        &[5, 1, 9, 3, 7, 2, 8, 4, 6],
    ];
    for order in &orders {
        let mut tree = tree_with(&keys);
        for &key in *order {
            assert!(tree.remove(key).is_some(), "key {} vanished early", key);
            validate_tree_structure(&tree);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.min_node().is_none());
        assert_eq!(tree.map_succ(&mut [0; 4]), 0);
    }
}

#[test]
fn ascend_agrees_with_map_succ() {
    let tree = tree_with(&[13, 21, 8, 34, 5, 55, 3, 89, 2, 144, 1]);
    let walked = ascending_keys(&tree);
    let mut buffer = vec![0; walked.len()];
    assert_eq!(tree.map_succ(&mut buffer), walked.len());
    assert_eq!(buffer, walked);
    assert_eq!(tree.ascend().len(), tree.len());
}

#[test]
fn max_node_is_the_rightmost() {
    let tree = tree_with(&[5, 3, 8, 1, 4, 7, 9, 2, 6]);
    assert_eq!(tree.max_node().unwrap().key(), 9);
    assert!(tree.max_node().unwrap().right_child().is_none());
}

#[test]
fn payloads_can_be_edited_in_place() {
    let mut tree = tree_with(&[1, 2, 3]);
    {
        let mut node = tree.search_mut(2).unwrap();
        node.payload_mut().unwrap().push_str(" edited");
    }
    assert_eq!(tree.get(2).map(String::as_str), Some("2 edited"));

    let old = tree.search_mut(3).unwrap().replace_payload(None);
    assert_eq!(old.as_deref(), Some("3"));
    assert!(tree.get(3).is_none());
    assert!(tree.contains_key(3));
    validate_tree_structure(&tree);
}

#[test]
fn clear_resets_everything() {
    let mut tree = tree_with(&[4, 2, 6]);
    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.min_node().is_none());
    validate_tree_structure(&tree);
    tree.insert(1, None).unwrap();
    assert_eq!(tree.min_node().unwrap().key(), 1);
}

#[test]
fn node_indices_survive_unrelated_removals() {
    let mut tree = tree_with(&[5, 3, 8, 1, 4, 7, 9]);
    let index_of_nine = tree.search(9).unwrap().into_raw_index();
    tree.remove(3);
    tree.remove(5);
    // The node for key 9 was never removed, so its index still resolves to it.
    let node = NodeRef::new_raw(&tree, index_of_nine).unwrap();
    assert_eq!(node.key(), 9);
    validate_tree_structure(&tree);
}

#[test]
fn deque_backed_tree_smoke() {
    type DequeTree = AvlTree<i64, String, usize, SparseVecDeque<Node<i64, String, usize>>>;
    let mut tree = DequeTree::new();
    for key in [6, 1, 8, 3, 9, 2, 7, 4, 5, 0] {
        tree.insert(key, None).unwrap();
    }
    validate_tree_structure(&tree);
    tree.remove(6);
    tree.remove(0);
    validate_tree_structure(&tree);
    let keys: Vec<i64> = tree.ascend().map(|node| node.key()).collect();
    assert_eq!(keys, [1, 2, 3, 4, 5, 7, 8, 9]);
}

#[cfg(feature = "std")]
mod properties {
    use super::*;
    use std::collections::BTreeMap;
    use proptest::prelude::*;

    fn arbitrary_key_orders() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
        prop::collection::hash_set(any::<i16>(), 1..64)
            .prop_map(|set| set.into_iter().map(i64::from).collect::<Vec<_>>())
            .prop_shuffle()
            .prop_flat_map(|insertion| {
                let removal = Just(insertion.clone()).prop_shuffle();
                (Just(insertion), removal)
            })
    }

    proptest! {
        /// Every insertion sequence of distinct keys yields a structurally
        /// valid tree whose ascending walk is the sorted key set.
        #[test]
        fn insertions_preserve_every_invariant(
            keys in prop::collection::hash_set(any::<i16>(), 0..200),
        ) {
            let mut tree = SparseVecAvlTree::<i64, String>::new();
            for &key in &keys {
                tree.insert(i64::from(key), Some(key.to_string())).unwrap();
            }
            validate_tree_structure(&tree);

            let mut sorted: Vec<i64> = keys.iter().copied().map(i64::from).collect();
            sorted.sort_unstable();
            let walked: Vec<i64> = tree.ascend().map(|node| node.key()).collect();
            prop_assert_eq!(&walked, &sorted);

            let mut buffer = vec![0; sorted.len()];
            prop_assert_eq!(tree.map_succ(&mut buffer), sorted.len());
            prop_assert_eq!(&buffer, &sorted);
        }

        /// Arbitrary interleavings of inserts and removals behave exactly like
        /// a `BTreeMap` control model.
        #[test]
        fn behaves_like_a_btree_map(
            ops in prop::collection::vec((any::<bool>(), any::<i8>()), 0..300),
        ) {
            let mut tree = SparseVecAvlTree::<i64, i32>::new();
            let mut control = BTreeMap::<i64, Option<i32>>::new();
            for (insert, key) in ops {
                let key = i64::from(key);
                if insert {
                    let payload = Some(key as i32 * 2);
                    match tree.insert(key, payload) {
                        Ok(()) => prop_assert!(control.insert(key, payload).is_none()),
                        Err(rejected) => {
                            prop_assert!(control.contains_key(&key));
                            prop_assert_eq!(rejected.into_payload(), payload);
                        }
                    }
                } else {
                    prop_assert_eq!(tree.remove(key), control.remove(&key));
                }
            }
            validate_tree_structure(&tree);
            prop_assert_eq!(tree.len(), control.len());

            let walked: Vec<i64> = tree.ascend().map(|node| node.key()).collect();
            let expected: Vec<i64> = control.keys().copied().collect();
            prop_assert_eq!(walked, expected);
            for (&key, payload) in &control {
                prop_assert_eq!(tree.get(key), payload.as_ref());
            }
        }

        /// Inserting a set of keys and removing all of them in an unrelated
        /// order keeps the invariants at every step and ends with an empty
        /// tree and a cleared minimum cache.
        #[test]
        fn removal_in_any_order_empties_the_tree(
            (insertion, removal) in arbitrary_key_orders(),
        ) {
            let mut tree = SparseVecAvlTree::<i64, String>::new();
            for &key in &insertion {
                tree.insert(key, None).unwrap();
            }
            validate_tree_structure(&tree);
            for &key in &removal {
                prop_assert!(tree.remove(key).is_some());
                validate_tree_structure(&tree);
            }
            prop_assert!(tree.is_empty());
            prop_assert!(tree.min_node().is_none());
            prop_assert_eq!(tree.map_succ(&mut [0; 4]), 0);
        }
    }
}
