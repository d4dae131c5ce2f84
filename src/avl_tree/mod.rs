//! A self-balancing binary search tree with unique ordered keys, optional owned payloads, a cached minimum and cheap ascending enumeration.
//!
//! The [Wikipedia article] on AVL trees covers the balancing scheme in more detail: after every insertion and removal, the heights of the two child subtrees of every node are kept within one of each other by single and double rotations, which bounds every descent by O(log n).
//!
//! Nodes live in an arena ([`Storage`]) and refer to each other by arena indices, so the parent back-references the algorithms rely on never fight the borrow checker and removals never move surviving nodes in memory.
//!
//! # Example
//! ```rust
//! use hornbeam::avl_tree::AvlTree;
//!
//! // Create the tree. The turbofish is needed to state that we are using the default
//! // storage method instead of asking the compiler to infer it, which would be impossible.
//! let mut tree = AvlTree::<u32, String>::new();
//!
//! // Insert a few keys in ascending order, some of them carrying a payload:
//! tree.insert(10, None).unwrap();
//! tree.insert(20, Some("twenty".to_string())).unwrap();
//! tree.insert(30, Some("thirty".to_string())).unwrap();
//!
//! // Inserting the key again is a no-op which hands the payload back:
//! let rejected = tree.insert(10, Some("ten".to_string())).unwrap_err();
//! assert_eq!(rejected.into_payload().as_deref(), Some("ten"));
//!
//! // The ascending run got rebalanced by a single rotation: 20 is now the root.
//! let root = tree.root().unwrap();
//! assert_eq!(root.key(), 20);
//! assert_eq!(root.payload().map(String::as_str), Some("twenty"));
//! assert_eq!(root.height(), 2);
//!
//! // The minimum is cached, and the lowest keys can be enumerated from it
//! // in ascending order without descending from the root:
//! assert_eq!(tree.min_node().unwrap().key(), 10);
//! let mut keys = [0; 3];
//! assert_eq!(tree.map_succ(&mut keys), 3);
//! assert_eq!(keys, [10, 20, 30]);
//!
//! // Removal reports the payload of the removed node:
//! assert_eq!(tree.remove(30), Some(Some("thirty".to_string())));
//! assert_eq!(tree.remove(30), None);
//! ```
//!
//! [Wikipedia article]: https://en.wikipedia.org/wiki/AVL_tree " "
//! [`Storage`]: ../storage/trait.Storage.html " "

mod base;
mod iter;
mod node;
mod node_ref;
mod node_ref_mut;
#[cfg(all(test, feature = "alloc"))]
mod tests;

pub use base::AvlTree;
pub use iter::Ascend;
pub use node::Node;
pub use node_ref::NodeRef;
pub use node_ref_mut::NodeRefMut;

/// An AVL tree which uses a *sparse* `Vec` as its node arena.
///
/// The default `AvlTree` type already uses this, so this is only provided for explicitness and consistency.
#[cfg(feature = "alloc")]
#[allow(unused_qualifications)]
pub type SparseVecAvlTree<K, V> =
    AvlTree<K, V, usize, crate::storage::SparseVec<Node<K, V, usize>>>;

/// An AVL tree which uses a [`SlotMap`] as its node arena.
///
/// [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
#[cfg(feature = "slotmap")]
pub type SlotMapAvlTree<K, V> = AvlTree<
    K,
    V,
    slotmap::DefaultKey,
    slotmap::SlotMap<slotmap::DefaultKey, Node<K, V, slotmap::DefaultKey>>,
>;
