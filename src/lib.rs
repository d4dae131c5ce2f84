//! Implements an arena-allocated AVL tree keyed by ordered scalar identifiers.
//!
//! ------------------------
//!
//! # Overview
//! Hornbeam stores a classic AVL tree — a self-balancing binary search tree in which the heights of the two child subtrees of any node differ by at most one — inside an ["arena"][arena tree blog post], described by Ben Lovy. The tree uses some sort of backing storage to store its nodes, typically a [`Vec`] (or its variants, like [`SmallVec`] or [`ArrayVec`]), and instead of using pointers to link children to parents and parents to children, indices into the storage are used instead. This sidesteps the aliasing problems which owning parent/child pointers would otherwise cause, significantly improves node insertion and removal performance as compared to `Rc`-based trees, and gives room for supporting configurations without a global memory allocator.
//!
//! Every key in the tree is unique and optionally carries an owned payload. On top of the usual O(log n) insert/search/remove, the tree caches the location of its minimum key, which makes minimum lookup O(1) and ascending enumeration O(size) — the enumeration climbs the successor chain from the cached minimum instead of restarting a descent from the root for every key.
//!
//! # Storage
//! The trait used for defining the "arena" type used is `Storage`. Implementing it directly isn't the only way to get your type to be supported by the tree — `ListStorage` is a trait which allows you to define an arena storage in terms of a list-like collection by wrapping it in [`SparseStorage`], which keeps removed slots around as reusable holes so that node indices stay stable.
//!
//! Several types from both the standard library and external crates can back an arena out of the box:
//! - [`Vec`], [`SmallVec`] and [`ArrayVec`] — `ListStorage`
//! - [`VecDeque`] — `ListStorage`, does not use `VecDeque` semantics and is simply provided for convenience
//! - [`SlotMap`], [`HopSlotMap`] and [`DenseSlotMap`] — `Storage`
//!
//! You can opt out of one or multiple of those implementations using feature flags as described by the *Feature flags* section.
//!
//! # Feature flags
//! - `std` (**enabled by default**) — enables the full standard library, disabling `no_std` for the crate. Currently, this only adds [`Error`] trait implementations for some types.
//! - `alloc` (**enabled by default**) — adds `ListStorage` trait implementations for standard library containers and enables the default `Vec`-backed arena. *This does not require standard library support and will only panic at runtime in `no_std` environments without an allocator.*
//! - `unwind_safety` (**enabled by default**) — aborts instead of unwinding when a structural invariant violation is detected in debug builds, so that a corrupted tree is never observed by unwinders.
//! - `smallvec` — adds a `ListStorage` trait implementation for [`SmallVec`].
//! - `slotmap` — adds `Storage` trait implementations for [`SlotMap`], [`HopSlotMap`] and [`DenseSlotMap`].
//!
//! # Public dependencies
//! - `arrayvec` (**required**) — `^0.5`
//! - `smallvec` (*optional*) — `^1.4`
//! - `slotmap` (*optional*) — `^0.4`
//!
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
//! [`VecDeque`]: https://doc.rust-lang.org/std/collections/struct.VecDeque.html " "
//! [`SmallVec`]: https://docs.rs/smallvec/*/smallvec/struct.SmallVec.html " "
//! [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`HopSlotMap`]: https://docs.rs/slotmap/*/slotmap/hop/struct.HopSlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "
//! [`SparseStorage`]: storage/struct.SparseStorage.html " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::map_unwrap_or,
    clippy::implicit_hasher,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::invalid_upcast_comparisons,
    clippy::items_after_statements,
    clippy::large_stack_arrays,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wild_err_arm,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_if_let_else,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::string_add_assign,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unicode_not_nfc,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::decimal_literal_representation,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)] // FIXME reenable when it gets fixed
#![allow(clippy::option_option)] // the payload itself is optional, removal reports both layers
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, ListStorage, SparseStorage, DefaultStorage};

pub mod avl_tree;
pub use avl_tree::AvlTree;

/// A prelude for using Hornbeam, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as TreeStorage,
        SparseStorage as SparseTreeStorage,
        DefaultStorage as DefaultTreeStorage,
    };
    #[doc(no_inline)]
    pub use crate::avl_tree::{
        AvlTree,
        NodeRef as AvlTreeNodeRef,
        NodeRefMut as AvlTreeNodeRefMut,
    };
}

pub(crate) mod util;

use core::fmt::{self, Formatter, Display, Debug};

/// The error type returned by [`AvlTree::insert`] when the key being inserted is already present in the tree.
///
/// The insertion is a no-op: the tree, the stored payload for the key and the cached minimum are all left untouched. The payload which was passed to the failed insertion is handed back in this type so that it doesn't get silently dropped and can be reused by the caller.
///
/// [`AvlTree::insert`]: avl_tree/struct.AvlTree.html#method.insert " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DuplicateKeyError<V> {
    /// The payload which was passed to the failed insertion, provided here so that it doesn't get dropped if it could instead be reused in the event of a failure.
    pub payload: Option<V>,
}
impl<V> DuplicateKeyError<V> {
    /// Extracts the payload which was passed to the failed insertion.
    #[allow(clippy::missing_const_for_fn)] // Clippy has no idea what a destructor is
    pub fn into_payload(self) -> Option<V> {
        self.payload
    }
}
impl<V> Display for DuplicateKeyError<V> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad("the key is already present in the tree")
    }
}
#[cfg(feature = "std")]
impl<V: Debug> std::error::Error for DuplicateKeyError<V> {}
