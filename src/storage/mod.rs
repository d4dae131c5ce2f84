//! Utilities for treating the backing storage for the tree generically.
//!
//! This module is home for the following items:
//! - [`Storage`], the main trait for the backing arenas of the tree
//! - [`ListStorage`], a trait used for describing list-like collections which can back a [`SparseStorage`]
//! - [`SparseStorage`], a wrapper around `ListStorage`s which keeps removed slots around as reusable holes, making element indices stable across removals
//! - [`DefaultStorage`], a type definition for the default backing storage used by the tree unless a different one is specified; takes different values depending on feature flags
//!
//! [`Storage`]: trait.Storage.html " "
//! [`ListStorage`]: trait.ListStorage.html " "
//! [`SparseStorage`]: struct.SparseStorage.html " "
//! [`DefaultStorage`]: type.DefaultStorage.html " "

mod list;
pub use list::*;

#[cfg(feature = "slotmap")]
mod slotmap_impl;

use core::fmt::Debug;

/// Trait for various kinds of containers which can be the backing storage for the tree.
///
/// # Safety
/// There's a number of invariants which have to be followed by the container:
/// - `new` and `with_capacity` ***must*** return empty storages, i.e. those which have `len() == 0` and `is_empty() == true`;
/// - an element added at an index must stay at that exact index, in the exact same state as it was inserted, until it is removed or modified using a method which explicitly does so — elements are never moved or dropped by unrelated insertions and removals;
/// - it should be impossible for the number of elements to overflow `usize`;
/// - calling [`get_unchecked`] or [`get_unchecked_mut`] if `contains` on the same index returns `true` should *not* cause undefined behavior (otherwise, it may or may not — that is implementation specific);
/// - if an element was removed at an index, `contains` at that index must return `false` until a new element is added there.
///
/// The tree relies on those invariants for safety.
///
/// [`get_unchecked`]: #tymethod.get_unchecked " "
/// [`get_unchecked_mut`]: #tymethod.get_unchecked_mut " "
pub unsafe trait Storage: Sized {
    /// The type used for element naming.
    type Index: Clone + Debug + Eq;
    /// The type of the elements stored.
    type Element;

    /// Adds an element to the collection at an unspecified index, returning that index.
    fn add(&mut self, element: Self::Element) -> Self::Index;
    /// Removes and returns the element identified by `index` within the storage.
    ///
    /// # Panics
    /// Required to panic if the specified index does not point towards a live element.
    fn remove(&mut self, index: &Self::Index) -> Self::Element;
    /// Returns the number of live elements in the storage, also referred to as its 'length'.
    fn len(&self) -> usize;
    /// Creates an empty storage with the specified capacity.
    ///
    /// # Panics
    /// Storages with a fixed capacity should panic if the specified capacity does not match their actual one, and are recommended to override the `new` method to use the correct capacity.
    fn with_capacity(capacity: usize) -> Self;
    /// Returns a reference to the specified element in the storage, without checking for presence of the index inside the collection.
    ///
    /// # Safety
    /// If the element at the specified index is not present in the storage, a dangling reference will be created, causing *immediate undefined behavior*.
    unsafe fn get_unchecked(&self, index: &Self::Index) -> &Self::Element;
    /// Returns a *mutable* reference to the specified element in the storage, without checking for presence of the index inside the collection.
    ///
    /// # Safety
    /// If the element at the specified index is not present in the storage, a dangling reference will be created, causing *immediate undefined behavior*.
    unsafe fn get_unchecked_mut(&mut self, index: &Self::Index) -> &mut Self::Element;
    /// Returns `true` if the specified index points towards a live element, `false` otherwise.
    ///
    /// If this method returned `true`, calling `get_unchecked`/`get_unchecked_mut` on the same index is guaranteed to be safe.
    fn contains(&self, index: &Self::Index) -> bool;

    /// Returns a reference to the specified element in the collection, or `None` if the index does not point towards a live element.
    #[inline]
    fn get(&self, index: &Self::Index) -> Option<&Self::Element> {
        if self.contains(index) {
            Some(unsafe {
                // SAFETY: we just did an index check
                self.get_unchecked(index)
            })
        } else {
            None
        }
    }
    /// Returns a *mutable* reference to the specified element in the collection, or `None` if the index does not point towards a live element.
    #[inline]
    fn get_mut(&mut self, index: &Self::Index) -> Option<&mut Self::Element> {
        if self.contains(index) {
            Some(unsafe {
                // SAFETY: we just did an index check
                self.get_unchecked_mut(index)
            })
        } else {
            None
        }
    }
    /// Creates a new empty storage. Dynamically-allocated storages created this way do not allocate memory.
    ///
    /// Storages with fixed capacity should override this method to use the correct capacity, as the default implementation calls `Self::with_capacity(0)`.
    #[inline(always)]
    fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Returns `true` if the storage contains no elements, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the amount of elements the storage can hold without requiring a memory allocation.
    ///
    /// For storages which have a fixed capacity, this should be equal to the length; the default implementation uses exactly that.
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.len()
    }
    /// Reserves capacity for at least `additional` more elements to be inserted in the given storage. The storage may reserve more space to avoid frequent reallocations. After calling `reserve`, `capacity` will be greater than or equal to `self.len()` + `additional`. Does nothing if capacity is already sufficient.
    ///
    /// For storages which have a fixed capacity, this should first check for the specified amount of elements to reserve for and if it's not zero, either reallocate the collection anew or, if that is not supported, panic. The default implementation does exactly that.
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        if self.len() + additional > self.capacity() {
            unimplemented!("this storage type does not support reallocation")
        }
    }
    /// Shrinks the capacity of the storage as much as possible.
    ///
    /// It will drop down as close as possible to the current length, though dynamically allocated storages may not always reallocate exactly as much as it is needed to store all elements and none more.
    ///
    /// The default implementation does nothing.
    #[inline(always)]
    fn shrink_to_fit(&mut self) {}
}

/// The default storage type used by the tree when a storage type is not provided.
///
/// This is chosen according to the following strategy:
/// - If the `alloc` feature flag is enabled, [`SparseVec`] is used
/// - Otherwise, a [*sparse*][`SparseStorage`] [`ArrayVec`] *with zero-sized backing storage* is used
///
/// No other storage types are ever used as defaults.
///
/// [`SparseVec`]: type.SparseVec.html " "
/// [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
/// [`SparseStorage`]: struct.SparseStorage.html " "
pub type DefaultStorage<T> = _DefaultStorage<T>;

#[cfg(feature = "alloc")]
type _DefaultStorage<T> = SparseVec<T>;

#[cfg(not(feature = "alloc"))]
type _DefaultStorage<T> = SparseStorage<T, arrayvec::ArrayVec<[Slot<T>; 0]>>;
