use core::fmt::Debug;
use crate::storage::{Storage, DefaultStorage};
use super::{AvlTree, Node};

/// A reference to a node in an AVL tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the index of the node in the arena, it can be used to traverse the tree.
///
/// A node reference stays valid for as long as the key it was resolved from stays in the tree; removing a *different* key can relocate node identities without changing key semantics, so the durable external handle is the key, re-resolved through [`AvlTree::search`] after a mutation.
///
/// [`AvlTree::search`]: struct.AvlTree.html#method.search " "
#[derive(Debug)]
pub struct NodeRef<'a, K, V, Ix, S = DefaultStorage<Node<K, V, Ix>>>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    tree: &'a AvlTree<K, V, Ix, S>,
    index: Ix,
}
impl<'a, K, V, Ix, S> NodeRef<'a, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    /// Creates a new `NodeRef` pointing to the specified index in the tree's arena, or `None` if it does not point at a live node.
    #[inline]
    pub fn new_raw(tree: &'a AvlTree<K, V, Ix, S>, index: Ix) -> Option<Self> {
        if tree.storage.contains(&index) {
            Some(unsafe {
                // SAFETY: we just did an index check
                Self::new_raw_unchecked(tree, index)
            })
        } else {
            None
        }
    }
    /// Creates a new `NodeRef` pointing to the specified index in the tree's arena without checking for liveness.
    ///
    /// # Safety
    /// Causes *immediate* undefined behavior if the specified index does not point at a live node.
    #[inline(always)]
    pub unsafe fn new_raw_unchecked(tree: &'a AvlTree<K, V, Ix, S>, index: Ix) -> Self {
        Self { tree, index }
    }
    /// Returns a reference to the raw arena index for the node.
    #[inline(always)]
    pub fn raw_index(&self) -> &Ix {
        &self.index
    }
    /// Consumes the reference and returns the underlying raw arena index for the node.
    #[inline(always)]
    pub fn into_raw_index(self) -> Ix {
        self.index
    }
    /// Returns a reference to the payload stored in the node, or `None` if it carries none.
    #[inline(always)]
    pub fn payload(&self) -> Option<&'a V> {
        self.node().payload.as_ref()
    }
    /// Returns the cached height of the node's subtree: 1 for a leaf, 1 + the taller child's height otherwise.
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.node().height
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.as_ref().map(|index| unsafe {
            // SAFETY: nodes can never have dead parents
            Self::new_raw_unchecked(self.tree, index.clone())
        })
    }
    /// Returns `true` if the node is the root node, `false` otherwise.
    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
    /// Returns `true` if the node has no children, `false` otherwise.
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }
    /// Returns a reference to the left child, or `None` if there is none.
    pub fn left_child(&self) -> Option<Self> {
        self.node().left.as_ref().map(|index| unsafe {
            // SAFETY: child indices are guaranteed to point at live nodes; a check to make
            // sure that properly holds is below.
            debug_assert!(
                self.tree.storage.contains(index),
                "\
debug index check failed: tried to reference index {:?} which is not present in the storage",
                index,
            );
            Self::new_raw_unchecked(self.tree, index.clone())
        })
    }
    /// Returns a reference to the right child, or `None` if there is none.
    pub fn right_child(&self) -> Option<Self> {
        self.node().right.as_ref().map(|index| unsafe {
            // SAFETY: as above
            debug_assert!(
                self.tree.storage.contains(index),
                "\
debug index check failed: tried to reference index {:?} which is not present in the storage",
                index,
            );
            Self::new_raw_unchecked(self.tree, index.clone())
        })
    }

    #[inline(always)]
    fn node(&self) -> &'a Node<K, V, Ix> {
        unsafe {
            // SAFETY: all existing NodeRefs are guaranteed to not be dangling
            self.tree.storage.get_unchecked(&self.index)
        }
    }
}
impl<'a, K, V, Ix, S> NodeRef<'a, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
    K: Ord + Copy,
{
    /// Returns the node's key.
    #[inline(always)]
    pub fn key(&self) -> K {
        self.node().key
    }
    /// Fills the buffer with the in-order key sequence of this node's own subtree (never ancestors), in ascending order, stopping once the buffer is full; returns the number of keys written. An empty buffer yields 0.
    #[inline(always)]
    pub fn map_in_order(&self, keys: &mut [K]) -> usize {
        self.tree.fill_in_order(&self.index, keys, 0)
    }
    /// Fills the buffer by climbing the successor chain starting at this node — the node's key, the in-order sequence of its right subtree, then the same at each ancestor in turn — and returns the number of keys written. An empty buffer yields 0.
    ///
    /// Called on the tree's minimum node this enumerates the whole tree's keys in ascending order; see [`AvlTree::map_succ`].
    ///
    /// [`AvlTree::map_succ`]: struct.AvlTree.html#method.map_succ " "
    #[inline(always)]
    pub fn map_succ(&self, keys: &mut [K]) -> usize {
        self.tree.fill_succ(&self.index, keys)
    }
}
impl<K, V, Ix, S> Copy for NodeRef<'_, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Copy + Debug + Eq,
{}
impl<K, V, Ix, S> Clone for NodeRef<'_, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            index: self.index.clone(),
        }
    }
}
