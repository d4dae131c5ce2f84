use core::fmt::Debug;
use crate::storage::{Storage, DefaultStorage};
use super::{AvlTree, Node, NodeRef};

/// A *mutable* reference to a node in an AVL tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the index of the node in the arena, it can be used to traverse the tree. The only thing it can mutate is the node's payload — the keys, links and heights belong to the tree's own algorithms.
#[derive(Debug)]
pub struct NodeRefMut<'a, K, V, Ix, S = DefaultStorage<Node<K, V, Ix>>>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    tree: &'a mut AvlTree<K, V, Ix, S>,
    index: Ix,
}
impl<'a, K, V, Ix, S> NodeRefMut<'a, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    /// Creates a new `NodeRefMut` pointing to the specified index in the tree's arena, or `None` if it does not point at a live node.
    #[inline]
    pub fn new_raw(tree: &'a mut AvlTree<K, V, Ix, S>, index: Ix) -> Option<Self> {
        if tree.storage.contains(&index) {
            Some(unsafe {
                // SAFETY: we just did an index check
                Self::new_raw_unchecked(tree, index)
            })
        } else {
            None
        }
    }
    /// Creates a new `NodeRefMut` pointing to the specified index in the tree's arena without checking for liveness.
    ///
    /// # Safety
    /// Causes *immediate* undefined behavior if the specified index does not point at a live node.
    #[inline(always)]
    pub unsafe fn new_raw_unchecked(tree: &'a mut AvlTree<K, V, Ix, S>, index: Ix) -> Self {
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
    pub fn payload(&self) -> Option<&V> {
        self.tree.node(&self.index).payload.as_ref()
    }
    /// Returns a *mutable* reference to the payload stored in the node, or `None` if it carries none.
    #[inline(always)]
    pub fn payload_mut(&mut self) -> Option<&mut V> {
        self.tree.node_mut(&self.index).payload.as_mut()
    }
    /// Replaces the node's payload, returning the old one. Passing `None` takes the payload out of the node.
    #[inline]
    pub fn replace_payload(&mut self, payload: Option<V>) -> Option<V> {
        core::mem::replace(&mut self.tree.node_mut(&self.index).payload, payload)
    }
    /// Returns the cached height of the node's subtree: 1 for a leaf, 1 + the taller child's height otherwise.
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.tree.node(&self.index).height
    }
    /// Returns `true` if the node is the root node, `false` otherwise.
    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.tree.node(&self.index).parent.is_none()
    }
    /// Returns `true` if the node has no children, `false` otherwise.
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        let node = self.tree.node(&self.index);
        node.left.is_none() && node.right.is_none()
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    #[inline]
    pub fn parent(&self) -> Option<NodeRef<'_, K, V, Ix, S>> {
        self.tree.node(&self.index).parent.as_ref().map(|index| unsafe {
            // SAFETY: nodes can never have dead parents
            NodeRef::new_raw_unchecked(self.tree, index.clone())
        })
    }
    /// Returns a *mutable* reference to the parent node of the pointee, or `None` if it's the root node.
    #[inline]
    pub fn parent_mut(&mut self) -> Option<NodeRefMut<'_, K, V, Ix, S>> {
        let parent = self.tree.node(&self.index).parent.clone();
        parent.map(move |index| unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self.tree, index)
        })
    }
    /// Returns a reference to the left child, or `None` if there is none.
    #[inline]
    pub fn left_child(&self) -> Option<NodeRef<'_, K, V, Ix, S>> {
        self.tree.node(&self.index).left.as_ref().map(|index| unsafe {
            // SAFETY: child indices are guaranteed to point at live nodes
            NodeRef::new_raw_unchecked(self.tree, index.clone())
        })
    }
    /// Returns a *mutable* reference to the left child, or `None` if there is none.
    #[inline]
    pub fn left_child_mut(&mut self) -> Option<NodeRefMut<'_, K, V, Ix, S>> {
        let left = self.tree.node(&self.index).left.clone();
        left.map(move |index| unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self.tree, index)
        })
    }
    /// Returns a reference to the right child, or `None` if there is none.
    #[inline]
    pub fn right_child(&self) -> Option<NodeRef<'_, K, V, Ix, S>> {
        self.tree.node(&self.index).right.as_ref().map(|index| unsafe {
            // SAFETY: as above
            NodeRef::new_raw_unchecked(self.tree, index.clone())
        })
    }
    /// Returns a *mutable* reference to the right child, or `None` if there is none.
    #[inline]
    pub fn right_child_mut(&mut self) -> Option<NodeRefMut<'_, K, V, Ix, S>> {
        let right = self.tree.node(&self.index).right.clone();
        right.map(move |index| unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self.tree, index)
        })
    }
}
impl<'a, K, V, Ix, S> NodeRefMut<'a, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
    K: Ord + Copy,
{
    /// Returns the node's key.
    #[inline(always)]
    pub fn key(&self) -> K {
        self.tree.node(&self.index).key
    }
}
impl<'a, K, V, Ix, S> From<&'a NodeRefMut<'a, K, V, Ix, S>> for NodeRef<'a, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    #[inline(always)]
    fn from(op: &'a NodeRefMut<'a, K, V, Ix, S>) -> Self {
        unsafe {
            // SAFETY: the mutable reference is guaranteed to not be dangling
            NodeRef::new_raw_unchecked(op.tree, op.index.clone())
        }
    }
}
impl<'a, K, V, Ix, S> From<NodeRefMut<'a, K, V, Ix, S>> for NodeRef<'a, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    #[inline(always)]
    fn from(op: NodeRefMut<'a, K, V, Ix, S>) -> Self {
        unsafe {
            // SAFETY: as above
            NodeRef::new_raw_unchecked(op.tree, op.index)
        }
    }
}
