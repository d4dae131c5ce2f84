use core::{
    iter::FusedIterator,
    fmt::{self, Formatter, Debug},
};
use crate::storage::{Storage, DefaultStorage};
use super::{AvlTree, Node, NodeRef};

/// An iterator over the nodes of an [`AvlTree`] in ascending key order.
///
/// The iterator starts at the tree's cached minimum and steps to each node's in-order successor — the leftmost node of the right subtree if there is one, the first ancestor reached from a left child otherwise — so a full walk visits every edge at most twice and is O(size) overall.
///
/// [`AvlTree`]: struct.AvlTree.html " "
pub struct Ascend<'a, K, V, Ix, S = DefaultStorage<Node<K, V, Ix>>>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    tree: &'a AvlTree<K, V, Ix, S>,
    next: Option<Ix>,
    visited: usize,
}
impl<'a, K, V, Ix, S> Ascend<'a, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    /// Creates an ascending iterator starting at the tree's cached minimum.
    #[inline(always)]
    pub(super) fn new(tree: &'a AvlTree<K, V, Ix, S>) -> Self {
        Self {
            tree,
            next: tree.min.clone(),
            visited: 0,
        }
    }

    /// In-order successor of `index`, or `None` if it holds the highest key.
    fn successor(&self, index: &Ix) -> Option<Ix> {
        if let Some(right) = self.tree.node(index).right.clone() {
            return Some(self.tree.leftmost(right));
        }
        let mut current = index.clone();
        loop {
            let parent = self.tree.node(&current).parent.clone()?;
            if self.tree.node(&parent).left.as_ref() == Some(&current) {
                return Some(parent);
            }
            current = parent;
        }
    }
}
impl<'a, K, V, Ix, S> Iterator for Ascend<'a, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, K, V, Ix, S>;
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next.take()?;
        self.next = self.successor(&index);
        self.visited += 1;
        Some(unsafe {
            // SAFETY: the successor walk only follows live links
            NodeRef::new_raw_unchecked(self.tree, index)
        })
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tree.storage.len() - self.visited;
        (remaining, Some(remaining))
    }
}
impl<K, V, Ix, S> ExactSizeIterator for Ascend<'_, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
}
impl<K, V, Ix, S> FusedIterator for Ascend<'_, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
}
impl<K, V, Ix, S> Clone for Ascend<'_, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            next: self.next.clone(),
            visited: self.visited,
        }
    }
}
impl<K, V, Ix, S> Debug for Ascend<'_, K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ascend")
            .field("next", &self.next)
            .field("visited", &self.visited)
            .finish()
    }
}
