use core::fmt::Debug;

/// A node of an AVL tree.
///
/// Created by the tree internally and only publicly exposed so that tree storages' generic arguments could be specified. All access to nodes goes through [`NodeRef`] and [`NodeRefMut`].
///
/// [`NodeRef`]: struct.NodeRef.html " "
/// [`NodeRefMut`]: struct.NodeRefMut.html " "
#[derive(Copy, Clone, Debug, Hash)]
pub struct Node<K, V, Ix>
where Ix: Clone + Debug + Eq,
{
    pub(super) key: K,
    pub(super) payload: Option<V>,
    /// 1 + the height of the taller child subtree; 1 for a leaf. An absent child counts as height 0.
    pub(super) height: usize,
    pub(super) left: Option<Ix>,
    pub(super) right: Option<Ix>,
    pub(super) parent: Option<Ix>,
}
impl<K, V, Ix> Node<K, V, Ix>
where Ix: Clone + Debug + Eq,
{
    /// Creates a leaf node hanging off the specified parent, or a root node if there is none.
    #[inline(always)]
    pub(super) fn leaf(key: K, payload: Option<V>, parent: Option<Ix>) -> Self {
        Self {
            key,
            payload,
            height: 1,
            left: None,
            right: None,
            parent,
        }
    }
}
