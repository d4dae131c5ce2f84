use core::{
    cmp::Ordering,
    fmt::Debug,
};
use crate::{
    storage::{Storage, DefaultStorage},
    util::unreachable_debugchecked,
    DuplicateKeyError,
};
use super::{Node, NodeRef, NodeRefMut, Ascend};

/// An AVL tree, keyed by unique ordered scalar keys, with an optional owned payload per key.
///
/// The tree stores its nodes in an arena ([`Storage`]) and links them with indices into that arena: child links own their subtree, the parent link and the cached minimum are plain back-references. All mutating operations keep four structural invariants intact: binary-search-tree ordering, AVL balance (child subtree heights differ by at most one), cached height correctness, and parent/child link symmetry.
///
/// Inserting, removing and searching are O(log n). The tree additionally caches the location of its minimum key, making [`min_node`] O(1) and an ascending enumeration of the k smallest keys ([`map_succ`], [`ascend`]) O(k) amortized.
///
/// [`Storage`]: ../storage/trait.Storage.html " "
/// [`min_node`]: #method.min_node " "
/// [`map_succ`]: #method.map_succ " "
/// [`ascend`]: #method.ascend " "
#[derive(Clone, Debug)]
pub struct AvlTree<K, V, Ix = usize, S = DefaultStorage<Node<K, V, Ix>>>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    pub(super) storage: S,
    pub(super) root: Option<Ix>,
    /// Lowest node by key in the tree; kept purely so that minimum lookup and ascending enumeration need not descend from the root.
    pub(super) min: Option<Ix>,
}

impl<K, V, Ix, S> AvlTree<K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    /// Creates an empty tree.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            storage: S::new(),
            root: None,
            min: None,
        }
    }
    /// Creates an empty tree with the specified capacity preallocated in the node arena.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: S::with_capacity(capacity),
            root: None,
            min: None,
        }
    }
    /// Returns `true` if the tree holds no keys, `false` otherwise.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    /// Returns the number of keys stored in the tree.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.storage.len()
    }
    /// Reserves capacity for at least `additional` more nodes in the arena.
    #[inline(always)]
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional)
    }
    /// Removes every node from the tree, releasing each node's payload exactly once.
    #[inline]
    pub fn clear(&mut self) {
        self.storage = S::new();
        self.root = None;
        self.min = None;
    }
    /// Returns a reference to the root node, or `None` if the tree is empty.
    #[inline]
    pub fn root(&self) -> Option<NodeRef<'_, K, V, Ix, S>> {
        let root = self.root.clone()?;
        Some(unsafe {
            // SAFETY: the root index always points at a live node
            NodeRef::new_raw_unchecked(self, root)
        })
    }
    /// Returns a *mutable* reference to the root node, or `None` if the tree is empty.
    #[inline]
    pub fn root_mut(&mut self) -> Option<NodeRefMut<'_, K, V, Ix, S>> {
        let root = self.root.clone()?;
        Some(unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self, root)
        })
    }
    /// Returns a reference to the node holding the lowest key in the tree, or `None` if the tree is empty.
    ///
    /// This is O(1): the minimum is cached and maintained across insertions and removals.
    #[inline]
    pub fn min_node(&self) -> Option<NodeRef<'_, K, V, Ix, S>> {
        let min = self.min.clone()?;
        Some(unsafe {
            // SAFETY: the cached minimum always points at a live node
            NodeRef::new_raw_unchecked(self, min)
        })
    }
    /// Returns a reference to the node holding the highest key in the tree, or `None` if the tree is empty. O(log n).
    #[inline]
    pub fn max_node(&self) -> Option<NodeRef<'_, K, V, Ix, S>> {
        let root = self.root.clone()?;
        let max = self.rightmost(root);
        Some(unsafe {
            // SAFETY: rightmost only walks live links
            NodeRef::new_raw_unchecked(self, max)
        })
    }
    /// Returns an iterator over the tree's nodes in ascending key order.
    ///
    /// The iterator starts at the cached minimum and climbs the successor chain, so a full walk is O(size) rather than O(size·log n).
    #[inline(always)]
    pub fn ascend(&self) -> Ascend<'_, K, V, Ix, S> {
        Ascend::new(self)
    }

    #[inline(always)]
    pub(super) fn node(&self, index: &Ix) -> &Node<K, V, Ix> {
        debug_assert!(
            self.storage.contains(index),
            "\
debug index check failed: tried to reference index {:?} which is not present in the storage",
            index,
        );
        unsafe {
            // SAFETY: all indices stored in the tree point at live nodes
            self.storage.get_unchecked(index)
        }
    }
    #[inline(always)]
    pub(super) fn node_mut(&mut self, index: &Ix) -> &mut Node<K, V, Ix> {
        debug_assert!(
            self.storage.contains(index),
            "\
debug index check failed: tried to reference index {:?} which is not present in the storage",
            index,
        );
        unsafe {
            // SAFETY: as above
            self.storage.get_unchecked_mut(index)
        }
    }
    pub(super) fn leftmost(&self, from: Ix) -> Ix {
        let mut current = from;
        while let Some(left) = self.node(&current).left.clone() {
            current = left;
        }
        current
    }
    pub(super) fn rightmost(&self, from: Ix) -> Ix {
        let mut current = from;
        while let Some(right) = self.node(&current).right.clone() {
            current = right;
        }
        current
    }

    #[inline(always)]
    fn link_height(&self, link: &Option<Ix>) -> usize {
        link.as_ref().map_or(0, |index| self.node(index).height)
    }
    fn update_height(&mut self, index: &Ix) {
        let (left, right) = {
            let node = self.node(index);
            (node.left.clone(), node.right.clone())
        };
        let height = 1 + self.link_height(&left).max(self.link_height(&right));
        self.node_mut(index).height = height;
    }
    /// Height of the left child subtree minus height of the right one, from the cached child heights.
    fn balance_factor(&self, index: &Ix) -> isize {
        let node = self.node(index);
        self.link_height(&node.left) as isize - self.link_height(&node.right) as isize
    }

    /// Rewires the child slot of `parent` which currently holds `old` to hold `new` instead. No-op for the root.
    fn replace_child(&mut self, parent: &Option<Ix>, old: &Ix, new: Option<Ix>) {
        if let Some(parent) = parent {
            let node = self.node_mut(parent);
            if node.left.as_ref() == Some(old) {
                node.left = new;
            } else if node.right.as_ref() == Some(old) {
                node.right = new;
            } else {
                unsafe {
                    // SAFETY: a node cannot have a parent which does not list it as one
                    // of its children
                    unreachable_debugchecked(
                        "parent/child link symmetry violated during child replacement",
                    )
                }
            }
        }
    }

    /// Single rotation promoting the left child into this node's structural slot. The pivot inherits the node's parent (with the parent's child slot rewired in place), the pivot's right subtree switches sides, and both heights are recomputed.
    fn rotate_right(&mut self, index: Ix) -> Ix {
        let pivot = self
            .node(&index)
            .left
            .clone()
            .expect("attempted a right rotation without a left child");
        let moved = self.node(&pivot).right.clone();
        self.node_mut(&index).left = moved.clone();
        if let Some(moved) = &moved {
            self.node_mut(moved).parent = Some(index.clone());
        }
        let parent = self.node(&index).parent.clone();
        self.node_mut(&pivot).right = Some(index.clone());
        self.node_mut(&pivot).parent = parent.clone();
        self.replace_child(&parent, &index, Some(pivot.clone()));
        self.node_mut(&index).parent = Some(pivot.clone());
        self.update_height(&index);
        self.update_height(&pivot);
        pivot
    }
    /// Single rotation promoting the right child into this node's structural slot; the mirror image of [`rotate_right`].
    ///
    /// [`rotate_right`]: #method.rotate_right " "
    fn rotate_left(&mut self, index: Ix) -> Ix {
        let pivot = self
            .node(&index)
            .right
            .clone()
            .expect("attempted a left rotation without a right child");
        let moved = self.node(&pivot).left.clone();
        self.node_mut(&index).right = moved.clone();
        if let Some(moved) = &moved {
            self.node_mut(moved).parent = Some(index.clone());
        }
        let parent = self.node(&index).parent.clone();
        self.node_mut(&pivot).left = Some(index.clone());
        self.node_mut(&pivot).parent = parent.clone();
        self.replace_child(&parent, &index, Some(pivot.clone()));
        self.node_mut(&index).parent = Some(pivot.clone());
        self.update_height(&index);
        self.update_height(&pivot);
        pivot
    }
    /// Recomputes this node's height and applies the rotation the balance factor calls for, returning the subtree's new root.
    ///
    /// The thresholds on the child balance factors are asymmetric on purpose (`>= 0` on the left-heavy side, `> 0` on the right-heavy side): a child with balance factor zero must be resolved by a single rotation, never a double one.
    fn rebalance(&mut self, index: Ix) -> Ix {
        self.update_height(&index);
        let balance = self.balance_factor(&index);
        if balance > 1 {
            let left = self
                .node(&index)
                .left
                .clone()
                .expect("a left-heavy node must have a left child");
            if self.balance_factor(&left) >= 0 {
                self.rotate_right(index)
            } else {
                // Zig-zag: straighten the left child first. The rotation rewires
                // this node's left child slot in place.
                self.rotate_left(left);
                self.rotate_right(index)
            }
        } else if balance < -1 {
            let right = self
                .node(&index)
                .right
                .clone()
                .expect("a right-heavy node must have a right child");
            if self.balance_factor(&right) > 0 {
                self.rotate_right(right);
                self.rotate_left(index)
            } else {
                self.rotate_left(index)
            }
        } else {
            index
        }
    }
}

impl<K, V, Ix, S> AvlTree<K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
    K: Ord + Copy,
{
    /// Inserts a key with an optional payload. O(log n).
    ///
    /// If the key is already present anywhere in the tree, nothing is mutated — the existing node, its payload and the cached minimum are left exactly as they were — and the rejected payload is handed back inside the error.
    ///
    /// # Errors
    /// Will fail if the key is already present in the tree.
    pub fn insert(&mut self, key: K, payload: Option<V>) -> Result<(), DuplicateKeyError<V>> {
        match self.root.clone() {
            None => {
                let root = self.storage.add(Node::leaf(key, payload, None));
                self.root = Some(root.clone());
                self.min = Some(root);
                Ok(())
            }
            Some(root) => {
                let (new_root, rejected) = self.insert_at(root, key, payload);
                if let Some(payload) = rejected {
                    return Err(DuplicateKeyError { payload });
                }
                self.root = Some(new_root.clone());
                // A lower key than the cached minimum means the minimum moved;
                // re-derive it by the leftmost walk from the new root.
                let lower = self
                    .min
                    .as_ref()
                    .map_or(true, |min| key < self.node(min).key);
                if lower {
                    self.min = Some(self.leftmost(new_root));
                }
                Ok(())
            }
        }
    }
    /// Removes a key, returning the payload the removed node owned, or `None` if the key was not present (in which case the tree is untouched). O(log n).
    ///
    /// The outer `Option` reports whether the key was found; the inner one is the removed node's payload, which is optional in its own right.
    ///
    /// Removal can physically relocate a surviving node into the removed node's structural position. Node references other than ones pointing at the removed key stay valid, but the shape-derived facts they report (parent, children, height) may change; keys are the durable handle, to be re-resolved through [`search`] after a mutation.
    ///
    /// [`search`]: #method.search " "
    pub fn remove(&mut self, key: K) -> Option<Option<V>> {
        let root = self.root.clone()?;
        let was_min = self
            .min
            .as_ref()
            .map_or(false, |min| self.node(min).key == key);
        let (new_root, removed) = self.remove_at(root, key);
        removed.as_ref()?;
        self.root = new_root;
        if was_min {
            self.min = self.root.clone().map(|root| self.leftmost(root));
        }
        removed
    }
    /// Returns a reference to the node holding the specified key, or `None` if the key is not present. O(log n).
    #[inline]
    pub fn search(&self, key: K) -> Option<NodeRef<'_, K, V, Ix, S>> {
        let index = self.locate(key)?;
        Some(unsafe {
            // SAFETY: locate only returns live indices
            NodeRef::new_raw_unchecked(self, index)
        })
    }
    /// Returns a *mutable* reference to the node holding the specified key, or `None` if the key is not present. O(log n).
    #[inline]
    pub fn search_mut(&mut self, key: K) -> Option<NodeRefMut<'_, K, V, Ix, S>> {
        let index = self.locate(key)?;
        Some(unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self, index)
        })
    }
    /// Returns `true` if the specified key is present in the tree, `false` otherwise. O(log n).
    #[inline(always)]
    pub fn contains_key(&self, key: K) -> bool {
        self.locate(key).is_some()
    }
    /// Returns a reference to the payload stored for the specified key, or `None` if the key is not present or carries no payload. O(log n).
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        let index = self.locate(key)?;
        self.node(&index).payload.as_ref()
    }
    /// Fills the buffer with the lowest keys of the tree, in ascending order, and returns the number of keys written.
    ///
    /// Writes `min(buffer length, tree size)` keys; an empty buffer or an empty tree yields 0. The enumeration starts at the cached minimum and climbs the successor chain instead of descending from the root, which makes it O(count) amortized.
    pub fn map_succ(&self, keys: &mut [K]) -> usize {
        match self.min.clone() {
            Some(min) => self.fill_succ(&min, keys),
            None => 0,
        }
    }

    fn locate(&self, key: K) -> Option<Ix> {
        let mut current = self.root.clone();
        while let Some(index) = current {
            let node = self.node(&index);
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(index),
                Ordering::Less => current = node.left.clone(),
                Ordering::Greater => current = node.right.clone(),
            }
        }
        None
    }

    /// Recursive insertion step. Returns the subtree's new root and, if the key was already present, the rejected payload (with the subtree left untouched).
    fn insert_at(&mut self, index: Ix, key: K, payload: Option<V>) -> (Ix, Option<Option<V>>) {
        match key.cmp(&self.node(&index).key) {
            Ordering::Less => match self.node(&index).left.clone() {
                Some(left) => {
                    let (new_left, rejected) = self.insert_at(left, key, payload);
                    if rejected.is_some() {
                        return (index, rejected);
                    }
                    self.node_mut(&index).left = Some(new_left);
                }
                None => {
                    let leaf = self
                        .storage
                        .add(Node::leaf(key, payload, Some(index.clone())));
                    self.node_mut(&index).left = Some(leaf);
                }
            },
            Ordering::Greater => match self.node(&index).right.clone() {
                Some(right) => {
                    let (new_right, rejected) = self.insert_at(right, key, payload);
                    if rejected.is_some() {
                        return (index, rejected);
                    }
                    self.node_mut(&index).right = Some(new_right);
                }
                None => {
                    let leaf = self
                        .storage
                        .add(Node::leaf(key, payload, Some(index.clone())));
                    self.node_mut(&index).right = Some(leaf);
                }
            },
            Ordering::Equal => return (index, Some(payload)),
        }
        (self.rebalance(index), None)
    }

    /// Recursive removal step. Returns the subtree's new root (`None` if the subtree became empty) and, if a node was deleted, the payload it owned.
    fn remove_at(&mut self, index: Ix, key: K) -> (Option<Ix>, Option<Option<V>>) {
        match key.cmp(&self.node(&index).key) {
            Ordering::Less => match self.node(&index).left.clone() {
                Some(left) => {
                    let (new_left, removed) = self.remove_at(left, key);
                    if removed.is_none() {
                        return (Some(index), None);
                    }
                    self.node_mut(&index).left = new_left;
                    (Some(self.rebalance(index)), removed)
                }
                None => (Some(index), None),
            },
            Ordering::Greater => match self.node(&index).right.clone() {
                Some(right) => {
                    let (new_right, removed) = self.remove_at(right, key);
                    if removed.is_none() {
                        return (Some(index), None);
                    }
                    self.node_mut(&index).right = new_right;
                    (Some(self.rebalance(index)), removed)
                }
                None => (Some(index), None),
            },
            Ordering::Equal => {
                let (new_root, payload) = self.unlink(index);
                (new_root, Some(payload))
            }
        }
    }

    /// Deletes the node at `index` from the graph, returning the subtree's new root and the deleted node's payload.
    ///
    /// A node with a left subtree is replaced by its predecessor — the maximum of that subtree — which is physically relocated into the node's structural position; a node with only a right child is replaced by it; a leaf just vanishes. The deleted node's former parent has its child slot rewired in place either way.
    fn unlink(&mut self, index: Ix) -> (Option<Ix>, Option<V>) {
        let (left, right, parent) = {
            let node = self.node(&index);
            (node.left.clone(), node.right.clone(), node.parent.clone())
        };
        if let Some(left) = left {
            let (rest, predecessor) = self.detach_max(left);
            self.node_mut(&predecessor).left = rest.clone();
            if let Some(rest) = &rest {
                self.node_mut(rest).parent = Some(predecessor.clone());
            }
            self.node_mut(&predecessor).right = right.clone();
            if let Some(right) = &right {
                self.node_mut(right).parent = Some(predecessor.clone());
            }
            self.node_mut(&predecessor).parent = parent.clone();
            self.replace_child(&parent, &index, Some(predecessor.clone()));
            let payload = self.storage.remove(&index).payload;
            (Some(self.rebalance(predecessor)), payload)
        } else if let Some(right) = right {
            self.node_mut(&right).parent = parent.clone();
            self.replace_child(&parent, &index, Some(right.clone()));
            let payload = self.storage.remove(&index).payload;
            (Some(self.rebalance(right)), payload)
        } else {
            self.replace_child(&parent, &index, None);
            let payload = self.storage.remove(&index).payload;
            (None, payload)
        }
    }

    /// Unlinks the maximum node of the subtree rooted at `index`, rebalancing every node on the walk down to it. Returns the subtree's new root (`None` if the maximum was its only node, still linked to its old parent otherwise) and the detached maximum, whose own links are left stale for the caller to rewire.
    fn detach_max(&mut self, index: Ix) -> (Option<Ix>, Ix) {
        match self.node(&index).right.clone() {
            Some(right) => {
                let (new_right, max) = self.detach_max(right);
                self.node_mut(&index).right = new_right.clone();
                if let Some(new_right) = &new_right {
                    self.node_mut(new_right).parent = Some(index.clone());
                }
                (Some(self.rebalance(index)), max)
            }
            None => (self.node(&index).left.clone(), index),
        }
    }

    /// Fills `keys[filled..]` with the in-order key sequence of the subtree rooted at `index`, stopping once the buffer is full; returns the new fill count.
    pub(super) fn fill_in_order(&self, index: &Ix, keys: &mut [K], filled: usize) -> usize {
        let mut filled = filled;
        if filled >= keys.len() {
            return filled;
        }
        let (left, right) = {
            let node = self.node(index);
            (node.left.clone(), node.right.clone())
        };
        if let Some(left) = &left {
            filled = self.fill_in_order(left, keys, filled);
            if filled >= keys.len() {
                return filled;
            }
        }
        keys[filled] = self.node(index).key;
        filled += 1;
        if filled < keys.len() {
            if let Some(right) = &right {
                filled = self.fill_in_order(right, keys, filled);
            }
        }
        filled
    }
    /// Fills the buffer by climbing the successor chain from `start`: the node's key, then the in-order sequence of its right subtree, then the same at the parent, all the way up; returns the number of keys written.
    ///
    /// Starting from the minimum node this produces the whole tree's keys in ascending order without ever descending from the root.
    pub(super) fn fill_succ(&self, start: &Ix, keys: &mut [K]) -> usize {
        let mut filled = 0;
        let mut current = Some(start.clone());
        while let Some(index) = current {
            if filled >= keys.len() {
                break;
            }
            keys[filled] = self.node(&index).key;
            filled += 1;
            if let Some(right) = self.node(&index).right.clone() {
                filled = self.fill_in_order(&right, keys, filled);
            }
            current = self.node(&index).parent.clone();
        }
        filled
    }
}

impl<K, V, Ix, S> Default for AvlTree<K, V, Ix, S>
where
    S: Storage<Element = Node<K, V, Ix>, Index = Ix>,
    Ix: Clone + Debug + Eq,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
