//! Node and arena definitions.
//!
//! Nodes live in a [`slab::Slab`] and refer to each other by slab key. A
//! node's parent link is navigational only; the parent's `l` / `r` slot is
//! the owning edge. Removing a node from the slab hands its slot back to the
//! slab's free list, so the ids of all other nodes stay valid.

use std::cmp::Ordering;

use slab::Slab;

/// Stable handle of a node inside an [`Arena`].
pub type NodeId = usize;

/// Node storage shared by the plain and the balanced tree.
pub type Arena<K, V> = Slab<TreeNode<K, V>>;

/// Comparator used by the tree types.
pub type Comparator<K> = dyn Fn(&K, &K) -> Ordering;

/// Default comparator: the key's total order.
pub fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// A tree node.
///
/// The balance factor is always present. The unbalanced tree leaves it at
/// `0`; the AVL tree keeps it equal to `height(right) - height(left)`.
#[derive(Clone, Debug)]
pub struct TreeNode<K, V> {
    pub p: Option<NodeId>,
    pub l: Option<NodeId>,
    pub r: Option<NodeId>,
    pub k: K,
    pub v: V,
    pub bf: i8,
}

impl<K, V> TreeNode<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            bf: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.l.is_none() && self.r.is_none()
    }

    /// The only child of a node with at most one child.
    pub fn only_child(&self) -> Option<NodeId> {
        debug_assert!(
            self.l.is_none() || self.r.is_none(),
            "only_child called on a node with two children"
        );
        self.l.or(self.r)
    }
}
