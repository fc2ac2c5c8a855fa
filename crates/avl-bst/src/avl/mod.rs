//! AVL tree on top of [`BinarySearchTree`].

pub mod util;

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::bst::{BinarySearchTree, Iter, Location};
use crate::error::{InvariantError, TreeError};
use crate::types::NodeId;
use crate::util as links;

use self::util::{assert_avl_tree, rebalance_after_insert, rebalance_after_remove, shrink_delta};

/// Height-balanced ordered map.
///
/// Node ids handed out by [`find`](Self::find), [`first`](Self::first) and
/// friends stay valid until that node is removed or the tree is cleared.
pub struct AvlTree<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    tree: BinarySearchTree<K, V, C>,
}

impl<K: Ord, V> AvlTree<K, V, fn(&K, &K) -> Ordering> {
    pub fn new() -> Self {
        Self {
            tree: BinarySearchTree::new(),
        }
    }
}

impl<K: Ord, V> Default for AvlTree<K, V, fn(&K, &K) -> Ordering> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: BinarySearchTree::with_comparator(comparator),
        }
    }

    /// Inserts or overwrites. Overwriting keeps the structure as is and
    /// returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.locate(&key) {
            Location::Found(i) => Some(mem::replace(&mut self.tree.arena[i].v, value)),
            Location::Vacant { parent, left } => {
                let node = self.tree.attach(key, value, parent, left);
                if let Some(root) = self.tree.root {
                    self.tree.root = Some(rebalance_after_insert(&mut self.tree.arena, root, node));
                }
                None
            }
        }
    }

    /// Removes a key and returns its value; absent keys leave the tree as is.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.tree.find(key)?;
        let arena = &self.tree.arena;
        if arena[node].l.is_some() && arena[node].r.is_some() {
            let pred = links::prev(arena, node).expect("node with a left child has a predecessor");
            self.swap_nodes(node, pred);
        }

        let delta = shrink_delta(&self.tree.arena, node);
        let removed = self.tree.detach(node);
        if let (Some(parent), Some(root)) = (removed.p, self.tree.root) {
            self.tree.root = Some(rebalance_after_remove(&mut self.tree.arena, root, parent, delta));
        }
        Some(removed.v)
    }

    /// Swaps two nodes' positions. The balance factor describes a position,
    /// so it is swapped back after the topology exchange.
    fn swap_nodes(&mut self, x: NodeId, y: NodeId) {
        self.tree.swap_nodes(x, y);
        let arena = &mut self.tree.arena;
        let xbf = arena[x].bf;
        arena[x].bf = arena[y].bf;
        arena[y].bf = xbf;
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn find(&self, key: &K) -> Option<NodeId> {
        self.tree.find(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    pub fn at(&self, key: &K) -> Result<&V, TreeError> {
        self.tree.at(key)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, TreeError> {
        self.tree.at_mut(key)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.tree.last()
    }

    pub fn next(&self, curr: NodeId) -> Option<NodeId> {
        self.tree.next(curr)
    }

    pub fn prev(&self, curr: NodeId) -> Option<NodeId> {
        self.tree.prev(curr)
    }

    pub fn key(&self, idx: NodeId) -> &K {
        self.tree.key(idx)
    }

    pub fn value(&self, idx: NodeId) -> &V {
        self.tree.value(idx)
    }

    pub fn value_mut(&mut self, idx: NodeId) -> &mut V {
        self.tree.value_mut(idx)
    }

    /// `height(right) - height(left)` of the node.
    pub fn balance(&self, idx: NodeId) -> i8 {
        self.tree.balance(idx)
    }

    pub fn left(&self, idx: NodeId) -> Option<NodeId> {
        self.tree.left(idx)
    }

    pub fn right(&self, idx: NodeId) -> Option<NodeId> {
        self.tree.right(idx)
    }

    pub fn parent(&self, idx: NodeId) -> Option<NodeId> {
        self.tree.parent(idx)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    pub fn equal_paths(&self) -> bool {
        self.tree.equal_paths()
    }

    pub fn print(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        self.tree.print()
    }

    pub fn print_to_depth(&self, max_depth: usize) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        self.tree.print_to_depth(max_depth)
    }

    /// Full structural check; meant for tests and debugging.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        assert_avl_tree(&self.tree.arena, self.tree.root, self.tree.comparator())
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V, fn(&K, &K) -> Ordering> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C> Extend<(K, V)> for AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> fmt::Debug for AvlTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}
