//! Unbalanced binary search tree.
//!
//! [`BinarySearchTree`] owns the node arena, the root id and the comparator.
//! Besides its own plain insert/remove it exposes the structural primitives
//! the AVL layer builds on: `locate`, `attach`, `detach` and `swap_nodes`.

mod iter;

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::debug;

use crate::error::TreeError;
use crate::types::{default_comparator, Arena, NodeId, TreeNode};
use crate::util::{self, replace_child};

pub use iter::Iter;

/// Where a key lives, or would be attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Found(NodeId),
    /// The key is absent. `parent` is `None` only for an empty tree; `left`
    /// names the free slot of `parent` the key belongs in.
    Vacant { parent: Option<NodeId>, left: bool },
}

pub struct BinarySearchTree<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) root: Option<NodeId>,
    pub(crate) arena: Arena<K, V>,
    comparator: C,
}

impl<K: Ord, V> BinarySearchTree<K, V, fn(&K, &K) -> Ordering> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K: Ord, V> Default for BinarySearchTree<K, V, fn(&K, &K) -> Ordering> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            arena: Arena::new(),
            comparator,
        }
    }

    /// Inserts a key/value pair as a new leaf without rebalancing.
    ///
    /// An existing key keeps its node; only the value is replaced and the
    /// previous value returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.locate(&key) {
            Location::Found(i) => Some(mem::replace(&mut self.arena[i].v, value)),
            Location::Vacant { parent, left } => {
                self.attach(key, value, parent, left);
                None
            }
        }
    }

    /// Removes a key, returning its value. A node with two children first
    /// trades places with its in-order predecessor.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.find(key)?;
        if self.arena[node].l.is_some() && self.arena[node].r.is_some() {
            let pred = util::prev(&self.arena, node).expect("node with a left child has a predecessor");
            self.swap_nodes(node, pred);
        }
        Some(self.detach(node).v)
    }

    /// Drops every node, children before their parent.
    pub fn clear(&mut self) {
        let mut removed = 0usize;
        let mut stack: Vec<NodeId> = self.root.take().into_iter().collect();
        while let Some(&top) = stack.last() {
            let l = self.arena[top].l.take();
            if let Some(l) = l {
                stack.push(l);
                continue;
            }
            let r = self.arena[top].r.take();
            if let Some(r) = r {
                stack.push(r);
                continue;
            }
            stack.pop();
            self.arena.remove(top);
            removed += 1;
        }
        debug!("cleared tree, released {removed} nodes");
    }

    /// Finds where `key` lives, or the slot a new node for it would take.
    pub fn locate(&self, key: &K) -> Location {
        let mut parent = None;
        let mut left = false;
        let mut curr = self.root;
        while let Some(i) = curr {
            let node = &self.arena[i];
            match (self.comparator)(key, &node.k) {
                Ordering::Equal => return Location::Found(i),
                Ordering::Less => {
                    left = true;
                    curr = node.l;
                }
                Ordering::Greater => {
                    left = false;
                    curr = node.r;
                }
            }
            parent = Some(i);
        }
        Location::Vacant { parent, left }
    }

    /// Creates a leaf and hangs it off `parent` (or makes it the root).
    pub(crate) fn attach(&mut self, key: K, value: V, parent: Option<NodeId>, left: bool) -> NodeId {
        let node = self.arena.insert(TreeNode::new(key, value));
        self.arena[node].p = parent;
        match parent {
            None => {
                debug_assert!(self.root.is_none(), "attaching a second root");
                self.root = Some(node);
            }
            Some(p) if left => {
                debug_assert!(self.arena[p].l.is_none(), "left slot already taken");
                self.arena[p].l = Some(node);
            }
            Some(p) => {
                debug_assert!(self.arena[p].r.is_none(), "right slot already taken");
                self.arena[p].r = Some(node);
            }
        }
        node
    }

    /// Splices out a node with at most one child and releases its slot.
    ///
    /// The surviving child takes the node's place. The returned node still
    /// carries its former parent link.
    pub(crate) fn detach(&mut self, node: NodeId) -> TreeNode<K, V> {
        let parent = self.arena[node].p;
        let child = self.arena[node].only_child();
        if let Some(c) = child {
            self.arena[c].p = parent;
        }
        match parent {
            Some(p) => replace_child(&mut self.arena, p, node, child),
            None => self.root = child,
        }
        self.arena.remove(node)
    }

    /// Exchanges the tree positions of two nodes, leaving their payloads
    /// with them.
    pub(crate) fn swap_nodes(&mut self, x: NodeId, y: NodeId) {
        if let Some(root) = self.root {
            self.root = Some(util::swap(&mut self.arena, root, x, y));
        }
    }

    pub fn find(&self, key: &K) -> Option<NodeId> {
        util::find(&self.arena, self.root, key, &self.comparator)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena[i].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find(key).map(|i| &mut self.arena[i].v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Keyed access that reports a missing key as an error.
    pub fn at(&self, key: &K) -> Result<&V, TreeError> {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, TreeError> {
        self.get_mut(key).ok_or(TreeError::KeyNotFound)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Smallest node, or `None` for an empty tree.
    pub fn first(&self) -> Option<NodeId> {
        util::first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<NodeId> {
        util::last(&self.arena, self.root)
    }

    /// In-order successor; `None` past the last node.
    pub fn next(&self, curr: NodeId) -> Option<NodeId> {
        util::next(&self.arena, curr)
    }

    pub fn prev(&self, curr: NodeId) -> Option<NodeId> {
        util::prev(&self.arena, curr)
    }

    pub fn key(&self, idx: NodeId) -> &K {
        &self.arena[idx].k
    }

    pub fn value(&self, idx: NodeId) -> &V {
        &self.arena[idx].v
    }

    pub fn value_mut(&mut self, idx: NodeId) -> &mut V {
        &mut self.arena[idx].v
    }

    pub fn balance(&self, idx: NodeId) -> i8 {
        self.arena[idx].bf
    }

    pub fn left(&self, idx: NodeId) -> Option<NodeId> {
        self.arena[idx].l
    }

    pub fn right(&self, idx: NodeId) -> Option<NodeId> {
        self.arena[idx].r
    }

    pub fn parent(&self, idx: NodeId) -> Option<NodeId> {
        self.arena[idx].p
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.first(), self.last(), self.len())
    }

    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    /// Whether no node's subtrees differ in height by more than one.
    pub fn is_balanced(&self) -> bool {
        util::balanced_height(&self.arena, self.root).is_some()
    }

    /// Whether all root-to-leaf paths have the same length.
    pub fn equal_paths(&self) -> bool {
        util::equal_paths(&self.arena, self.root)
    }

    /// Debug dump of the tree, cut off below [`util::PRINT_DEPTH`] levels.
    pub fn print(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        self.print_to_depth(util::PRINT_DEPTH)
    }

    /// Debug dump of the top `max_depth` levels; deeper subtrees render as
    /// `…`.
    pub fn print_to_depth(&self, max_depth: usize) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        util::print_to_depth(&self.arena, self.root, "", max_depth)
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<'a, K, V, C> IntoIterator for &'a BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> fmt::Debug for BinarySearchTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> BinarySearchTree<i32, i32> {
        let mut tree = BinarySearchTree::new();
        for &k in keys {
            tree.insert(k, k * 10);
        }
        tree
    }

    #[test]
    fn locate_reports_found_and_vacant_slots() {
        let tree = tree_of(&[5, 3, 8]);
        let five = tree.find(&5).unwrap();
        let three = tree.find(&3).unwrap();
        assert_eq!(tree.locate(&5), Location::Found(five));
        assert_eq!(
            tree.locate(&1),
            Location::Vacant {
                parent: Some(three),
                left: true
            }
        );
        assert_eq!(
            tree.locate(&4),
            Location::Vacant {
                parent: Some(three),
                left: false
            }
        );
        assert_eq!(
            BinarySearchTree::<i32, i32>::new().locate(&1),
            Location::Vacant {
                parent: None,
                left: false
            }
        );
    }

    #[test]
    fn detach_splices_the_only_child_into_place() {
        let mut tree = tree_of(&[5, 3, 1]);
        let three = tree.find(&3).unwrap();
        let one = tree.find(&1).unwrap();
        let five = tree.find(&5).unwrap();

        let removed = tree.detach(three);
        assert_eq!(removed.k, 3);
        assert_eq!(removed.p, Some(five));
        assert_eq!(tree.left(five), Some(one));
        assert_eq!(tree.parent(one), Some(five));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn detach_root_promotes_child() {
        let mut tree = tree_of(&[5, 8]);
        let five = tree.find(&5).unwrap();
        let eight = tree.find(&8).unwrap();
        tree.detach(five);
        assert_eq!(tree.root(), Some(eight));
        assert_eq!(tree.parent(eight), None);
    }

    #[test]
    fn clear_releases_every_slot() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.first(), None);
        tree.insert(4, 40);
        assert_eq!(tree.get(&4), Some(&40));
    }
}
