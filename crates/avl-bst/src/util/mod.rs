//! Link-level helpers over a node [`Arena`].
//!
//! Every function here works on node ids only and knows nothing about
//! balancing. `None` plays the role of the `end` sentinel: stepping past the
//! last node yields `None`.
//!
//! - [`swap`] exchanges the positions of two nodes
//! - [`print`] renders a debug dump
//! - [`equal_paths`] checks that all root-to-leaf paths have one length

pub mod equal_paths;
pub mod print;
pub mod swap;

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{Arena, NodeId};

pub use equal_paths::equal_paths;
pub use print::{print, print_to_depth, PRINT_DEPTH};
pub use swap::swap;

#[inline]
pub(crate) fn get_p<K, V>(arena: &Arena<K, V>, idx: NodeId) -> Option<NodeId> {
    arena[idx].p
}

#[inline]
pub(crate) fn get_l<K, V>(arena: &Arena<K, V>, idx: NodeId) -> Option<NodeId> {
    arena[idx].l
}

#[inline]
pub(crate) fn get_r<K, V>(arena: &Arena<K, V>, idx: NodeId) -> Option<NodeId> {
    arena[idx].r
}

#[inline]
pub(crate) fn set_p<K, V>(arena: &mut Arena<K, V>, idx: NodeId, v: Option<NodeId>) {
    arena[idx].p = v;
}

#[inline]
pub(crate) fn set_l<K, V>(arena: &mut Arena<K, V>, idx: NodeId, v: Option<NodeId>) {
    arena[idx].l = v;
}

#[inline]
pub(crate) fn set_r<K, V>(arena: &mut Arena<K, V>, idx: NodeId, v: Option<NodeId>) {
    arena[idx].r = v;
}

/// Whether `node` hangs off the left slot of its parent.
#[inline]
pub(crate) fn is_left_child<K, V>(arena: &Arena<K, V>, node: NodeId) -> bool {
    match get_p(arena, node) {
        Some(p) => get_l(arena, p) == Some(node),
        None => false,
    }
}

/// Points the slot of `parent` that currently holds `old` at `new`.
pub(crate) fn replace_child<K, V>(
    arena: &mut Arena<K, V>,
    parent: NodeId,
    old: NodeId,
    new: Option<NodeId>,
) {
    if get_l(arena, parent) == Some(old) {
        set_l(arena, parent, new);
    } else {
        debug_assert_eq!(get_r(arena, parent), Some(old), "node is not a child of parent");
        set_r(arena, parent, new);
    }
}

/// Leftmost node under `root`.
pub fn first<K, V>(arena: &Arena<K, V>, root: Option<NodeId>) -> Option<NodeId> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub fn last<K, V>(arena: &Arena<K, V>, root: Option<NodeId>) -> Option<NodeId> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<K, V>(arena: &Arena<K, V>, mut curr: NodeId) -> Option<NodeId> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<K, V>(arena: &Arena<K, V>, mut curr: NodeId) -> Option<NodeId> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Finds a node by key.
pub fn find<K, V, C>(arena: &Arena<K, V>, root: Option<NodeId>, key: &K, comparator: C) -> Option<NodeId>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, &arena[i].k) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Number of nodes under `root`.
pub fn size<K, V>(arena: &Arena<K, V>, root: Option<NodeId>) -> usize {
    let mut count = 0;
    let mut stack: Vec<NodeId> = root.into_iter().collect();
    while let Some(i) = stack.pop() {
        count += 1;
        stack.extend(get_l(arena, i));
        stack.extend(get_r(arena, i));
    }
    count
}

/// Height of the subtree under `node`; an empty subtree has height 0.
pub fn height<K, V>(arena: &Arena<K, V>, node: Option<NodeId>) -> usize {
    let Some(root) = node else {
        return 0;
    };
    // Level-order walk so a degenerate, unbalanced tree cannot overflow the
    // call stack.
    let mut depth = 0;
    let mut level = vec![root];
    while !level.is_empty() {
        depth += 1;
        level = level
            .iter()
            .flat_map(|&i| [get_l(arena, i), get_r(arena, i)])
            .flatten()
            .collect();
    }
    depth
}

/// Height-balance check: every node's subtrees differ in height by at most
/// one. Returns the subtree height, or `None` when the check fails.
pub fn balanced_height<K, V>(arena: &Arena<K, V>, node: Option<NodeId>) -> Option<usize> {
    let Some(root) = node else {
        return Some(0);
    };
    // Explicit post-order: the unbalanced tree can be arbitrarily deep.
    let mut heights: HashMap<NodeId, usize> = HashMap::new();
    let mut stack = vec![(root, false)];
    while let Some((i, expanded)) = stack.pop() {
        let l = get_l(arena, i);
        let r = get_r(arena, i);
        if !expanded {
            stack.push((i, true));
            stack.extend(l.map(|c| (c, false)));
            stack.extend(r.map(|c| (c, false)));
            continue;
        }
        let lh = l.and_then(|c| heights.remove(&c)).unwrap_or(0);
        let rh = r.and_then(|c| heights.remove(&c)).unwrap_or(0);
        if lh.abs_diff(rh) > 1 {
            return None;
        }
        heights.insert(i, 1 + lh.max(rh));
    }
    heights.remove(&root)
}
