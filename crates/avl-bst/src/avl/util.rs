//! Rotations and the post-insert / post-remove rebalancing walks.
//!
//! Balance factors follow `height(right) - height(left)`. Every function
//! takes the current root id and returns the (possibly new) root id.

use std::cmp::Ordering;

use log::trace;

use crate::error::InvariantError;
use crate::types::{Arena, NodeId};
use crate::util::{first, get_l, get_p, get_r, next, replace_child, set_l, set_p, set_r, size};

#[inline]
fn bf<K, V>(arena: &Arena<K, V>, i: NodeId) -> i8 {
    arena[i].bf
}

#[inline]
fn set_bf<K, V>(arena: &mut Arena<K, V>, i: NodeId, v: i8) {
    arena[i].bf = v;
}

/// Rotates `pivot` down to the right; its left child takes its place.
///
/// Balance factors are left untouched.
pub fn rotate_right<K, V>(arena: &mut Arena<K, V>, root: NodeId, pivot: NodeId) -> NodeId {
    let nl = get_l(arena, pivot).expect("rotate_right requires a left child");
    let p = get_p(arena, pivot);
    let nlr = get_r(arena, nl);
    trace!("rotate right at {pivot}, new subtree root {nl}");

    set_p(arena, nl, p);
    set_r(arena, nl, Some(pivot));
    set_p(arena, pivot, Some(nl));
    set_l(arena, pivot, nlr);
    if let Some(nlr) = nlr {
        set_p(arena, nlr, Some(pivot));
    }
    match p {
        Some(p) => {
            replace_child(arena, p, pivot, Some(nl));
            root
        }
        None => nl,
    }
}

/// Rotates `pivot` down to the left; its right child takes its place.
///
/// Balance factors are left untouched.
pub fn rotate_left<K, V>(arena: &mut Arena<K, V>, root: NodeId, pivot: NodeId) -> NodeId {
    let nr = get_r(arena, pivot).expect("rotate_left requires a right child");
    let p = get_p(arena, pivot);
    let nrl = get_l(arena, nr);
    trace!("rotate left at {pivot}, new subtree root {nr}");

    set_p(arena, nr, p);
    set_l(arena, nr, Some(pivot));
    set_p(arena, pivot, Some(nr));
    set_r(arena, pivot, nrl);
    if let Some(nrl) = nrl {
        set_p(arena, nrl, Some(pivot));
    }
    match p {
        Some(p) => {
            replace_child(arena, p, pivot, Some(nr));
            root
        }
        None => nr,
    }
}

/// Balances after a double rotation that lifted `g` over `l` and `r`.
///
/// `gbf` is `g`'s balance before the rotation; `l` inherited `g`'s old left
/// subtree and `r` its old right subtree.
fn settle_double_rotation<K, V>(arena: &mut Arena<K, V>, l: NodeId, r: NodeId, g: NodeId, gbf: i8) {
    set_bf(arena, l, if gbf == 1 { -1 } else { 0 });
    set_bf(arena, r, if gbf == -1 { 1 } else { 0 });
    set_bf(arena, g, 0);
}

/// Change to the parent's balance factor when the subtree under `node`
/// loses one level: `+1` for a left child, `-1` for a right child, `0` at
/// the root.
pub(crate) fn shrink_delta<K, V>(arena: &Arena<K, V>, node: NodeId) -> i8 {
    match get_p(arena, node) {
        Some(p) if get_l(arena, p) == Some(node) => 1,
        Some(_) => -1,
        None => 0,
    }
}

/// Walks up from a freshly attached leaf, updating balance factors until a
/// subtree height stops growing or one rotation restores balance.
pub fn rebalance_after_insert<K, V>(arena: &mut Arena<K, V>, mut root: NodeId, node: NodeId) -> NodeId {
    let mut child = node;
    while let Some(parent) = get_p(arena, child) {
        let pbf = bf(arena, parent) + if get_l(arena, parent) == Some(child) { -1 } else { 1 };
        set_bf(arena, parent, pbf);
        match pbf {
            0 => break,
            -1 | 1 => child = parent,
            _ => {
                root = fix_after_insert(arena, root, parent, child);
                break;
            }
        }
    }
    root
}

fn fix_after_insert<K, V>(arena: &mut Arena<K, V>, root: NodeId, n: NodeId, c: NodeId) -> NodeId {
    let nbf = bf(arena, n);
    let cbf = bf(arena, c);
    trace!("insert imbalance at {n}: bf={nbf}, child bf={cbf}");
    match (nbf, cbf) {
        (-2, -1) => {
            let root = rotate_right(arena, root, n);
            set_bf(arena, n, 0);
            set_bf(arena, c, 0);
            root
        }
        (2, 1) => {
            let root = rotate_left(arena, root, n);
            set_bf(arena, n, 0);
            set_bf(arena, c, 0);
            root
        }
        (-2, 1) => {
            let g = get_r(arena, c).expect("left-right case has a grandchild");
            let gbf = bf(arena, g);
            let root = rotate_left(arena, root, c);
            let root = rotate_right(arena, root, n);
            settle_double_rotation(arena, c, n, g, gbf);
            root
        }
        (2, -1) => {
            let g = get_l(arena, c).expect("right-left case has a grandchild");
            let gbf = bf(arena, g);
            let root = rotate_right(arena, root, c);
            let root = rotate_left(arena, root, n);
            settle_double_rotation(arena, n, c, g, gbf);
            root
        }
        _ => unreachable!("insert fix requires bf=±2 over a leaning child, got bf={nbf} with child bf={cbf}"),
    }
}

/// Walks up from the parent of a removed node.
///
/// `delta` is the change to `start`'s balance factor caused by the removal.
/// The walk stops once a subtree keeps its height.
pub fn rebalance_after_remove<K, V>(
    arena: &mut Arena<K, V>,
    mut root: NodeId,
    start: NodeId,
    delta: i8,
) -> NodeId {
    let mut node = Some(start);
    let mut delta = delta;
    while let Some(n) = node {
        // Read before rotating: a rotation here hangs a different node under
        // `parent`.
        let parent = get_p(arena, n);
        let next_delta = shrink_delta(arena, n);

        let candidate = bf(arena, n) + delta;
        let shrunk = match candidate {
            -1 | 1 => {
                set_bf(arena, n, candidate);
                false
            }
            0 => {
                set_bf(arena, n, 0);
                true
            }
            -2 => {
                let (r, shrunk) = fix_left_heavy(arena, root, n);
                root = r;
                shrunk
            }
            2 => {
                let (r, shrunk) = fix_right_heavy(arena, root, n);
                root = r;
                shrunk
            }
            _ => unreachable!("remove walk requires a resting balance factor, got candidate bf={candidate} at {n}"),
        };
        if !shrunk {
            break;
        }
        node = parent;
        delta = next_delta;
    }
    root
}

/// `n` is two levels taller on the left. Returns the new root and whether
/// the subtree lost height.
fn fix_left_heavy<K, V>(arena: &mut Arena<K, V>, root: NodeId, n: NodeId) -> (NodeId, bool) {
    let c = get_l(arena, n).expect("left-heavy node has a left child");
    let cbf = bf(arena, c);
    trace!("remove imbalance at {n}: bf=-2, child bf={cbf}");
    match cbf {
        -1 => {
            let root = rotate_right(arena, root, n);
            set_bf(arena, n, 0);
            set_bf(arena, c, 0);
            (root, true)
        }
        0 => {
            let root = rotate_right(arena, root, n);
            set_bf(arena, n, -1);
            set_bf(arena, c, 1);
            (root, false)
        }
        1 => {
            let g = get_r(arena, c).expect("right-leaning child has a right child");
            let gbf = bf(arena, g);
            let root = rotate_left(arena, root, c);
            let root = rotate_right(arena, root, n);
            settle_double_rotation(arena, c, n, g, gbf);
            (root, true)
        }
        _ => unreachable!("heavy-side fix requires a child with bf in -1..=1, got {cbf} under {n}"),
    }
}

/// Mirror of [`fix_left_heavy`].
fn fix_right_heavy<K, V>(arena: &mut Arena<K, V>, root: NodeId, n: NodeId) -> (NodeId, bool) {
    let c = get_r(arena, n).expect("right-heavy node has a right child");
    let cbf = bf(arena, c);
    trace!("remove imbalance at {n}: bf=2, child bf={cbf}");
    match cbf {
        1 => {
            let root = rotate_left(arena, root, n);
            set_bf(arena, n, 0);
            set_bf(arena, c, 0);
            (root, true)
        }
        0 => {
            let root = rotate_left(arena, root, n);
            set_bf(arena, n, 1);
            set_bf(arena, c, -1);
            (root, false)
        }
        -1 => {
            let g = get_l(arena, c).expect("left-leaning child has a left child");
            let gbf = bf(arena, g);
            let root = rotate_right(arena, root, c);
            let root = rotate_left(arena, root, n);
            settle_double_rotation(arena, n, c, g, gbf);
            (root, true)
        }
        _ => unreachable!("heavy-side fix requires a child with bf in -1..=1, got {cbf} under {n}"),
    }
}

/// Checks links, key order, stored balance factors, the AVL bound and that
/// every arena slot is reachable from `root`.
pub fn assert_avl_tree<K, V, C>(arena: &Arena<K, V>, root: Option<NodeId>, comparator: C) -> Result<(), InvariantError>
where
    C: Fn(&K, &K) -> Ordering,
{
    let counted = size(arena, root);
    if counted != arena.len() {
        return Err(InvariantError::LengthMismatch {
            counted,
            recorded: arena.len(),
        });
    }

    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(InvariantError::RootHasParent);
    }

    fn validate_links_and_bf<K, V>(arena: &Arena<K, V>, node: NodeId) -> Result<i64, InvariantError> {
        let l = get_l(arena, node);
        let r = get_r(arena, node);

        let mut lh = 0;
        if let Some(l) = l {
            if get_p(arena, l) != Some(node) {
                return Err(InvariantError::BrokenParentLink { node, child: l });
            }
            lh = validate_links_and_bf(arena, l)?;
        }
        let mut rh = 0;
        if let Some(r) = r {
            if get_p(arena, r) != Some(node) {
                return Err(InvariantError::BrokenParentLink { node, child: r });
            }
            rh = validate_links_and_bf(arena, r)?;
        }

        let expected = rh - lh;
        let actual = bf(arena, node);
        if i64::from(actual) != expected {
            return Err(InvariantError::BalanceMismatch { node, expected, actual });
        }
        if !(-1..=1).contains(&actual) {
            return Err(InvariantError::BalanceOutOfRange { node, actual });
        }

        Ok(1 + lh.max(rh))
    }

    validate_links_and_bf(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<NodeId> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(&arena[prev].k, &arena[i].k) != Ordering::Less {
                return Err(InvariantError::OrderViolated { node: i });
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TreeNode;

    fn leaf(arena: &mut Arena<i32, ()>, k: i32) -> NodeId {
        arena.insert(TreeNode::new(k, ()))
    }

    fn hang(arena: &mut Arena<i32, ()>, p: NodeId, c: NodeId, left: bool) {
        if left {
            arena[p].l = Some(c);
        } else {
            arena[p].r = Some(c);
        }
        arena[c].p = Some(p);
    }

    #[test]
    fn rotate_right_rewires_parent_and_child_links() {
        // 10 -> left 5 -> (3, 7); rotate at 10.
        let mut arena = Arena::new();
        let n10 = leaf(&mut arena, 10);
        let n5 = leaf(&mut arena, 5);
        let n3 = leaf(&mut arena, 3);
        let n7 = leaf(&mut arena, 7);
        hang(&mut arena, n10, n5, true);
        hang(&mut arena, n5, n3, true);
        hang(&mut arena, n5, n7, false);

        let root = rotate_right(&mut arena, n10, n10);
        assert_eq!(root, n5);
        assert_eq!(arena[n5].p, None);
        assert_eq!(arena[n5].r, Some(n10));
        assert_eq!(arena[n10].p, Some(n5));
        assert_eq!(arena[n10].l, Some(n7));
        assert_eq!(arena[n7].p, Some(n10));
        assert_eq!(arena[n5].l, Some(n3));
    }

    #[test]
    #[should_panic(expected = "heavy-side fix requires a child with bf in -1..=1")]
    fn heavy_side_fix_rejects_a_corrupt_child() {
        let mut arena = Arena::new();
        let n = leaf(&mut arena, 10);
        let c = leaf(&mut arena, 5);
        hang(&mut arena, n, c, true);
        arena[c].bf = 2;
        fix_left_heavy(&mut arena, n, n);
    }

    #[test]
    #[should_panic(expected = "insert fix requires bf=±2 over a leaning child")]
    fn insert_fix_rejects_a_balanced_child() {
        let mut arena = Arena::new();
        let n = leaf(&mut arena, 10);
        let c = leaf(&mut arena, 5);
        hang(&mut arena, n, c, true);
        arena[n].bf = -2;
        fix_after_insert(&mut arena, n, n, c);
    }

    #[test]
    fn rotate_left_under_a_parent_keeps_the_root() {
        // 1 -> right 10 -> right 20 -> left 15; rotate at 10.
        let mut arena = Arena::new();
        let n1 = leaf(&mut arena, 1);
        let n10 = leaf(&mut arena, 10);
        let n20 = leaf(&mut arena, 20);
        let n15 = leaf(&mut arena, 15);
        hang(&mut arena, n1, n10, false);
        hang(&mut arena, n10, n20, false);
        hang(&mut arena, n20, n15, true);

        let root = rotate_left(&mut arena, n1, n10);
        assert_eq!(root, n1);
        assert_eq!(arena[n1].r, Some(n20));
        assert_eq!(arena[n20].p, Some(n1));
        assert_eq!(arena[n20].l, Some(n10));
        assert_eq!(arena[n10].r, Some(n15));
        assert_eq!(arena[n15].p, Some(n10));
    }

    #[test]
    fn rotation_leaves_balance_factors_alone() {
        let mut arena = Arena::new();
        let a = leaf(&mut arena, 1);
        let b = leaf(&mut arena, 2);
        hang(&mut arena, a, b, false);
        arena[a].bf = 1;
        rotate_left(&mut arena, a, a);
        assert_eq!(arena[a].bf, 1);
        assert_eq!(arena[b].bf, 0);
    }

    #[test]
    fn double_rotation_settles_from_grandchild_balance() {
        let mut arena = Arena::new();
        let l = leaf(&mut arena, 1);
        let g = leaf(&mut arena, 2);
        let r = leaf(&mut arena, 3);
        for (gbf, lbf, rbf) in [(0, 0, 0), (1, -1, 0), (-1, 0, 1)] {
            settle_double_rotation(&mut arena, l, r, g, gbf);
            assert_eq!((arena[l].bf, arena[g].bf, arena[r].bf), (lbf, 0, rbf));
        }
    }

    #[test]
    fn assert_avl_tree_reports_stale_balance() {
        let mut arena = Arena::new();
        let a = leaf(&mut arena, 1);
        let b = leaf(&mut arena, 2);
        hang(&mut arena, a, b, false);
        let cmp = |x: &i32, y: &i32| x.cmp(y);
        assert_eq!(
            assert_avl_tree(&arena, Some(a), cmp),
            Err(InvariantError::BalanceMismatch {
                node: a,
                expected: 1,
                actual: 0
            })
        );
        arena[a].bf = 1;
        assert_eq!(assert_avl_tree(&arena, Some(a), cmp), Ok(()));
    }
}
