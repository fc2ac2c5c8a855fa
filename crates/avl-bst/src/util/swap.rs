use crate::types::{Arena, NodeId};

use super::{get_l, get_p, get_r, is_left_child, set_l, set_p, set_r};

/// Swaps the positions of two nodes in a binary tree.
///
/// Only links move: each node keeps its key, value and balance factor, and
/// ends up where the other one was. Handles the case where one node is the
/// direct parent of the other. Returns the new root.
pub fn swap<K, V>(arena: &mut Arena<K, V>, root: NodeId, x: NodeId, y: NodeId) -> NodeId {
    if x == y {
        return root;
    }

    // Snapshot both neighbourhoods first; every rewrite below reads only
    // from here.
    let (xp, xl, xr, x_is_left) = (get_p(arena, x), get_l(arena, x), get_r(arena, x), is_left_child(arena, x));
    let (yp, yl, yr, y_is_left) = (get_p(arena, y), get_l(arena, y), get_r(arena, y), is_left_child(arena, y));

    adopt(arena, x, y, yl, true);
    adopt(arena, x, y, yr, false);
    adopt(arena, y, x, xl, true);
    adopt(arena, y, x, xr, false);

    let root = take_parent_slot(arena, root, y, xp, x_is_left);
    take_parent_slot(arena, root, x, yp, y_is_left)
}

/// Fills one child slot of `node` with what `other` held there. A slot
/// that held `node` itself gets `other`.
fn adopt<K, V>(arena: &mut Arena<K, V>, node: NodeId, other: NodeId, child: Option<NodeId>, left: bool) {
    let child = if child == Some(node) { Some(other) } else { child };
    if left {
        set_l(arena, node, child);
    } else {
        set_r(arena, node, child);
    }
    if let Some(c) = child {
        set_p(arena, c, Some(node));
    }
}

/// Moves `node` into the slot the other node held under `parent`. Nothing to do
/// when `parent` is `node` itself; `adopt` already linked the pair.
fn take_parent_slot<K, V>(
    arena: &mut Arena<K, V>,
    root: NodeId,
    node: NodeId,
    parent: Option<NodeId>,
    was_left: bool,
) -> NodeId {
    match parent {
        None => {
            set_p(arena, node, None);
            node
        }
        Some(p) if p == node => root,
        Some(p) => {
            set_p(arena, node, Some(p));
            if was_left {
                set_l(arena, p, Some(node));
            } else {
                set_r(arena, p, Some(node));
            }
            root
        }
    }
}
