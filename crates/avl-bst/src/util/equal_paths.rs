use crate::types::{Arena, NodeId};

use super::{get_l, get_r};

/// Whether every root-to-leaf path under `root` has the same length.
///
/// An empty tree passes. A node with a single child does not need its
/// missing side to match; only leaves are compared.
pub fn equal_paths<K, V>(arena: &Arena<K, V>, root: Option<NodeId>) -> bool {
    let mut leaf_depth: Option<usize> = None;
    let mut stack: Vec<(NodeId, usize)> = root.map(|r| (r, 1)).into_iter().collect();
    while let Some((i, depth)) = stack.pop() {
        if arena[i].is_leaf() {
            match leaf_depth {
                None => leaf_depth = Some(depth),
                Some(d) if d != depth => return false,
                Some(_) => {}
            }
            continue;
        }
        stack.extend(get_l(arena, i).map(|c| (c, depth + 1)));
        stack.extend(get_r(arena, i).map(|c| (c, depth + 1)));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TreeNode;

    fn chain(arena: &mut Arena<i32, ()>, keys: &[i32]) -> NodeId {
        let ids: Vec<NodeId> = keys.iter().map(|&k| arena.insert(TreeNode::new(k, ()))).collect();
        for w in ids.windows(2) {
            arena[w[0]].r = Some(w[1]);
            arena[w[1]].p = Some(w[0]);
        }
        ids[0]
    }

    #[test]
    fn empty_and_single_chain_pass() {
        let mut arena = Arena::new();
        assert!(equal_paths(&arena, None));
        let root = chain(&mut arena, &[1, 2, 3]);
        assert!(equal_paths(&arena, Some(root)));
    }

    #[test]
    fn uneven_leaves_fail() {
        let mut arena = Arena::new();
        let root = chain(&mut arena, &[2, 3, 4]);
        let leaf = arena.insert(TreeNode::new(1, ()));
        arena[root].l = Some(leaf);
        arena[leaf].p = Some(root);
        assert!(!equal_paths(&arena, Some(root)));
    }
}
