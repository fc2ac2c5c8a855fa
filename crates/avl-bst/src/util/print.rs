use std::fmt::Debug;

use crate::types::{Arena, NodeId};

/// Levels rendered by the tree-level `print` methods.
pub const PRINT_DEPTH: usize = 64;

enum Step {
    Node(Option<NodeId>, usize),
    Slot(usize, char),
}

/// Debug printer for a subtree, without a depth limit.
///
/// Each node renders as `Node[id] [bf=..] { key = value }` followed by its
/// left and right subtrees on indented `L=` / `R=` lines; an empty slot
/// renders as `∅`.
pub fn print<K, V>(arena: &Arena<K, V>, node: Option<NodeId>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    print_to_depth(arena, node, tab, usize::MAX)
}

/// Like [`print`], but renders at most `max_depth` levels. A non-empty
/// subtree below the limit renders as `…`.
pub fn print_to_depth<K, V>(arena: &Arena<K, V>, node: Option<NodeId>, tab: &str, max_depth: usize) -> String
where
    K: Debug,
    V: Debug,
{
    let mut out = String::new();
    let mut stack = vec![Step::Node(node, 0)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Slot(depth, side) => {
                out.push('\n');
                out.push_str(tab);
                for _ in 0..depth {
                    out.push_str("  ");
                }
                out.push(side);
                out.push('=');
            }
            Step::Node(None, _) => out.push('∅'),
            Step::Node(Some(_), depth) if depth >= max_depth => out.push('…'),
            Step::Node(Some(i), depth) => {
                let n = &arena[i];
                out.push_str(&format!("Node[{i}] [bf={}] {{ {:?} = {:?} }}", n.bf, n.k, n.v));
                // Popped in reverse: left slot first.
                stack.push(Step::Node(n.r, depth + 1));
                stack.push(Step::Slot(depth, 'R'));
                stack.push(Step::Node(n.l, depth + 1));
                stack.push(Step::Slot(depth, 'L'));
            }
        }
    }
    out
}
