use std::iter::FusedIterator;

use crate::types::{Arena, NodeId};
use crate::util;

/// In-order iterator over `(&key, &value)` pairs.
///
/// Steps with successor/predecessor links, so it holds no stack. It borrows
/// the tree, which keeps structural mutation out while it is alive.
pub struct Iter<'a, K, V> {
    arena: &'a Arena<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        arena: &'a Arena<K, V>,
        front: Option<NodeId>,
        back: Option<NodeId>,
        remaining: usize,
    ) -> Self {
        Self {
            arena,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.remaining -= 1;
        self.front = util::next(self.arena, i);
        let arena = self.arena;
        let node = &arena[i];
        Some((&node.k, &node.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.remaining -= 1;
        self.back = util::prev(self.arena, i);
        let arena = self.arena;
        let node = &arena[i];
        Some((&node.k, &node.v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
