//! Arena-backed AVL tree.
//!
//! Nodes live in a [`slab::Slab`] and point at each other by [`NodeId`]
//! instead of by reference. A parent owns its children through its `l` / `r`
//! slots; the `p` link is navigational only. Removing a node frees its slot
//! for reuse without disturbing any other id.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`TreeNode`], [`Arena`], [`NodeId`], comparator types |
//! [`util`] | `first`, `next`, `prev`, `find`, `swap`, `print`, `equal_paths` |
//! [`bst`] | [`BinarySearchTree`]: unbalanced base tree and its primitives |
//! [`avl`] | [`AvlTree`], rotations and rebalancing walks |
//! [`error`] | [`TreeError`], [`InvariantError`] |
//!
//! ```
//! use avl_bst::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for k in [10, 20, 30] {
//!     tree.insert(k, k.to_string());
//! }
//! let root = tree.root().unwrap();
//! assert_eq!(*tree.key(root), 20);
//! assert_eq!(tree.get(&30).map(String::as_str), Some("30"));
//! assert!(tree.remove(&40).is_none());
//! ```

pub mod avl;
pub mod bst;
pub mod error;
pub mod types;
pub mod util;

pub use avl::AvlTree;
pub use bst::{BinarySearchTree, Iter, Location};
pub use error::{InvariantError, TreeError};
pub use types::{default_comparator, Arena, Comparator, NodeId, TreeNode};
