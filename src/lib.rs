//! This crate exposes a Binary Search Tree (BST) whose nodes know their parent, mostly for
//! educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than or equal to its own key. Equal keys are kept, to the right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). This tree does nothing to limit its height, so
//! keys inserted in sorted order produce a tree as tall as it is large.
//!
//! ## Parent links
//!
//! Every `Node` here also points back at its parent. That lets the tree find the next or previous
//! key from any node by climbing instead of searching again from the root, and lets deletion swap
//! a whole subtree into a node's place in one step. The cost is that every structural change must
//! keep child and parent links agreeing with each other. Parent links never own anything: the
//! [`Tree`] owns every node through child links alone.
//!
//! ```
//! use parent_bst::Tree;
//!
//! let tree: Tree<_> = [6, 4, 7, 2, 5, 8].into_iter().collect();
//!
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [2, 4, 5, 6, 7, 8]);
//! assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), [6, 4, 2, 5, 7, 8]);
//! assert_eq!(tree.post_order().copied().collect::<Vec<_>>(), [2, 5, 4, 8, 7, 6]);
//!
//! assert_eq!(tree.predecessor(&7), Ok(Some(&6)));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
mod node;
pub mod traverse;
pub mod tree;

pub use error::Error;
pub use node::NodeRef;
pub use tree::Tree;

#[cfg(test)]
mod test;
