//! Depth-first walks over a [`Tree`](crate::Tree).
//!
//! Every walk keeps its own explicit stack instead of recursing, so a tree that degenerated into a
//! long chain is walked in constant call-stack depth. Each call to
//! [`Tree::in_order`](crate::Tree::in_order) and friends starts a fresh walk from the current
//! state of the tree.

use std::iter::FusedIterator;

use crate::node::NodeRef;

/// Yields keys in sorted order: left subtree, node, right subtree.
pub struct InOrder<'a, K> {
    stack: Vec<NodeRef<'a, K>>,
    remaining: usize,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(root: Option<NodeRef<'a, K>>, len: usize) -> Self {
        let mut walk = Self {
            stack: Vec::new(),
            remaining: len,
        };
        walk.push_left_spine(root);
        walk
    }

    fn push_left_spine(&mut self, mut node: Option<NodeRef<'a, K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for InOrder<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}

/// Yields each node's key before the keys of its subtrees: node, left subtree, right subtree.
pub struct PreOrder<'a, K> {
    stack: Vec<NodeRef<'a, K>>,
    remaining: usize,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn new(root: Option<NodeRef<'a, K>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is popped first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for PreOrder<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for PreOrder<'_, K> {}

/// Yields each node's key after the keys of its subtrees: left subtree, right subtree, node.
pub struct PostOrder<'a, K> {
    stack: Vec<NodeRef<'a, K>>,
    /// The next subtree to descend into, if any.
    pending: Option<NodeRef<'a, K>>,
    /// The node yielded most recently. Seeing it as the right child of the stack top means that
    /// right subtree is finished.
    last: Option<NodeRef<'a, K>>,
    remaining: usize,
}

impl<'a, K> PostOrder<'a, K> {
    pub(crate) fn new(root: Option<NodeRef<'a, K>>, len: usize) -> Self {
        Self {
            stack: Vec::new(),
            pending: root,
            last: None,
            remaining: len,
        }
    }
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.pending.take() {
                self.stack.push(node);
                self.pending = node.left();
                continue;
            }

            let top = *self.stack.last()?;
            match top.right() {
                Some(right) if !self.last.is_some_and(|last| last.ptr_eq(&right)) => {
                    self.pending = Some(right);
                }
                _ => {
                    self.stack.pop();
                    self.last = Some(top);
                    self.remaining -= 1;
                    return Some(top.key());
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for PostOrder<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for PostOrder<'_, K> {}
