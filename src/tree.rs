//! A mutable BST whose nodes keep a link back to their parent. The parent links let
//! [`Tree::successor`] and [`Tree::predecessor`] climb the tree without a stack, and let deletion
//! splice subtrees in place with a single `transplant` primitive.
//!
//! The tree is not self-balancing. Inserting keys in sorted order builds a chain as deep as the
//! tree is large; every operation still works, just in `O(n)` instead of `O(lg n)`. Walks, clones
//! and drops never recurse so deep chains are safe.
//!
//! Equal keys are allowed. A key equal to a node's key is placed in that node's right subtree.
//!
//! # Examples
//!
//! ```
//! use parent_bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//!
//! tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//! assert_eq!(tree.search(&1).map(|n| *n.key()), Some(1));
//! assert_eq!(tree.successor(&1), Ok(Some(&2)));
//!
//! // Deleting a key that isn't there leaves the tree alone.
//! assert_eq!(tree.delete(&42), Err(Error::KeyNotFound));
//! assert_eq!(tree.delete(&2), Ok(()));
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 3]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::error::Error;
use crate::node::{Link, Node, NodeRef};
use crate::traverse::{InOrder, PostOrder, PreOrder};

/// An unbalanced Binary Search Tree of keys. Nodes are linked to their children and to their
/// parent.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

// SAFETY: The tree exclusively owns every node reachable from `root`, like a `Box` would. Parent
// links only point at nodes of the same tree.
unsafe impl<K: Send> Send for Tree<K> {}
unsafe impl<K: Sync> Sync for Tree<K> {}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        let mut stack: Vec<_> = self.root.take().0.into_iter().collect();
        while let Some(ptr) = stack.pop() {
            // SAFETY: Every node was allocated with `Box::new` in `Node::new_leaf` and is owned by
            // exactly one child link (or the root), so each is popped, and freed, exactly once.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            stack.extend(node.left.0);
            stack.extend(node.right.0);
        }
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        let Some(root) = self.root() else {
            return tree;
        };

        let new_root = Node::new_leaf(root.key().clone(), Link(None));
        tree.root = Link::to(new_root);
        tree.len = 1;

        // Each new node is linked in as soon as it exists so a panicking `K::clone` still leaves
        // `tree` able to free everything built so far.
        let mut stack = vec![(root, new_root)];
        while let Some((original, copy)) = stack.pop() {
            if let Some(left) = original.left() {
                let new_left = Node::new_leaf(left.key().clone(), Link::to(copy));
                // SAFETY: `copy` is a live node owned by `tree` and nothing else refers to it.
                unsafe { (*copy.as_ptr()).left = Link::to(new_left) };
                tree.len += 1;
                stack.push((left, new_left));
            }
            if let Some(right) = original.right() {
                let new_right = Node::new_leaf(right.key().clone(), Link::to(copy));
                // SAFETY: See above.
                unsafe { (*copy.as_ptr()).right = Link::to(new_right) };
                tree.len += 1;
                stack.push((right, new_right));
            }
        }

        tree
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// The number of keys in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        // SAFETY: The root is owned by `self` and `&self` keeps it from being modified or freed
        // while the handle lives.
        unsafe { NodeRef::from_link(self.root) }
    }

    /// The node holding the smallest key.
    pub fn min(&self) -> Option<NodeRef<'_, K>> {
        self.root().map(|root| root.subtree_min())
    }

    /// The node holding the largest key.
    pub fn max(&self) -> Option<NodeRef<'_, K>> {
        self.root().map(|root| root.subtree_max())
    }

    /// The number of levels in the tree: 0 when empty, 1 for a lone root, `len()` for a chain.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        height
    }

    /// Walks the keys in sorted order.
    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder::new(self.root(), self.len)
    }

    /// Walks the keys visiting every node before its left subtree, then its right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, K> {
        PreOrder::new(self.root(), self.len)
    }

    /// Walks the keys visiting every node after its left subtree, then its right subtree.
    pub fn post_order(&self) -> PostOrder<'_, K> {
        PostOrder::new(self.root(), self.len)
    }

    /// Finds the first node holding `key` on the way down from the root.
    fn locate(&self, key: &K) -> Option<NonNull<Node<K>>>
    where
        K: Ord,
    {
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // SAFETY: Every node reachable from the root is live and `&self` rules out a
            // concurrent mutation.
            let node = unsafe { ptr.as_ref() };
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.0,
                Ordering::Equal => return Some(ptr),
                Ordering::Greater => node.right.0,
            };
        }
        None
    }

    /// Finds a node holding `key`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = [6, 4, 7].into_iter().collect();
    ///
    /// let node = tree.search(&7).unwrap();
    /// assert_eq!(node.key(), &7);
    /// assert_eq!(node.parent().map(|p| *p.key()), Some(6));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>>
    where
        K: Ord,
    {
        // SAFETY: The located node belongs to `self` and `&self` keeps it alive and unmodified.
        self.locate(key).map(|ptr| unsafe { NodeRef::new(ptr) })
    }

    /// The recursive form of [`Tree::search`]; it returns the very same node.
    ///
    /// This recurses once per level, so on a tree built from sorted keys it can run out of stack
    /// where [`Tree::search`] would not.
    pub fn search_recursive(&self, key: &K) -> Option<NodeRef<'_, K>>
    where
        K: Ord,
    {
        fn descend<'a, K: Ord>(node: Option<NodeRef<'a, K>>, key: &K) -> Option<NodeRef<'a, K>> {
            let node = node?;
            match key.cmp(node.key()) {
                Ordering::Less => descend(node.left(), key),
                Ordering::Equal => Some(node),
                Ordering::Greater => descend(node.right(), key),
            }
        }

        descend(self.root(), key)
    }

    /// Whether any node holds `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.locate(key).is_some()
    }

    /// The key following `key` in sorted order, or `Ok(None)` if `key` is the largest. Fails when
    /// `key` isn't in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{Error, Tree};
    ///
    /// let tree: Tree<_> = [6, 4, 7, 2, 5, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Ok(Some(&6)));
    /// assert_eq!(tree.successor(&8), Ok(None));
    /// assert_eq!(tree.successor(&3), Err(Error::KeyNotFound));
    /// ```
    pub fn successor(&self, key: &K) -> Result<Option<&K>, Error>
    where
        K: Ord,
    {
        let node = self.search(key).ok_or(Error::KeyNotFound)?;
        Ok(node.successor().map(|n| n.key()))
    }

    /// The key preceding `key` in sorted order, or `Ok(None)` if `key` is the smallest. Fails when
    /// `key` isn't in the tree.
    pub fn predecessor(&self, key: &K) -> Result<Option<&K>, Error>
    where
        K: Ord,
    {
        let node = self.search(key).ok_or(Error::KeyNotFound)?;
        Ok(node.predecessor().map(|n| n.key()))
    }

    /// Inserts `key` as a new leaf. Keys equal to an existing key are kept and go to its right.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.root().unwrap().right().is_some());
    /// ```
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        let mut parent = None;
        let mut goes_left = false;
        let mut current = self.root.0;
        while let Some(ptr) = current {
            parent = Some(ptr);
            // SAFETY: Reachable nodes are live and this reference is gone before any write below.
            let node = unsafe { ptr.as_ref() };
            goes_left = node.key > key;
            current = if goes_left { node.left.0 } else { node.right.0 };
        }

        let leaf = Node::new_leaf(key, Link(parent));
        match parent {
            None => self.root = Link::to(leaf),
            Some(parent) => {
                trace!(
                    "attaching leaf as {} child",
                    if goes_left { "left" } else { "right" }
                );
                // SAFETY: `parent` is a live node of this tree and we hold `&mut self`, so no
                // reference into it exists.
                unsafe {
                    if goes_left {
                        (*parent.as_ptr()).left = Link::to(leaf);
                    } else {
                        (*parent.as_ptr()).right = Link::to(leaf);
                    }
                }
            }
        }
        self.len += 1;

        if cfg!(debug_assertions) {
            // SAFETY: `leaf` was just linked in and is live.
            unsafe { self.assert_linked(leaf) };
        }
    }

    /// Deletes one node holding `key`. When the tree holds `key` more than once, the copy
    /// [`Tree::search`] finds is the one removed. Deleting a missing key fails and changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = [6, 4, 7, 2, 5, 8].into_iter().collect();
    ///
    /// tree.delete(&4).unwrap();
    /// assert_eq!(tree.root().unwrap().left().map(|n| *n.key()), Some(5));
    ///
    /// assert_eq!(tree.delete(&99), Err(Error::KeyNotFound));
    /// assert_eq!(tree.len(), 5);
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<(), Error>
    where
        K: Ord,
    {
        let Some(node) = self.locate(key) else {
            debug!("delete found no matching key, tree unchanged");
            return Err(Error::KeyNotFound);
        };

        // SAFETY: `node` and every pointer read out of the tree below are live nodes of this tree.
        // We hold `&mut self` and never create a reference into a node, so all writes go through
        // raw pointers without aliasing anything.
        unsafe {
            let left = (*node.as_ptr()).left;
            let right = (*node.as_ptr()).right;
            match (left.0, right.0) {
                (None, _) => {
                    trace!("delete: replacing node with its right subtree");
                    self.transplant(node, right);
                }
                (Some(_), None) => {
                    trace!("delete: replacing node with its left subtree");
                    self.transplant(node, left);
                }
                (Some(left_child), Some(right_child)) => {
                    trace!("delete: promoting in-order successor");
                    let successor = Node::subtree_min(right_child);
                    if successor != right_child {
                        // Lift the successor out, its right subtree takes its place, then adopt
                        // `node`'s whole right subtree.
                        self.transplant(successor, (*successor.as_ptr()).right);
                        (*successor.as_ptr()).right = right;
                        (*right_child.as_ptr()).parent = Link::to(successor);
                    }
                    self.transplant(node, Link::to(successor));
                    (*successor.as_ptr()).left = left;
                    (*left_child.as_ptr()).parent = Link::to(successor);
                }
            }

            // Nothing links to `node` anymore. Dropping the box frees only the node and its key;
            // its child links are plain pointers, so the moved subtrees are untouched.
            drop(Box::from_raw(node.as_ptr()));
        }
        self.len -= 1;

        Ok(())
    }

    /// Puts the subtree rooted at `v` where the subtree rooted at `u` hangs, as seen from `u`'s
    /// parent. `u`'s own links are left as they are; callers relink or free it.
    ///
    /// # Safety
    ///
    /// `u` must be a live node of this tree and `v`, if present, a live node of this tree that
    /// isn't an ancestor of `u`. No reference into either node may be alive.
    unsafe fn transplant(&mut self, u: NonNull<Node<K>>, v: Link<K>) {
        let parent = (*u.as_ptr()).parent;
        match parent.0 {
            None => self.root = v,
            Some(p) if (*p.as_ptr()).left.is(u) => (*p.as_ptr()).left = v,
            Some(p) => (*p.as_ptr()).right = v,
        }
        if let Some(v) = v.0 {
            (*v.as_ptr()).parent = parent;
            if cfg!(debug_assertions) {
                self.assert_linked(v);
            }
        }
    }

    /// Checks that `node`'s parent, or the root slot, points back at `node`.
    ///
    /// # Safety
    ///
    /// `node` and its parent must be live and unaliased by mutable references.
    unsafe fn assert_linked(&self, node: NonNull<Node<K>>) {
        match (*node.as_ptr()).parent.0 {
            None => assert!(self.root.is(node), "parentless node is not the root"),
            Some(p) => assert!(
                (*p.as_ptr()).left.is(node) || (*p.as_ptr()).right.is(node),
                "parent does not link back to its child"
            ),
        }
    }
}

#[cfg(test)]
impl<K> Tree<K>
where
    K: Ord,
{
    /// Walks the whole tree checking ordering (with ties to the right), parent links and the
    /// node count.
    pub(crate) fn assert_invariants(&self) {
        let Some(root) = self.root() else {
            assert_eq!(self.len, 0);
            return;
        };
        assert!(root.parent().is_none(), "root has a parent");

        let mut count = 0;
        // Each entry carries an inclusive lower bound and an exclusive upper bound.
        let mut stack = vec![(root, None::<&K>, None::<&K>)];
        while let Some((node, low, high)) = stack.pop() {
            count += 1;
            let key = node.key();
            if let Some(low) = low {
                assert!(low <= key, "key below its inclusive lower bound");
            }
            if let Some(high) = high {
                assert!(key < high, "key not below its exclusive upper bound");
            }
            if let Some(left) = node.left() {
                assert!(left.parent().is_some_and(|p| p.ptr_eq(&node)));
                stack.push((left, low, Some(key)));
            }
            if let Some(right) = node.right() {
                assert!(right.parent().is_some_and(|p| p.ptr_eq(&node)));
                stack.push((right, Some(key), high));
            }
        }
        assert_eq!(count, self.len);
    }
}
