//! Node storage and the read-only [`NodeRef`] handle handed out by the tree.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A possibly-empty pointer to a `Node`. A `Link` stored in a `left` or `right` slot owns the node
/// it points at; a `Link` stored in a `parent` slot never does. Only the owning tree frees nodes
/// and it only ever follows child links to do so.
pub(crate) struct Link<K>(pub(crate) Option<NonNull<Node<K>>>);

impl<K> Clone for Link<K> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}
impl<K> Copy for Link<K> {}

impl<K> Link<K> {
    pub(crate) fn to(node: NonNull<Node<K>>) -> Self {
        Link(Some(node))
    }

    pub(crate) fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    /// Whether this link points at exactly `node`.
    pub(crate) fn is(&self, node: NonNull<Node<K>>) -> bool {
        self.0 == Some(node)
    }
}

pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    pub(crate) parent: Link<K>,
}

impl<K> Node<K> {
    /// Allocates a childless node hanging off `parent`. The caller takes ownership of the
    /// allocation and must either link it into a tree or release it with `Box::from_raw`.
    pub(crate) fn new_leaf(key: K, parent: Link<K>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Node {
            key,
            left: Link(None),
            right: Link(None),
            parent,
        })))
    }

    /// Follows left links from `node` until there are none left.
    ///
    /// # Safety
    ///
    /// `node` and every node reachable from it through left links must be live.
    pub(crate) unsafe fn subtree_min(mut node: NonNull<Self>) -> NonNull<Self> {
        while let Some(left) = (*node.as_ptr()).left.0 {
            node = left;
        }
        node
    }

    /// Follows right links from `node` until there are none left.
    ///
    /// # Safety
    ///
    /// `node` and every node reachable from it through right links must be live.
    pub(crate) unsafe fn subtree_max(mut node: NonNull<Self>) -> NonNull<Self> {
        while let Some(right) = (*node.as_ptr()).right.0 {
            node = right;
        }
        node
    }
}

/// A read-only handle to one node of a [`Tree`](crate::Tree).
///
/// The handle borrows the tree, so the tree cannot be modified while any handle is alive. Handles
/// are cheap to copy and can be used to walk the tree in any direction, including upwards through
/// [`parent`](NodeRef::parent).
///
/// # Examples
///
/// ```
/// use parent_bst::Tree;
///
/// let tree: Tree<_> = [6, 4, 7].into_iter().collect();
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.key(), &6);
///
/// let left = root.left().unwrap();
/// assert_eq!(left.key(), &4);
/// assert!(left.parent().unwrap().ptr_eq(&root));
/// ```
pub struct NodeRef<'a, K> {
    node: NonNull<Node<K>>,
    _tree: PhantomData<&'a Node<K>>,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for NodeRef<'_, K> {}

// SAFETY: A `NodeRef` only ever hands out shared references into a tree it immutably borrows, the
// same as a `&K` would.
unsafe impl<K: Sync> Send for NodeRef<'_, K> {}
unsafe impl<K: Sync> Sync for NodeRef<'_, K> {}

impl<'a, K> NodeRef<'a, K> {
    /// # Safety
    ///
    /// `node` must stay live and unmodified for all of `'a`.
    pub(crate) unsafe fn new(node: NonNull<Node<K>>) -> Self {
        Self {
            node,
            _tree: PhantomData,
        }
    }

    /// # Safety
    ///
    /// Same as [`NodeRef::new`] for the node the link points at, if any.
    pub(crate) unsafe fn from_link(link: Link<K>) -> Option<Self> {
        link.0.map(|node| Self::new(node))
    }

    fn node(&self) -> &'a Node<K> {
        // SAFETY: `NodeRef::new` requires the node to outlive `'a` without being modified.
        unsafe { &*self.node.as_ptr() }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// The root of this node's left subtree.
    pub fn left(&self) -> Option<Self> {
        // SAFETY: Children of a live node in an immutably borrowed tree are live too.
        unsafe { Self::from_link(self.node().left) }
    }

    /// The root of this node's right subtree.
    pub fn right(&self) -> Option<Self> {
        // SAFETY: See `left`.
        unsafe { Self::from_link(self.node().right) }
    }

    /// The node whose child this is. `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        // SAFETY: The parent of a live node in an immutably borrowed tree is live too.
        unsafe { Self::from_link(self.node().parent) }
    }

    /// Whether `self` and `other` are the same node, as opposed to two nodes with equal keys.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.node == other.node
    }

    /// The node with the smallest key in the subtree rooted here.
    pub fn subtree_min(&self) -> Self {
        // SAFETY: Everything below a live node is live for as long as the tree is borrowed.
        unsafe { Self::new(Node::subtree_min(self.node)) }
    }

    /// The node with the largest key in the subtree rooted here.
    pub fn subtree_max(&self) -> Self {
        // SAFETY: See `subtree_min`.
        unsafe { Self::new(Node::subtree_max(self.node)) }
    }

    /// The node that follows this one in an in-order walk, or `None` if this is the last one.
    pub fn successor(&self) -> Option<Self> {
        if let Some(right) = self.right() {
            return Some(right.subtree_min());
        }

        // Climb while we're coming up from a right subtree. The first ancestor reached from its
        // left subtree is the successor.
        let mut current = *self;
        let mut parent = current.parent();
        while let Some(p) = parent {
            if !p.node().right.is(current.node) {
                break;
            }
            current = p;
            parent = p.parent();
        }
        parent
    }

    /// The node that precedes this one in an in-order walk, or `None` if this is the first one.
    pub fn predecessor(&self) -> Option<Self> {
        if let Some(left) = self.left() {
            return Some(left.subtree_max());
        }

        let mut current = *self;
        let mut parent = current.parent();
        while let Some(p) = parent {
            if !p.node().left.is(current.node) {
                break;
            }
            current = p;
            parent = p.parent();
        }
        parent
    }
}

impl<K> fmt::Debug for NodeRef<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .finish_non_exhaustive()
    }
}
