mod tree;

use parent_bst::{NodeRef, Tree};
use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Remove one K from the tree
    Remove(K),
    /// Compare the in-order walk against the model
    Iter,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }
}

/// Checks the whole tree through its public handles: ordering with ties to the right, parents
/// agreeing with children, and `len` matching the number of reachable nodes.
pub fn is_consistent<K: Ord>(tree: &Tree<K>) -> bool {
    let Some(root) = tree.root() else {
        return tree.is_empty();
    };
    if root.parent().is_some() {
        return false;
    }

    let mut count = 0;
    let mut stack: Vec<(NodeRef<'_, K>, Option<&K>, Option<&K>)> = vec![(root, None, None)];
    while let Some((node, low, high)) = stack.pop() {
        count += 1;
        let key = node.key();
        if low.is_some_and(|low| key < low) || high.is_some_and(|high| key >= high) {
            return false;
        }
        for (child, low, high) in [
            (node.left(), low, Some(key)),
            (node.right(), Some(key), high),
        ] {
            if let Some(child) = child {
                if !child.parent().is_some_and(|p| p.ptr_eq(&node)) {
                    return false;
                }
                stack.push((child, low, high));
            }
        }
    }

    count == tree.len()
}
