use parent_bst::{Error, Tree};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;

use crate::{is_consistent, Op};

/// Applies a set of operations to a tree and to a sorted `Vec` holding the same keys.
/// Returns how many inserts and successful deletes happened.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, model: &mut Vec<K>) -> (usize, usize)
where
    K: Ord + Clone,
{
    let (mut inserts, mut deletes) = (0, 0);
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                let at = model.partition_point(|m| m <= k);
                model.insert(at, k.clone());
                inserts += 1;
            }
            Op::Remove(k) => {
                if bst.delete(k).is_ok() {
                    let at = model.binary_search(k).expect("tree deleted a key the model lacks");
                    model.remove(at);
                    deletes += 1;
                }
            }
            Op::Iter => assert!(bst.in_order().eq(model.iter())),
        }
    }

    (inserts, deletes)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();

    let (inserts, deletes) = do_ops(&ops, &mut tree, &mut model);
    tree.len() == inserts - deletes && tree.in_order().eq(model.iter()) && is_consistent(&tree)
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i16>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let keys: Vec<_> = tree.in_order().collect();

    keys.windows(2).all(|pair| pair[0] <= pair[1])
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x).map(|n| n.key()) == Some(x))
        && xs.iter().all(|x| tree.search_recursive(x).map(|n| n.key()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: BTreeSet<_> = xs.into_iter().collect();

    nots.iter()
        .filter(|x| !added.contains(*x))
        .all(|x| tree.search(x).is_none() && tree.successor(x) == Err(Error::KeyNotFound))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        // Duplicates are stored once per insert, so delete until the key is gone.
        while tree.delete(delete).is_ok() {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| tree.search(x).is_none())
        && still_present.iter().all(|x| tree.search(x).is_some())
        && tree.len() == still_present.len()
        && is_consistent(&tree)
}

#[quickcheck]
fn successor_and_predecessor_follow_sorted_order(xs: Vec<i8>) -> bool {
    let mut seen = BTreeSet::new();
    let tree: Tree<_> = xs.into_iter().filter(|x| seen.insert(*x)).collect();
    let sorted: Vec<_> = seen.into_iter().collect();

    sorted.iter().enumerate().all(|(i, k)| {
        let next = sorted.get(i + 1);
        let prev = i.checked_sub(1).map(|p| &sorted[p]);
        let successor = tree.successor(k);

        successor == Ok(next)
            && tree.predecessor(k) == Ok(prev)
            && next.into_iter().all(|n| tree.predecessor(n) == Ok(Some(k)))
    })
}

#[quickcheck]
fn delete_missing_leaves_tree_unchanged(xs: Vec<i8>, missing: i8) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().filter(|x| *x != missing).collect();
    let before: Vec<_> = tree.pre_order().copied().collect();

    tree.delete(&missing) == Err(Error::KeyNotFound)
        && tree.pre_order().copied().eq(before.iter().copied())
        && is_consistent(&tree)
}

#[quickcheck]
fn min_and_max_match_extremes(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    tree.min().map(|n| n.key()) == xs.iter().min()
        && tree.max().map(|n| *n.key()) == xs.iter().max().copied()
}

#[quickcheck]
fn clone_is_an_equal_copy(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let clone = tree.clone();

    clone.pre_order().eq(tree.pre_order()) && clone.height() == tree.height() && is_consistent(&clone)
}
