use bstree::{Error, Tree};
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a plain vector. This way we can ensure that after a
/// random smattering of inserts, removals, and rebalances both hold the same multiset of values.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, reference: &mut Vec<i8>) {
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(*x);
                reference.push(*x);
            }
            Op::Remove(x) => {
                let expected = match reference.iter().position(|y| y == x) {
                    Some(pos) => {
                        reference.swap_remove(pos);
                        true
                    }
                    None => false,
                };
                assert_eq!(tree.remove(x), expected);
            }
            Op::Balance => match tree.make_balanced() {
                Ok(()) => assert!(!reference.is_empty()),
                Err(e) => {
                    assert_eq!(e, Error::EmptyTree);
                    assert!(reference.is_empty());
                }
            },
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut reference = Vec::new();

    do_ops(&ops, &mut tree, &mut reference);
    reference.sort();

    tree.count() == reference.len() && tree.iter().copied().eq(reference.iter().copied())
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i32>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    let values: Vec<_> = tree.iter().collect();
    values.windows(2).all(|pair| pair[0] <= pair[1]) && values.len() == xs.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    tree.insert_range(xs.iter().copied());

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    nots.iter()
        .filter(|x| !xs.contains(*x))
        .all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.remove(delete) {}
    }

    let still_present: Vec<_> = xs.iter().filter(|x| !deletes.contains(*x)).collect();

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.count() == still_present.len()
}

#[quickcheck]
fn make_balanced_keeps_values(xs: Vec<i16>) -> TestResult {
    if xs.is_empty() {
        return TestResult::discard();
    }
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let before: Vec<_> = tree.iter().copied().collect();

    tree.make_balanced().unwrap();

    TestResult::from_bool(tree.iter().copied().eq(before) && tree.count() == xs.len())
}

#[quickcheck]
fn make_balanced_shortens_sorted_chains(len: u8) -> TestResult {
    if len < 3 {
        return TestResult::discard();
    }
    let len = usize::from(len);
    let mut tree: Tree<_> = (0..len).collect();

    tree.make_balanced().unwrap();

    TestResult::from_bool(tree.height() < len && tree.iter().copied().eq(0..len))
}

/// Random values in, two drawings out: the only things a presenting caller needs.
#[test]
fn draw_random_tree_before_and_after_balancing() {
    let mut g = Gen::new(100);
    let values: Vec<u8> = (0..30).map(|_| u8::arbitrary(&mut g) % 100).collect();

    let mut tree = Tree::new();
    tree.insert_range(values.iter().copied());
    let before = tree.visualize();

    tree.make_balanced().unwrap();
    let after = tree.visualize();

    assert_eq!(before.lines().count(), 30);
    assert_eq!(after.lines().count(), 30);
    assert_eq!(tree.count(), 30);

    let mut sorted = values;
    sorted.sort();
    assert!(tree.iter().copied().eq(sorted));
}
