use quickcheck::{Arbitrary, Gen};

mod tree;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest. The crate keeps its own copy for
/// unit tests, but that one is private so integration tests need this one.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Insert the value into the tree
    Insert(T),
    /// Remove one occurrence of the value from the tree
    Remove(T),
    /// Rebalance the tree
    Balance,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Balance,
            _ => unreachable!(),
        }
    }
}
