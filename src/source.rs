use num::{PrimInt, Signed};
use rand::distr::uniform::SampleUniform;
use rand::RngCore;
use std::fmt::Debug;
use std::hash::Hash;

/// Types implementing this trait can be stored as loot in
/// uniform and weighted tables.
///
/// Items are used as set/map keys, and a selection that does not
/// remove the item hands the caller a clone of it.
///
/// This trait is automatically implemented for all types satisfying
/// the bounds.
pub trait Item: Eq + Hash + Clone {}
impl<T> Item for T where T: Eq + Hash + Clone {}

/// Types implementing this trait can be used as selection weights.
/// Weights are signed integers; a weight of zero or less means
/// the entry can never be selected.
///
/// This trait is automatically implemented on any type
/// satisfying the constraints.
pub trait Weight: PrimInt + Signed + SampleUniform + Debug {}
impl<T> Weight for T where T: PrimInt + Signed + SampleUniform + Debug {}

/// Anything that can produce one item, or nothing.
///
/// Every table in this crate implements this trait, and tiered and
/// leveled tables hold boxed `LootSource`s of their own, so tables
/// can be nested to any depth.
pub trait LootSource<T> {
    /// Select one item from this source.
    ///
    /// Returns `None` when nothing can be selected: the pool is empty,
    /// every weight is non-positive, or a nested source came up empty.
    /// This is an expected outcome, not an error.
    ///
    /// Selection may mutate the source. Tables created with
    /// `remove_on_select` remove (uniform) or decrement (weighted)
    /// the item they return, and nested sources are selected from
    /// mutably as well.
    fn select(&mut self, rng: &mut dyn RngCore) -> Option<T>;
}

impl<T, S: LootSource<T> + ?Sized> LootSource<T> for Box<S> {
    fn select(&mut self, rng: &mut dyn RngCore) -> Option<T> {
        (**self).select(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixed(Option<u32>);

    impl LootSource<u32> for Fixed {
        fn select(&mut self, _rng: &mut dyn RngCore) -> Option<u32> {
            self.0
        }
    }

    /// Tests that boxed sources, including trait objects, delegate to
    /// the boxed value.
    #[test]
    fn test_boxed_source() {
        let mut rng = StdRng::seed_from_u64(1);

        let mut b = Box::new(Fixed(Some(7)));
        assert_eq!(Some(7), b.select(&mut rng));

        let mut d: Box<dyn LootSource<u32>> = Box::new(Fixed(None));
        assert_eq!(None, d.select(&mut rng));
    }
}
