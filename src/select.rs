use rand::{Rng, RngCore};
use tracing::{debug, trace};

use crate::source::Weight;

/// Pick an index into `weights` with probability proportional to
/// its weight.
///
/// The positive weights are summed, a number is drawn uniformly from
/// `[0, total)`, and the weights are walked in order, subtracting
/// each one from the draw until the draw falls below the current
/// weight. Weights of zero or less are treated as zero, and the sum
/// is taken in `u128`, so large weights keep their proportions.
///
/// Returns `None` if there are no weights, if a lone weight is not
/// positive, or if the total is not positive. A lone positive weight
/// is returned without drawing from `rng`.
///
/// # Examples
///
/// ```
/// use loot_tables::select::weighted_index;
///
/// let mut rng = rand::rng();
/// let i = weighted_index([0, 5, 0], &mut rng);
/// assert_eq!(Some(1), i);
/// ```
pub fn weighted_index<W, I>(weights: I, rng: &mut dyn RngCore) -> Option<usize>
where
    W: Weight,
    I: IntoIterator<Item = W>,
    I::IntoIter: Clone,
{
    let weights = weights.into_iter();

    let mut head = weights.clone();
    let first = head.next()?;
    if head.next().is_none() {
        return if first > W::zero() { Some(0) } else { None };
    }

    let total = weights
        .clone()
        .fold(0u128, |acc, w| acc.saturating_add(positive_part(w)));
    if total == 0 {
        debug!("no positive weight to draw from");
        return None;
    }

    let roll = rng.random_range(0..total);
    let mut remaining = roll;
    for (i, w) in weights.enumerate() {
        let w = positive_part(w);
        if remaining < w {
            trace!(?total, ?roll, index = i, "weighted draw");
            return Some(i);
        }
        remaining -= w;
    }

    None
}

/// Widen a weight for summing. Non-positive weights count as zero so
/// they never take probability away from the other entries.
fn positive_part<W: Weight>(w: W) -> u128 {
    w.max(W::zero()).to_u128().unwrap_or(0)
}

/// Pick one value from a sequence of `(value, weight)` pairs with
/// probability proportional to weight.
///
/// See [weighted_index] for the exact rules.
///
/// # Examples
///
/// ```
/// use loot_tables::select::select;
///
/// let pairs = [("sword", 1), ("shield", 0)];
/// let mut rng = rand::rng();
/// assert_eq!(Some(&"sword"), select(&pairs, &mut rng));
/// ```
pub fn select<'a, V, W: Weight>(pairs: &'a [(V, W)], rng: &mut dyn RngCore) -> Option<&'a V> {
    weighted_index(pairs.iter().map(|(_, w)| *w), rng).map(|i| &pairs[i].0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A random source that fails the test if anything is drawn from it.
    pub(crate) struct NoDraw;

    impl RngCore for NoDraw {
        fn next_u32(&mut self) -> u32 {
            panic!("unexpected draw")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("unexpected draw")
        }

        fn fill_bytes(&mut self, _dst: &mut [u8]) {
            panic!("unexpected draw")
        }
    }

    /// Tests the cases that never select anything.
    #[test]
    fn test_none_cases() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(None, weighted_index(Vec::<i32>::new(), &mut rng));
        assert_eq!(None, weighted_index([0], &mut rng));
        assert_eq!(None, weighted_index([-3], &mut rng));
        assert_eq!(None, weighted_index([0, 0, 0], &mut rng));
        assert_eq!(None, weighted_index([-1, -2], &mut rng));
    }

    /// Tests that a negative weight does not cancel out positive ones.
    #[test]
    fn test_negative_does_not_cancel() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            assert_eq!(Some(0), weighted_index([3, -5], &mut rng));
        }
    }

    fn frequencies<W: Weight, const N: usize>(weights: [W; N], seed: u64) -> [f64; N] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = [0u32; N];

        let n = 30_000;
        for _ in 0..n {
            match weighted_index(weights, &mut rng) {
                Some(i) => counts[i] += 1,
                None => panic!("nothing selected from {weights:?}"),
            }
        }

        counts.map(|c| c as f64 / n as f64)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.02,
            "frequency {actual} too far from {expected}"
        );
    }

    /// Tests that a single selectable entry is returned without
    /// consulting the random source.
    #[test]
    fn test_single_entry_no_draw() {
        assert_eq!(Some(0), weighted_index([4i64], &mut NoDraw));
        assert_eq!(None, weighted_index([0i64], &mut NoDraw));
        assert_eq!(Some(&'a'), select(&[('a', 1)], &mut NoDraw));
    }

    /// Tests that entries with non-positive weight are never picked and
    /// take no probability away from the positive ones.
    #[test]
    fn test_skips_non_positive() {
        let f = frequencies([0, 2, -1, 0, 3, 0], 11);

        assert_eq!([0.0, 0.0, 0.0, 0.0], [f[0], f[2], f[3], f[5]]);
        assert_close(f[1], 0.4);
        assert_close(f[4], 0.6);

        let f = frequencies([3, 0, 1, -1], 12);
        assert_close(f[0], 0.75);
        assert_close(f[2], 0.25);
        assert_eq!(0.0, f[3]);
    }

    /// Tests that selection frequency follows the weights.
    #[test]
    fn test_frequency() {
        let mut rng = StdRng::seed_from_u64(42);
        let pairs = [("common", 6), ("rare", 3), ("epic", 1)];
        let mut counts = [0u32; 3];

        let n = 30_000;
        for _ in 0..n {
            match select(&pairs, &mut rng) {
                Some(&"common") => counts[0] += 1,
                Some(&"rare") => counts[1] += 1,
                Some(&"epic") => counts[2] += 1,
                other => panic!("unexpected selection {other:?}"),
            }
        }

        let expected = [0.6, 0.3, 0.1];
        for (c, e) in counts.iter().zip(expected) {
            let f = *c as f64 / n as f64;
            assert!((f - e).abs() < 0.02, "frequency {f} too far from {e}");
        }
    }

    /// Tests that weights near the top of their type keep their
    /// proportions instead of overflowing the total.
    #[test]
    fn test_large_weights() {
        let f = frequencies([i32::MAX, i32::MAX], 3);
        assert_close(f[0], 0.5);
        assert_close(f[1], 0.5);

        let f = frequencies([100i8, 100, 100, 0], 4);
        for share in &f[..3] {
            assert_close(*share, 1.0 / 3.0);
        }
        assert_eq!(0.0, f[3]);

        let f = frequencies([i64::MAX, i64::MAX / 2 + 1], 5);
        assert_close(f[0], 2.0 / 3.0);
    }
}
