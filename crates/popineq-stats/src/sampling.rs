//! Stratified bucket sampling for building evaluation cohorts.
//!
//! Implements the sampling strategy of Aslam et al. (2007), "A Practical
//! Sampling Strategy for Efficient Retrieval Evaluation": the ranked list is
//! cut into equal buckets and draws are spread across buckets, so every rank
//! region is represented without sampling the whole list.

use rand::{Rng, seq::IndexedRandom as _};

/// Samples up to `count` items from `ranked_items`.
///
/// The list is split into contiguous buckets of `count` items (the last one
/// may be shorter). `count` bucket indices are drawn uniformly with
/// replacement, and each drawn bucket contributes that many distinct items,
/// capped at its size. The result is grouped by bucket in rank order, but
/// items within a bucket come out in random order.
///
/// When draws pile up on a short bucket the cap applies and fewer than
/// `count` items are returned.
///
/// # Examples
///
/// ```
/// use popineq_stats::sampling::aslam_sample;
///
/// let ranked: Vec<u32> = (1..=100).collect();
/// let sample = aslam_sample(&ranked, 10, &mut rand::rng());
/// assert_eq!(sample.len(), 10);
/// ```
pub fn aslam_sample<T, R>(ranked_items: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if count == 0 || ranked_items.is_empty() {
        return vec![];
    }
    let buckets = ranked_items.chunks(count).collect::<Vec<_>>();

    let mut draws = vec![0_usize; buckets.len()];
    for _ in 0..count {
        draws[rng.random_range(0..buckets.len())] += 1;
    }
    log::debug!("aslam sample: {} buckets, draws per bucket {draws:?}", buckets.len());

    buckets
        .iter()
        .zip(&draws)
        .filter(|(_, draws)| **draws > 0)
        .flat_map(|(bucket, &draws)| bucket.choose_multiple(rng, draws.min(bucket.len())))
        .cloned()
        .collect()
}
