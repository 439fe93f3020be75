//! Unranking of combinations via the combinatorial number system.
use crate::count::count_comb;
use crate::util::count::Count;

/// Maps a 0-based `index` in `[0, C(n,k))` to the index-th ascending k-subset of `0..n` in
/// lexicographic order, returned as a rank array. `None` for `k > n`, `n == 0`, `k == 0`, or an
/// out-of-range `index`.
pub fn unrank_comb<I: Count>(n: usize, k: usize, mut index: I) -> Option<Vec<usize>> {
    if k > n || n == 0 || k == 0 {
        return None;
    }
    if count_comb::<I>(n, k).is_some_and(|total| index >= total) {
        return None;
    }

    let mut results = vec![0usize; k];
    let mut remaining_set = n - 1;
    let mut remaining_comb = k - 1;

    for x in 0..k {
        if x == k - 1 {
            while index > I::zero() {
                index = index - I::one();
                remaining_set -= 1;
            }
            results[x] = n - remaining_set - 1;
        } else {
            let x_prev = if x > 0 { results[x - 1] + 1 } else { 0 };
            let window = remaining_set - remaining_comb;

            let mut prev = I::zero();
            let mut total = I::zero();
            let mut found_at = None;

            for y in 0..window {
                total = count_comb::<I>(remaining_set, remaining_comb)? + prev.clone();
                if total > index {
                    index = index - prev;
                    found_at = Some(y);
                    break;
                }
                prev = total.clone();
                remaining_set -= 1;
            }

            results[x] = match found_at {
                Some(y) => y + x_prev,
                None => {
                    // The scan exhausted every candidate in the window without finding one:
                    // the loop variable has advanced past the last rejected y, landing on
                    // `window` itself (see original_source/include/concurrent_comb.h).
                    index = index - total;
                    window + x_prev
                }
            };
        }

        remaining_set = remaining_set.saturating_sub(1);
        remaining_comb = remaining_comb.saturating_sub(1);
    }

    Some(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_rank_of_a_small_case() {
        let expected =
            vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]];
        for (i, want) in expected.into_iter().enumerate() {
            assert_eq!(unrank_comb::<u64>(4, 2, i as u64), Some(want));
        }
    }

    #[test]
    fn five_choose_three_matches_known_order() {
        let expected = vec![
            vec![0, 1, 2],
            vec![0, 1, 3],
            vec![0, 1, 4],
            vec![0, 2, 3],
            vec![0, 2, 4],
            vec![0, 3, 4],
            vec![1, 2, 3],
            vec![1, 2, 4],
            vec![1, 3, 4],
            vec![2, 3, 4],
        ];
        for (i, want) in expected.into_iter().enumerate() {
            assert_eq!(unrank_comb::<u64>(5, 3, i as u64), Some(want));
        }
    }

    #[test]
    fn rejects_impossible_subsets() {
        assert_eq!(unrank_comb::<u64>(3, 4, 0), None);
        assert_eq!(unrank_comb::<u64>(0, 0, 0), None);
        assert_eq!(unrank_comb::<u64>(5, 0, 0), None);
    }

    #[test]
    fn out_of_range_index_is_none() {
        assert_eq!(unrank_comb::<u64>(4, 2, 6), None);
    }

    #[test]
    fn agrees_with_successor_from_rank_zero() {
        use crate::successor::next_combination_indices;

        let (n, k) = (6, 3);
        let mut ranks = unrank_comb::<u64>(n, k, 0).unwrap();
        let total = count_comb::<u64>(n, k).unwrap();
        for i in 1..total {
            assert!(next_combination_indices(n, &mut ranks));
            assert_eq!(unrank_comb::<u64>(n, k, i), Some(ranks.clone()));
        }
    }
}
