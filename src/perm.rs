//! Unranking of permutations via the factorial number system.
use crate::count::factorial;
use crate::util::count::Count;

/// Maps a 0-based `index` in `[0, n!)` to the index-th permutation of `0..n` in lexicographic
/// order, returned as a rank array. `None` for `n == 0` or an out-of-range `index`.
pub fn unrank_perm<I: Count>(n: usize, index: I) -> Option<Vec<usize>> {
    if n == 0 {
        return None;
    }

    let mut leftovers: Vec<usize> = (0..n).collect();
    let mut remaining = index + I::one();
    let mut result = Vec::with_capacity(n);
    let mut processed = false;

    let mut s = n;
    while s > 0 {
        let f: I = factorial(s - 1);
        let mut prev_mult = I::zero();
        let mut picked = None;

        for i in 1..=s {
            let pos = f.clone() * I::from_usize(i);
            if remaining <= pos {
                if prev_mult <= remaining {
                    processed = true;
                    remaining = remaining - prev_mult;
                }
                picked = Some(i);
                break;
            }
            prev_mult = pos;
        }

        let i = picked?;
        result.push(leftovers.remove(i - 1));
        s -= 1;
    }

    processed.then_some(result)
}
