//! Exact factorial and combination counting, generic over the caller's [`Count`] type.
use crate::util::count::Count;

/// `n!`, with `factorial(0) == factorial(1) == 1`.
pub fn factorial<I: Count>(n: usize) -> I {
    let mut acc = I::one();
    for i in 2..=n {
        acc = acc * I::from_usize(i);
    }
    acc
}

/// `(lo+1) · (lo+2) · … · hi`, or `1` when `lo == hi`. Lets callers compute `n! / k!` without
/// ever materializing `n!` on its own.
pub fn falling_range<I: Count>(lo: usize, hi: usize) -> I {
    let mut acc = I::one();
    for i in (lo + 1)..=hi {
        acc = acc * I::from_usize(i);
    }
    acc
}

/// `C(n, k)`, or `None` when `k > n`.
pub fn count_comb<I: Count>(n: usize, k: usize) -> Option<I> {
    if k > n {
        return None;
    }
    if k == 0 || k == n {
        return Some(I::one());
    }

    let a = n - k;
    let (small, large) = if k < a { (k, a) } else { (a, k) };
    Some(falling_range::<I>(large, n) / factorial::<I>(small))
}
