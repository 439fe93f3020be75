//! Per-thread enumeration: fast-forward to a starting rank via unranking, then drive the
//! rank-domain successor primitive across `[start, end)`, materializing and handing each step's
//! sequence to the caller's callback.
use std::cell::RefCell;
use std::cmp::Ordering;

use crate::comb::unrank_comb;
use crate::perm::unrank_perm;
use crate::successor::{next_combination_indices, next_permutation_indices};
use crate::util::count::{Count, Narrow};
use crate::util::panic;

pub type Comparator<'a, T> = dyn Fn(&T, &T) -> Ordering + Sync + 'a;

/// `T`'s natural order, for callers who want the "absent comparator" case from the enumeration
/// contract. Only this function — not the worker or shard entry points — requires `T: Ord`, so a
/// type with no total order of its own (`f64`, via `NaN`) can still be enumerated by supplying
/// its own comparator instead of this one.
pub fn natural_order<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Stable argsort of `0..s.len()` under `cmp`. This is the only point at which the comparator is
/// consulted; everything downstream works on ranks.
fn build_order<T>(s: &[T], cmp: &Comparator<'_, T>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..s.len()).collect();
    order.sort_by(|&a, &b| cmp(&s[a], &s[b]));
    order
}

enum Counter<I> {
    I32(i32, i32),
    I64(i64, i64),
    Wide(I, I),
}

fn narrow_i64<I: Count>(value: &I) -> Option<i64> {
    match value.narrow() {
        Narrow::I32(v) => Some(i64::from(v)),
        Narrow::I64(v) => Some(v),
        Narrow::Wide => None,
    }
}

fn choose_counter<I: Count>(start: I, end: I) -> Counter<I> {
    match end.narrow() {
        Narrow::I32(e) => {
            let s = narrow_i64(&start).expect("start <= end, which fit i32") as i32;
            Counter::I32(s, e)
        }
        Narrow::I64(e) => {
            let s = narrow_i64(&start).expect("start <= end, which fit i64");
            Counter::I64(s, e)
        }
        Narrow::Wide => Counter::Wide(start, end),
    }
}

/// Drives one worker's permutation slice `[start, end)` over `s`, invoking `cb` for each step.
#[allow(clippy::too_many_arguments)]
pub fn run_perm_worker<T, I, Cb, ErrCb>(
    thread_index: usize,
    s: &[T],
    cmp: &Comparator<'_, T>,
    start: I,
    end: I,
    cb: &Cb,
    err_cb: &ErrCb,
) where
    T: Clone + Sync,
    I: Count,
    Cb: Fn(usize, &[T]) -> bool + Sync,
    ErrCb: Fn(usize, &[T], String) + Sync,
{
    let order = build_order(s, cmp);
    let n = order.len();

    let mut ranks = if start > I::zero() {
        match unrank_perm(n, start.clone()) {
            Some(ranks) => ranks,
            None => return,
        }
    } else {
        (0..n).collect()
    };

    let last_seq: RefCell<Vec<T>> = RefCell::new(Vec::new());
    let counter = choose_counter(start.clone(), end.clone());
    let offset = RefCell::new(0usize);

    let outcome = panic::capture(|| {
        let mut step = |ranks: &mut Vec<usize>, i: usize| -> bool {
            *offset.borrow_mut() = i;
            let emitted: Vec<T> = ranks.iter().map(|&r| s[order[r]].clone()).collect();
            *last_seq.borrow_mut() = emitted.clone();
            if !cb(thread_index, &emitted) {
                return false;
            }
            next_permutation_indices(ranks);
            true
        };

        match counter {
            Counter::I32(mut j, e) => {
                let mut i = 0usize;
                while j < e {
                    if !step(&mut ranks, i) {
                        return;
                    }
                    i += 1;
                    j += 1;
                }
            }
            Counter::I64(mut j, e) => {
                let mut i = 0usize;
                while j < e {
                    if !step(&mut ranks, i) {
                        return;
                    }
                    i += 1;
                    j += 1;
                }
            }
            Counter::Wide(mut j, e) => {
                let mut i = 0usize;
                while j < e {
                    if !step(&mut ranks, i) {
                        return;
                    }
                    i += 1;
                    j = j + I::one();
                }
            }
        }
    });

    if let Err(payload) = outcome {
        let counting = start.clone() + I::from_usize(*offset.borrow());
        let message = panic::describe_failure("perm_loop", &*payload, &start, &end, &counting);
        log::warn!("thread {thread_index}: {message}");
        err_cb(thread_index, &last_seq.borrow(), message);
    }
}

/// Drives one worker's combination slice `[start, end)` over `s`, invoking `cb` for each step.
#[allow(clippy::too_many_arguments)]
pub fn run_comb_worker<T, I, Cb, ErrCb>(
    thread_index: usize,
    s: &[T],
    k: usize,
    cmp: &Comparator<'_, T>,
    start: I,
    end: I,
    cb: &Cb,
    err_cb: &ErrCb,
) where
    T: Clone + Sync,
    I: Count,
    Cb: Fn(usize, usize, &[T]) -> bool + Sync,
    ErrCb: Fn(usize, usize, &[T], String) + Sync,
{
    let order = build_order(s, cmp);
    let n = order.len();

    let mut ranks = if start > I::zero() {
        match unrank_comb(n, k, start.clone()) {
            Some(ranks) => ranks,
            None => return,
        }
    } else {
        (0..k).collect()
    };

    let last_seq: RefCell<Vec<T>> = RefCell::new(Vec::new());
    let counter = choose_counter(start.clone(), end.clone());
    let offset = RefCell::new(0usize);

    let outcome = panic::capture(|| {
        let mut step = |ranks: &mut Vec<usize>, i: usize| -> bool {
            *offset.borrow_mut() = i;
            let emitted: Vec<T> = ranks.iter().map(|&r| s[order[r]].clone()).collect();
            *last_seq.borrow_mut() = emitted.clone();
            if !cb(thread_index, n, &emitted) {
                return false;
            }
            next_combination_indices(n, ranks);
            true
        };

        match counter {
            Counter::I32(mut j, e) => {
                let mut i = 0usize;
                while j < e {
                    if !step(&mut ranks, i) {
                        return;
                    }
                    i += 1;
                    j += 1;
                }
            }
            Counter::I64(mut j, e) => {
                let mut i = 0usize;
                while j < e {
                    if !step(&mut ranks, i) {
                        return;
                    }
                    i += 1;
                    j += 1;
                }
            }
            Counter::Wide(mut j, e) => {
                let mut i = 0usize;
                while j < e {
                    if !step(&mut ranks, i) {
                        return;
                    }
                    i += 1;
                    j = j + I::one();
                }
            }
        }
    });

    if let Err(payload) = outcome {
        let counting = start.clone() + I::from_usize(*offset.borrow());
        let message = panic::describe_failure("comb_loop", &*payload, &start, &end, &counting);
        log::warn!("thread {thread_index}: {message}");
        err_cb(thread_index, n, &last_seq.borrow(), message);
    }
}
