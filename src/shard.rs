//! Partitions the total enumeration space across CPUs and threads, then drives the per-thread
//! workers. Thread 0 always runs inline on the calling stack; threads `1..thread_cnt` run on
//! scoped OS threads, mirroring the teacher's `util::thread::spawn` pattern rather than the
//! source's `shared_ptr<thread>` bookkeeping.
use std::thread;

use crate::error::ValidationError;
use crate::util::count::Count;
use crate::worker::{run_comb_worker, run_perm_worker, Comparator};
#[cfg(test)]
use crate::worker::natural_order;
use crate::{count, perm};

/// Computes `(cpu_offset, cpu_share)` for `cpu_index` out of `cpu_cnt`, absorbing the remainder
/// into the last CPU's share.
fn cpu_share<I: Count>(total: I, cpu_index: usize, cpu_cnt: usize) -> (I, I) {
    let per_cpu = total.clone() / I::from_usize(cpu_cnt);
    let cpu_rem = total % I::from_usize(cpu_cnt);
    let cpu_offset = per_cpu.clone() * I::from_usize(cpu_index);
    let share = if cpu_index == cpu_cnt - 1 { per_cpu + cpu_rem } else { per_cpu };
    (cpu_offset, share)
}

/// Splits one CPU's `[cpu_offset, cpu_offset + cpu_share)` share into `thread_cnt` contiguous,
/// gap-free sub-ranges, with the last thread absorbing the remainder.
fn thread_ranges<I: Count>(cpu_offset: I, cpu_share: I, thread_cnt: usize) -> Vec<(I, I)> {
    let per_thread = cpu_share.clone() / I::from_usize(thread_cnt);
    let thread_rem = cpu_share % I::from_usize(thread_cnt);

    (0..thread_cnt)
        .map(|i| {
            let start = cpu_offset.clone() + per_thread.clone() * I::from_usize(i);
            let end = if i == thread_cnt - 1 {
                start.clone() + per_thread.clone() + thread_rem.clone()
            } else {
                start.clone() + per_thread.clone()
            };
            (start, end)
        })
        .collect()
}

/// Validates the shard request and, on success, returns the per-thread `[start, end)` ranges.
/// `total_too_small` builds the field-specific "<total> < cpu_cnt(<n>)" variant (the field name
/// differs between the permutation and combination entry points).
fn plan<I: Count>(
    cpu_index: usize,
    cpu_cnt: usize,
    mut thread_cnt: usize,
    total: I,
    total_too_small: impl FnOnce(String, i64) -> ValidationError,
) -> Result<Vec<(I, I)>, ValidationError> {
    if cpu_cnt == 0 {
        return Err(ValidationError::CpuCnt(0));
    }
    if thread_cnt == 0 {
        return Err(ValidationError::ThreadCnt(0));
    }
    if total < I::from_usize(cpu_cnt) {
        return Err(total_too_small(total.to_string(), cpu_cnt as i64));
    }

    let (cpu_offset, share) = cpu_share(total, cpu_index, cpu_cnt);
    if share <= I::zero() {
        return Err(ValidationError::EachCpuElemCnt(share.to_string()));
    }

    if share < I::from_usize(thread_cnt) {
        log::debug!(
            "cpu {cpu_index}/{cpu_cnt} share({share}) < thread_cnt({thread_cnt}); downgrading to 1 thread"
        );
        thread_cnt = 1;
    }

    log::debug!(
        "cpu {cpu_index}/{cpu_cnt}: offset={cpu_offset}, share={share}, thread_cnt={thread_cnt}"
    );
    Ok(thread_ranges(cpu_offset, share, thread_cnt))
}

/// Sharded, multi-process entry point for permutations. Sets `cpu_cnt = 1`, `cpu_index = 0` for
/// the single-process case via [`crate::compute_all_perm`].
#[allow(clippy::too_many_arguments)]
pub fn compute_all_perm_shard<T, I, Cb, ErrCb>(
    cpu_index: usize,
    cpu_cnt: usize,
    thread_cnt: usize,
    s: &[T],
    cmp: &Comparator<'_, T>,
    cb: &Cb,
    err_cb: &ErrCb,
) -> bool
where
    T: Clone + Sync,
    I: Count + Send,
    Cb: Fn(usize, &[T]) -> bool + Sync,
    ErrCb: Fn(usize, &[T], String) + Sync,
{
    let total: I = count::factorial(s.len());
    let ranges = match plan(cpu_index, cpu_cnt, thread_cnt, total, |factorial, cpu_cnt| {
        ValidationError::FactorialLtCpuCnt { factorial, cpu_cnt }
    }) {
        Ok(ranges) => ranges,
        Err(error) => {
            log::warn!("{error}");
            err_cb(0, s, error.to_string());
            return false;
        }
    };

    run_sharded(ranges, |thread_index, start, end| {
        run_perm_worker(thread_index, s, cmp, start, end, cb, err_cb);
    });
    true
}

/// Single-process entry point for permutations: every thread runs against the whole space.
pub fn compute_all_perm<T, I, Cb, ErrCb>(
    thread_cnt: usize,
    s: &[T],
    cmp: &Comparator<'_, T>,
    cb: &Cb,
    err_cb: &ErrCb,
) -> bool
where
    T: Clone + Sync,
    I: Count + Send,
    Cb: Fn(usize, &[T]) -> bool + Sync,
    ErrCb: Fn(usize, &[T], String) + Sync,
{
    compute_all_perm_shard::<T, I, Cb, ErrCb>(0, 1, thread_cnt, s, cmp, cb, err_cb)
}

/// Sharded, multi-process entry point for combinations.
#[allow(clippy::too_many_arguments)]
pub fn compute_all_comb_shard<T, I, Cb, ErrCb>(
    cpu_index: usize,
    cpu_cnt: usize,
    thread_cnt: usize,
    k: usize,
    s: &[T],
    cmp: &Comparator<'_, T>,
    cb: &Cb,
    err_cb: &ErrCb,
) -> bool
where
    T: Clone + Sync,
    I: Count + Send,
    Cb: Fn(usize, usize, &[T]) -> bool + Sync,
    ErrCb: Fn(usize, usize, &[T], String) + Sync,
{
    if cpu_cnt == 0 {
        let error = ValidationError::CpuCnt(0);
        log::warn!("{error}");
        err_cb(0, s.len(), s, error.to_string());
        return false;
    }
    if thread_cnt == 0 {
        let error = ValidationError::ThreadCnt(0);
        log::warn!("{error}");
        err_cb(0, s.len(), s, error.to_string());
        return false;
    }
    if k == 0 {
        let error = ValidationError::Subset(0);
        log::warn!("{error}");
        err_cb(0, s.len(), s, error.to_string());
        return false;
    }

    let Some(total): Option<I> = count::count_comb(s.len(), k) else {
        let error = ValidationError::ComputeTotalCombFailed;
        log::warn!("{error}");
        err_cb(0, s.len(), s, error.to_string());
        return false;
    };

    let ranges = match plan(cpu_index, cpu_cnt, thread_cnt, total, |total_comb, cpu_cnt| {
        ValidationError::TotalCombLtCpuCnt { total_comb, cpu_cnt }
    }) {
        Ok(ranges) => ranges,
        Err(error) => {
            log::warn!("{error}");
            err_cb(0, s.len(), s, error.to_string());
            return false;
        }
    };

    run_sharded(ranges, |thread_index, start, end| {
        run_comb_worker(thread_index, s, k, cmp, start, end, cb, err_cb);
    });
    true
}

/// Single-process entry point for combinations: every thread runs against the whole space.
#[allow(clippy::too_many_arguments)]
pub fn compute_all_comb<T, I, Cb, ErrCb>(
    thread_cnt: usize,
    k: usize,
    s: &[T],
    cmp: &Comparator<'_, T>,
    cb: &Cb,
    err_cb: &ErrCb,
) -> bool
where
    T: Clone + Sync,
    I: Count + Send,
    Cb: Fn(usize, usize, &[T]) -> bool + Sync,
    ErrCb: Fn(usize, usize, &[T], String) + Sync,
{
    compute_all_comb_shard::<T, I, Cb, ErrCb>(0, 1, thread_cnt, k, s, cmp, cb, err_cb)
}

/// Runs thread index 0 inline on the calling stack and spawns the rest as scoped threads,
/// joining all of them before returning.
fn run_sharded<I, F>(ranges: Vec<(I, I)>, work: F)
where
    I: Send,
    F: Fn(usize, I, I) + Sync,
{
    let mut ranges = ranges.into_iter().enumerate();
    let Some((_, (inline_start, inline_end))) = ranges.next() else {
        return;
    };

    let work = &work;
    thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .map(|(thread_index, (start, end))| {
                (thread_index, scope.spawn(move || work(thread_index, start, end)))
            })
            .collect();

        work(0, inline_start, inline_end);

        for (thread_index, handle) in handles {
            if handle.join().is_err() {
                log::warn!("thread {thread_index} panicked outside its own catch_unwind boundary");
            }
        }
    });
}

/// Returns the single index-th permutation of `s` without any threading, bypassing the
/// comparator entirely (the original's raw-position contract has no predicate parameter).
pub fn find_perm_by_idx<T: Clone, I: Count>(index: I, s: &[T]) -> Option<Vec<T>> {
    let ranks = perm::unrank_perm(s.len(), index)?;
    Some(ranks.into_iter().map(|r| s[r].clone()).collect())
}

/// Returns the single index-th k-subset of `s` without any threading.
pub fn find_comb_by_idx<T: Clone, I: Count>(k: usize, index: I, s: &[T]) -> Option<Vec<T>> {
    let ranks = crate::comb::unrank_comb(s.len(), k, index)?;
    Some(ranks.into_iter().map(|r| s[r].clone()).collect())
}
