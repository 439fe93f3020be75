//! # Parallel and sharded unranking of permutations and combinations.
//!
//! Enumerates every permutation (or every k-combination) of a caller-supplied sequence without
//! ever holding more than one element in memory at a time, spread across worker threads and,
//! optionally, across a fixed number of cooperating processes.
//!
//! The algorithmic core is two unranking schemes — the factorial number system for permutations
//! ([`perm::unrank_perm`]) and the combinatorial number system for combinations
//! ([`comb::unrank_comb`]) — that let each worker jump straight to its starting element instead
//! of replaying every predecessor. [`shard`] partitions the total count across CPUs and threads,
//! and [`worker`] drives each partition's successor loop.

pub mod comb;
pub mod count;
pub mod error;
pub mod perm;
pub mod shard;
pub mod successor;
pub mod util {
    pub mod count;
    pub mod panic;
}
pub mod worker;

pub use error::{ValidationError, WorkerFailure};
pub use shard::{
    compute_all_comb, compute_all_comb_shard, compute_all_perm, compute_all_perm_shard,
    find_comb_by_idx, find_perm_by_idx,
};
pub use worker::{natural_order, Comparator};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// End-to-end smoke test exercising the public surface the way a caller would: natural
    /// ordering, default thread count, full-space single-process run.
    #[test]
    fn public_api_enumerates_small_permutation_space() {
        let s: Vec<&'static str> = vec!["a", "b", "c"];
        let seen: Mutex<Vec<Vec<&'static str>>> = Mutex::new(Vec::new());
        let cb = |_thread: usize, seq: &[&'static str]| {
            seen.lock().unwrap().push(seq.to_vec());
            true
        };
        let err_cb =
            |_thread: usize, _seq: &[&'static str], msg: String| panic!("unexpected: {msg}");

        assert!(compute_all_perm::<&'static str, u64, _, _>(2, &s, &natural_order, &cb, &err_cb));
        assert_eq!(seen.lock().unwrap().len(), 6);
    }

    #[test]
    fn public_api_find_by_idx_round_trips_against_enumeration() {
        let s = vec![1, 2, 3, 4];
        let all: Mutex<Vec<Vec<i32>>> = Mutex::new(Vec::new());
        let cb = |_t: usize, seq: &[i32]| {
            all.lock().unwrap().push(seq.to_vec());
            true
        };
        let err_cb = |_t: usize, _seq: &[i32], msg: String| panic!("unexpected: {msg}");
        compute_all_perm::<i32, u64, _, _>(1, &s, &natural_order, &cb, &err_cb);
        let all = all.into_inner().unwrap();

        for (i, want) in all.iter().enumerate() {
            assert_eq!(find_perm_by_idx::<i32, u64>(i as u64, &s).as_ref(), Some(want));
        }
    }
}
