use std::sync::Mutex;

use permshard::{compute_all_comb, compute_all_comb_shard, natural_order};

#[test]
fn sharded_combination_run_covers_the_same_space_as_a_single_process() {
    let s: Vec<char> = "abcdef".chars().collect();

    let single: Mutex<Vec<Vec<char>>> = Mutex::new(Vec::new());
    let cb = |_thread: usize, _full_size: usize, seq: &[char]| {
        single.lock().unwrap().push(seq.to_vec());
        true
    };
    let err_cb = |_thread: usize, _full_size: usize, _seq: &[char], msg: String| {
        panic!("unexpected: {msg}")
    };
    assert!(compute_all_comb::<char, u64, _, _>(3, 3, &s, &natural_order, &cb, &err_cb));
    let mut single = single.into_inner().unwrap();
    single.sort();

    let sharded: Mutex<Vec<Vec<char>>> = Mutex::new(Vec::new());
    let cb2 = |_thread: usize, _full_size: usize, seq: &[char]| {
        sharded.lock().unwrap().push(seq.to_vec());
        true
    };
    for cpu_index in 0..2 {
        compute_all_comb_shard::<char, u64, _, _>(cpu_index, 2, 2, 3, &s, &natural_order, &cb2, &err_cb);
    }
    let mut sharded = sharded.into_inner().unwrap();
    sharded.sort();

    assert_eq!(single, sharded);
    assert_eq!(single.len(), 20);
}
