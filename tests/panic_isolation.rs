use std::sync::Mutex;

use permshard::{compute_all_perm, natural_order};

#[test]
fn worker_panics_surface_through_the_error_callback_without_poisoning_other_threads() {
    let _ = env_logger::try_init();

    let s: Vec<u32> = (0..6).collect();
    let failures: Mutex<Vec<String>> = Mutex::new(Vec::new());
    let successes: Mutex<usize> = Mutex::new(0);

    let cb = |_thread: usize, seq: &[u32]| {
        if seq == [2, 0, 1, 3, 4, 5] {
            panic!("simulated worker failure");
        }
        *successes.lock().unwrap() += 1;
        true
    };
    let err_cb = |_thread: usize, _seq: &[u32], msg: String| {
        failures.lock().unwrap().push(msg);
    };

    compute_all_perm::<u32, u64, _, _>(3, &s, &natural_order, &cb, &err_cb);

    let failures = failures.into_inner().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("Exception thrown thrown in perm_loop:simulated worker failure"));
    assert!(*successes.lock().unwrap() > 0);
}
