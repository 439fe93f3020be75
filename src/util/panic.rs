//! Worker-local panic capture: turns an unwinding panic into the diagnostic strings produced by
//! [`crate::error::WorkerFailure`], the Rust analogue of the original's per-thread `try`/`catch`.
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::WorkerFailure;
use crate::util::count::Count;

/// Runs `body` inside a `catch_unwind` boundary, asserting it is unwind-safe. The caller owns
/// whatever interior-mutable state `body` needs to recover its progress after a panic (see
/// `worker::run_perm_worker`'s `last_seq`/`offset` cells).
pub fn capture<F: FnOnce()>(body: F) -> std::thread::Result<()> {
    catch_unwind(AssertUnwindSafe(body))
}

fn payload_description(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Some((*s).to_string())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}

/// Formats a caught panic payload into the stable diagnostic grammar, given the loop name and
/// the `[start, end)` range and current counter at the moment of failure.
pub fn describe_failure<I: Count>(
    loop_name: &'static str,
    payload: &(dyn Any + Send),
    start: &I,
    end: &I,
    counting: &I,
) -> String {
    match payload_description(payload) {
        Some(what) => WorkerFailure::Known {
            loop_name,
            what,
            start: start.to_string(),
            end: end.to_string(),
            counting: counting.to_string(),
        }
        .to_string(),
        None => WorkerFailure::Unknown {
            loop_name,
            start: start.to_string(),
            end: end.to_string(),
            counting: counting.to_string(),
        }
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_returns_ok_when_body_does_not_panic() {
        assert!(capture(|| {}).is_ok());
    }

    #[test]
    fn capture_returns_err_payload_when_body_panics() {
        let outcome = capture(|| panic!("boom"));
        let payload = outcome.unwrap_err();
        let message = describe_failure("perm_loop", &*payload, &0u64, &6u64, &3u64);
        assert_eq!(
            message,
            "Exception thrown thrown in perm_loop:boom, start index:0, end index:6, counting index:3"
        );
    }

    #[test]
    fn describe_failure_reports_unknown_for_non_string_payloads() {
        let outcome = capture(|| std::panic::panic_any(42));
        let payload = outcome.unwrap_err();
        let message = describe_failure("comb_loop", &*payload, &0u64, &6u64, &3u64);
        assert_eq!(
            message,
            "Unknown exception thrown in comb_loop:, start index:0, end index:6, counting index:3"
        );
    }
}
