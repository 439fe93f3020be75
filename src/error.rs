//! Planner-level validation failures, formatted to the stable diagnostic grammar documented in
//! the crate's external interface notes. Every variant's `Display` impl is the literal string
//! handed to the caller's error callback — existing consumers may parse these, so the wording is
//! reproduced verbatim rather than "improved".
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Error: cpu_cnt({0}) <= 0")]
    CpuCnt(i64),

    #[error("Error: thread_cnt({0}) <= 0")]
    ThreadCnt(i64),

    #[error("Error: subset({0}) <= 0")]
    Subset(i64),

    #[error("Error: compute_total_comb() return false")]
    ComputeTotalCombFailed,

    #[error("Error: factorial({factorial}) < cpu_cnt({cpu_cnt})")]
    FactorialLtCpuCnt { factorial: String, cpu_cnt: i64 },

    #[error("Error: total_comb({total_comb}) < cpu_cnt({cpu_cnt})")]
    TotalCombLtCpuCnt { total_comb: String, cpu_cnt: i64 },

    #[error("Error: each_cpu_elem_cnt({0}) <= 0")]
    EachCpuElemCnt(String),
}

/// The Rust analogue of the original's caught C++ exception: a panic that unwound out of the
/// successor loop or the user's callback, captured at the worker boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkerFailure {
    #[error(
        "Exception thrown thrown in {loop_name}:{what}, start index:{start}, end index:{end}, counting index:{counting}"
    )]
    Known { loop_name: &'static str, what: String, start: String, end: String, counting: String },

    #[error(
        "Unknown exception thrown in {loop_name}:, start index:{start}, end index:{end}, counting index:{counting}"
    )]
    Unknown { loop_name: &'static str, start: String, end: String, counting: String },
}
