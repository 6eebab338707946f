/*!
 * Error Types
 * Centralized error handling with thiserror
 */

use crate::core::types::Pid;
use thiserror::Error;

/// Process operation result
///
/// # Must Use
/// Process operations can fail and must be handled to avoid losing table state
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process-table and lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Process {0} not found")]
    NotFound(Pid),

    #[error("Pid {0} outside the valid range 1..={1}")]
    OutOfRange(Pid, u32),

    #[error("Invalid process size: {0}")]
    InvalidSize(i64),

    #[error("Process limit reached: {0} live processes")]
    LimitReached(u32),

    #[error("Dump failed: {0}")]
    Dump(String),
}

/// Scheduler and dispatch-cycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Unknown scheduling policy: {0}")]
    UnknownPolicy(String),

    #[error("Policy selected pid {0} with no live process")]
    InvalidSelection(Pid),

    #[error("Ready queue yielded no runnable process")]
    NoCandidate,

    #[error("Cycle limit {0} reached with work remaining")]
    CycleLimitReached(u64),
}
