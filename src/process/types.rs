/*!
 * Process Types
 * States, behavioral classifications, and synthetic instructions
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
///
/// Suspended variants are part of the modeled state machine but no
/// transition in the simulator produces them; they still count as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process structure is being created (not yet schedulable)
    New,
    /// Process is eligible to run
    Ready,
    /// Process is currently executing
    Running,
    /// Process is waiting on a simulated long system call
    Blocked,
    /// Suspended while ready
    SuspendedReady,
    /// Suspended while blocked
    SuspendedBlocked,
    /// Process has terminated (terminal state)
    Dead,
}

impl ProcessState {
    /// Check whether the process still requires scheduler attention
    ///
    /// # Performance
    /// Hot path - checked for every table slot each cycle
    #[inline(always)]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            ProcessState::Ready
                | ProcessState::Running
                | ProcessState::Blocked
                | ProcessState::SuspendedReady
                | ProcessState::SuspendedBlocked
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::New => "NEW",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Blocked => "BLOCKED",
            ProcessState::SuspendedReady => "SUSP_READY",
            ProcessState::SuspendedBlocked => "SUSP_BLOCKED",
            ProcessState::Dead => "DEAD",
        };
        f.write_str(name)
    }
}

/// Behavioral classification controlling the long-call probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    /// Ordinary mix of work: 2% long calls
    Regular,
    /// Compute-bound: 0.1% long calls
    ComputeBound,
    /// IO-bound: 20% long calls
    IoBound,
}

impl ProcessType {
    /// Probability that a generated instruction is a long system call
    #[inline]
    #[must_use]
    pub const fn long_call_threshold(self) -> f64 {
        match self {
            ProcessType::Regular => 0.02,
            ProcessType::ComputeBound => 0.001,
            ProcessType::IoBound => 0.2,
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessType::Regular => "REGULAR",
            ProcessType::ComputeBound => "COMPUTE",
            ProcessType::IoBound => "IO",
        };
        f.write_str(name)
    }
}

/// Memory-usage classification carried on the PCB (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryUsage {
    Structured,
    Unstructured,
    Spaghetti,
}

impl fmt::Display for MemoryUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemoryUsage::Structured => "STRUCTURED",
            MemoryUsage::Unstructured => "UNSTRUCTURED",
            MemoryUsage::Spaghetti => "SPAGHETTI",
        };
        f.write_str(name)
    }
}

/// Simulated system-call classification of one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyscallKind {
    /// Long call: blocks the process when executed
    Long,
    /// Short call: completes within the instruction step
    Short,
}

/// One synthetic instruction; generated at creation, never mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Position in the process's stream
    pub num: u32,
    /// System-call classification
    pub syscall: SyscallKind,
    /// Memory address reference (descriptive only)
    pub addr_ref: u32,
}
