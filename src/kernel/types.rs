/*!
 * Kernel Types
 * Cycle outcomes, counters, and observer snapshots
 */

use crate::core::types::{Pid, Priority, Uid};
use crate::process::types::{MemoryUsage, ProcessState, ProcessType};
use serde::{Deserialize, Serialize};

/// How a dispatched process gave the CPU back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Hit a long system call and moved to BLOCKED
    Blocked,
    /// Exhausted its time slice and moved back to READY
    Preempted,
    /// Reached the end of its code and moved to DEAD
    Completed,
}

/// Result of one full dispatch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleOutcome {
    /// No process in any active state remains: the simulation is over
    Idle,
    /// Active processes exist but none is ready (all blocked)
    AllBlocked,
    /// A process was dispatched and ran
    Ran { pid: Pid, run: RunOutcome },
}

/// Scheduler counters accumulated across cycles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub cycles: u64,
    pub dispatches: u64,
    pub preemptions: u64,
    pub blocks: u64,
    pub completions: u64,
    pub unblocks: u64,
}

/// Read-only PCB snapshot for reporting collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub uid: Uid,
    pub size: u32,
    pub priority: Priority,
    pub state: ProcessState,
    pub ptype: ProcessType,
    pub mtype: MemoryUsage,
    pub pc: u32,
    pub timeslice: u32,
}
