/*!
 * Process Control Block
 * The durable scheduling-relevant state record for one process
 */

use crate::core::types::{Pid, Priority, Uid};
use crate::process::types::{Instruction, MemoryUsage, ProcessState, ProcessType};
use std::io::{self, Write};

/// Process control block
///
/// Exclusively owned by its process-table slot; external observers only
/// ever see shared references.
#[derive(Debug, Clone)]
pub struct Pcb {
    /// Process ID, 1..=MAX_PROCESSES
    pub pid: Pid,
    /// Owning user, 1..=MAX_USERS
    pub uid: Uid,
    /// Total instruction count
    pub size: u32,
    /// Lower value = more urgent
    pub priority: Priority,
    /// Current lifecycle state
    pub state: ProcessState,
    /// Behavioral classification
    pub ptype: ProcessType,
    /// Memory-usage classification (informational only)
    pub mtype: MemoryUsage,
    /// Program counter, 0..=size, monotonically non-decreasing
    pub pc: u32,
    /// Instructions allowed per dispatch
    pub timeslice: u32,
    /// Synthetic instruction stream, generated once at creation
    pub code: Vec<Instruction>,
}

impl Pcb {
    /// Instructions left before completion
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.size.saturating_sub(self.pc)
    }

    /// Check whether this process still requires scheduler attention
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Write a human-readable snapshot of this PCB to `sink`
    pub fn dump<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "--- PCB: pid {} ---", self.pid)?;
        writeln!(sink, "uid:        {}", self.uid)?;
        writeln!(sink, "size:       {}", self.size)?;
        writeln!(sink, "priority:   {}", self.priority)?;
        writeln!(sink, "state:      {}", self.state)?;
        writeln!(sink, "type:       {}", self.ptype)?;
        writeln!(sink, "memory:     {}", self.mtype)?;
        writeln!(sink, "pc:         {}", self.pc)?;
        writeln!(sink, "time slice: {}", self.timeslice)?;
        Ok(())
    }
}

/// Named handle returned by process creation
///
/// Exists only at the creation/deletion boundary; the PCB in the table is
/// the unit the scheduler acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    pub pid: Pid,
    pub size: u32,
}
