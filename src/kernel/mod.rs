/*!
 * Kernel
 * The scheduler-state object: process table, queues, dispatch, execution
 */

mod dispatcher;
mod executor;
mod queues;
mod types;

pub use types::{CycleOutcome, ProcessSnapshot, RunOutcome, SchedulerStats};

use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::types::{Pid, Priority};
use crate::process::pcb::{Pcb, Process};
use crate::process::table::ProcessTable;
use crate::process::types::ProcessType;
use crate::sched::Selector;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;

/// One independent simulation instance.
///
/// All tables and queues live here and are mutated by exactly one logical
/// actor; external collaborators observe through shared references.
pub struct Kernel {
    table: ProcessTable,
    ready_queue: Vec<Pid>,
    block_queue: Vec<Pid>,
    current: Option<Pid>,
    selector: Selector,
    rng: StdRng,
    stats: SchedulerStats,
}

impl Kernel {
    /// Fresh simulation with an entropy-seeded random source
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Fresh simulation with a fixed seed, for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        info!("Kernel initialized: process table and queues empty");
        Self {
            table: ProcessTable::new(),
            ready_queue: Vec::new(),
            block_queue: Vec::new(),
            current: None,
            selector: Selector::new(),
            rng,
            stats: SchedulerStats::default(),
        }
    }

    /// Reset all tables and queues in place, keeping the random source
    pub fn reset(&mut self) {
        self.table.clear();
        self.ready_queue.clear();
        self.block_queue.clear();
        self.current = None;
        self.selector.reset();
        self.stats = SchedulerStats::default();
        info!("Kernel reset: process table and queues empty");
    }

    /// Create a process and return its handle.
    ///
    /// The PCB starts with `pc == 0` in state READY; `size` is validated
    /// before any table mutation.
    pub fn create_process(
        &mut self,
        name: &str,
        size: i64,
        priority: Priority,
        ptype: ProcessType,
    ) -> ProcessResult<Process> {
        self.table.create(&mut self.rng, name, size, priority, ptype)
    }

    /// Delete a process; not-found and out-of-range report an error and
    /// change nothing
    pub fn delete_process(&mut self, pid: Pid) -> ProcessResult<()> {
        self.table.remove(pid)?;
        if self.current == Some(pid) {
            self.current = None;
        }
        Ok(())
    }

    /// Read-only PCB access for observers
    pub fn pcb(&self, pid: Pid) -> Option<&Pcb> {
        self.table.pcb(pid).ok()
    }

    /// Pid of the most recently dispatched process, if any
    pub fn current(&self) -> Option<Pid> {
        self.current
    }

    /// Ready-queue view from the last refresh
    pub fn ready_queue(&self) -> &[Pid] {
        &self.ready_queue
    }

    /// Block-queue view from the last refresh
    pub fn block_queue(&self) -> &[Pid] {
        &self.block_queue
    }

    /// Counters accumulated since the last reset
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Write a human-readable PCB snapshot for `pid` to `sink`
    pub fn dump_pcb<W: Write>(&self, pid: Pid, sink: &mut W) -> ProcessResult<()> {
        let pcb = self.table.pcb(pid)?;
        pcb.dump(sink).map_err(|e| ProcessError::Dump(e.to_string()))
    }

    /// Write the process name, pid, size, and PCB dump to `sink`
    pub fn save_process<W: Write>(&self, process: &Process, sink: &mut W) -> ProcessResult<()> {
        writeln!(
            sink,
            "process: {} (pid {}, size {})",
            process.name, process.pid, process.size
        )
        .map_err(|e| ProcessError::Dump(e.to_string()))?;
        self.dump_pcb(process.pid, sink)
    }

    /// Snapshot of every live PCB, ascending by pid
    pub fn snapshot(&self) -> Vec<ProcessSnapshot> {
        self.table
            .iter()
            .map(|(_, pcb)| ProcessSnapshot {
                pid: pcb.pid,
                uid: pcb.uid,
                size: pcb.size,
                priority: pcb.priority,
                state: pcb.state,
                ptype: pcb.ptype,
                mtype: pcb.mtype,
                pc: pcb.pc,
                timeslice: pcb.timeslice,
            })
            .collect()
    }

    pub(crate) fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub(crate) fn table_mut(&mut self) -> &mut ProcessTable {
        &mut self.table
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::types::ProcessState;
    use pretty_assertions::assert_eq;

    #[test]
    fn delete_clears_current_marker() {
        let mut kernel = Kernel::with_seed(3);
        let handle = kernel
            .create_process("p", 50, 20, ProcessType::Regular)
            .unwrap();
        kernel.run_cycle(crate::sched::Policy::Fcfs).unwrap();
        assert_eq!(kernel.current(), Some(handle.pid));

        kernel.delete_process(handle.pid).unwrap();
        assert_eq!(kernel.current(), None);
    }

    #[test]
    fn save_process_prefixes_the_pcb_dump() {
        let mut kernel = Kernel::with_seed(4);
        let handle = kernel
            .create_process("Compiler", 8, 15, ProcessType::ComputeBound)
            .unwrap();
        let mut out = Vec::new();
        kernel.save_process(&handle, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("process: Compiler (pid 1, size 8)"));
        assert!(text.contains("--- PCB: pid 1 ---"));
    }

    #[test]
    fn reset_restarts_pid_allocation() {
        let mut kernel = Kernel::with_seed(5);
        kernel
            .create_process("a", 1, 20, ProcessType::Regular)
            .unwrap();
        kernel.reset();
        assert!(kernel.snapshot().is_empty());
        let handle = kernel
            .create_process("b", 1, 20, ProcessType::Regular)
            .unwrap();
        assert_eq!(handle.pid, 1);
        assert_eq!(
            kernel.pcb(handle.pid).map(|pcb| pcb.state),
            Some(ProcessState::Ready)
        );
    }
}
