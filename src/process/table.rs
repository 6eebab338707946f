/*!
 * Process Table
 * Central repository of PCBs, keyed by pid
 */

use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::limits::{DEFAULT_TIMESLICE, MAX_PROCESSES, MAX_USERS};
use crate::core::types::{Pid, Priority};
use crate::process::codegen;
use crate::process::pcb::{Pcb, Process};
use crate::process::types::{MemoryUsage, ProcessState, ProcessType};
use log::{info, warn};
use rand::Rng;
use std::collections::BTreeMap;

/// Fixed-capacity mapping from pid to PCB.
///
/// Pids are allocated from a monotonically increasing counter and are not
/// reused mid-run; the map keyed by pid keeps deletion safe regardless.
/// Ordered iteration gives the ascending scan order queue rebuilds rely on.
#[derive(Debug)]
pub struct ProcessTable {
    slots: BTreeMap<Pid, Pcb>,
    next_pid: Pid,
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            next_pid: 1,
        }
    }

    /// Create a process: allocate a pid, draw its user and memory
    /// classification, generate its code, and insert a READY PCB.
    ///
    /// Fails without touching the table if `size` is negative or the
    /// process limit is reached.
    pub fn create<R: Rng>(
        &mut self,
        rng: &mut R,
        name: &str,
        size: i64,
        priority: Priority,
        ptype: ProcessType,
    ) -> ProcessResult<Process> {
        if size < 0 || size > i64::from(u32::MAX) {
            warn!("Rejecting process '{}': invalid size {}", name, size);
            return Err(ProcessError::InvalidSize(size));
        }
        if self.next_pid > MAX_PROCESSES {
            warn!("Rejecting process '{}': table exhausted", name);
            return Err(ProcessError::LimitReached(self.slots.len() as u32));
        }

        let pid = self.next_pid;
        self.next_pid += 1;

        let size = size as u32;
        let uid = rng.gen_range(1..=MAX_USERS);
        let mtype = match rng.gen_range(0..3) {
            0 => MemoryUsage::Structured,
            1 => MemoryUsage::Unstructured,
            _ => MemoryUsage::Spaghetti,
        };
        let code = codegen::generate(rng, size, ptype);

        let mut pcb = Pcb {
            pid,
            uid,
            size,
            priority,
            state: ProcessState::New,
            ptype,
            mtype,
            pc: 0,
            timeslice: DEFAULT_TIMESLICE,
            code,
        };
        // A newly created process is immediately eligible to run.
        pcb.state = ProcessState::Ready;
        self.slots.insert(pid, pcb);

        info!(
            "Process '{}' created (pid: {}, uid: {}, size: {}, priority: {}, type: {})",
            name, pid, uid, size, priority, ptype
        );

        Ok(Process {
            name: name.to_string(),
            pid,
            size,
        })
    }

    /// Look up the PCB for `pid`
    pub fn pcb(&self, pid: Pid) -> ProcessResult<&Pcb> {
        Self::check_range(pid)?;
        self.slots.get(&pid).ok_or(ProcessError::NotFound(pid))
    }

    /// Mutable lookup, for the scheduling core only
    pub(crate) fn pcb_mut(&mut self, pid: Pid) -> ProcessResult<&mut Pcb> {
        Self::check_range(pid)?;
        self.slots.get_mut(&pid).ok_or(ProcessError::NotFound(pid))
    }

    /// Release the PCB and instruction stream for `pid`.
    ///
    /// Errors leave the table untouched; safe to call on every occupied
    /// slot during teardown.
    pub fn remove(&mut self, pid: Pid) -> ProcessResult<()> {
        Self::check_range(pid)?;
        match self.slots.remove(&pid) {
            Some(_) => {
                info!("Process {} deleted", pid);
                Ok(())
            }
            None => Err(ProcessError::NotFound(pid)),
        }
    }

    /// Iterate live PCBs in ascending pid order
    pub fn iter(&self) -> impl Iterator<Item = (Pid, &Pcb)> {
        self.slots.iter().map(|(&pid, pcb)| (pid, pcb))
    }

    /// Pids of all live PCBs, ascending
    pub fn pids(&self) -> Vec<Pid> {
        self.slots.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every PCB and restart pid allocation
    pub fn clear(&mut self) {
        self.slots.clear();
        self.next_pid = 1;
    }

    fn check_range(pid: Pid) -> ProcessResult<()> {
        if pid == 0 || pid > MAX_PROCESSES {
            return Err(ProcessError::OutOfRange(pid, MAX_PROCESSES));
        }
        Ok(())
    }
}
