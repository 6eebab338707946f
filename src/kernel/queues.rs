/*!
 * Queue Maintenance
 * Ready/block queues derived from the process table each cycle
 */

use super::Kernel;
use crate::process::types::ProcessState;
use log::info;

impl Kernel {
    /// Rebuild both queues from a full table scan in ascending pid order.
    ///
    /// The queues are views; the PCB state field stays authoritative.
    /// Idempotent: without intervening state changes a second refresh
    /// produces identical sequences.
    pub(crate) fn refresh_queues(&mut self) {
        self.ready_queue.clear();
        self.block_queue.clear();
        for (pid, pcb) in self.table.iter() {
            match pcb.state {
                ProcessState::Ready => self.ready_queue.push(pid),
                ProcessState::Blocked => self.block_queue.push(pid),
                _ => {}
            }
        }
    }

    /// Move every still-blocked process on the block queue to READY.
    ///
    /// Runs against the previous cycle's queue, before the refresh: a
    /// blocking call completes one cycle after it is observed, with no
    /// modeled I/O duration.
    pub(crate) fn unblock(&mut self) {
        let blocked = self.block_queue.clone();
        for pid in blocked {
            if let Ok(pcb) = self.table.pcb_mut(pid) {
                if pcb.state == ProcessState::Blocked {
                    pcb.state = ProcessState::Ready;
                    self.stats.unblocks += 1;
                    info!("Process {} unblocked, back to READY", pid);
                }
            }
        }
    }

    /// True while any process is in an active state (ready, running,
    /// blocked, or suspended)
    pub fn has_active_processes(&self) -> bool {
        self.table.iter().any(|(_, pcb)| pcb.is_active())
    }
}
