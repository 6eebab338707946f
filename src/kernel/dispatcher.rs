/*!
 * Dispatcher
 * One scheduling cycle: unblock, requeue, select, dispatch
 */

use super::types::CycleOutcome;
use super::Kernel;
use crate::core::errors::SchedulerError;
use crate::process::types::ProcessState;
use crate::sched::Policy;
use log::{debug, error, info};

impl Kernel {
    /// Run one full dispatch cycle under `policy`.
    ///
    /// Cycle order: unblock eligible processes, rebuild the queues, stop
    /// when nothing is active, skip dispatch when nothing is ready, demote
    /// a leftover RUNNING process, select, promote, execute. A policy
    /// selection that does not map to a live PCB aborts the cycle without
    /// corrupting the table; the driver may keep cycling afterwards.
    pub fn run_cycle(&mut self, policy: Policy) -> Result<CycleOutcome, SchedulerError> {
        self.stats.cycles += 1;
        debug!("Cycle {} starting ({})", self.stats.cycles, policy);

        self.unblock();
        self.refresh_queues();

        if !self.has_active_processes() {
            info!("No active processes, scheduler idle");
            return Ok(CycleOutcome::Idle);
        }
        if self.ready_queue.is_empty() {
            info!("No ready processes this cycle");
            return Ok(CycleOutcome::AllBlocked);
        }
        debug!("Ready queue: {:?}", self.ready_queue);

        // Preemption point for a process a previous cycle left running.
        if let Some(pid) = self.current {
            if let Ok(pcb) = self.table.pcb_mut(pid) {
                if pcb.state == ProcessState::Running {
                    pcb.state = ProcessState::Ready;
                }
            }
        }

        let selected = self
            .selector
            .select(policy, &self.ready_queue, &self.table)
            .ok_or(SchedulerError::NoCandidate)?;

        // Re-validate the policy's answer before touching any state.
        match self.table.pcb_mut(selected) {
            Ok(pcb) => pcb.state = ProcessState::Running,
            Err(err) => {
                error!("Policy returned pid {} ({}), aborting cycle", selected, err);
                return Err(SchedulerError::InvalidSelection(selected));
            }
        }
        self.current = Some(selected);
        self.stats.dispatches += 1;
        info!("Process {} scheduled for execution ({})", selected, policy);

        let run = self.execute(selected)?;
        Ok(CycleOutcome::Ran { pid: selected, run })
    }

    /// String-facing variant of [`run_cycle`](Self::run_cycle) for
    /// external drivers; unknown names are an error
    pub fn run_cycle_named(&mut self, policy: &str) -> Result<CycleOutcome, SchedulerError> {
        let policy = policy.parse::<Policy>()?;
        self.run_cycle(policy)
    }

    /// Drive cycles until no active process remains, bounded by
    /// `max_cycles` as a guard against runaway simulations. Returns the
    /// number of cycles consumed.
    pub fn run_until_idle(
        &mut self,
        policy: Policy,
        max_cycles: u64,
    ) -> Result<u64, SchedulerError> {
        for cycle in 1..=max_cycles {
            if self.run_cycle(policy)? == CycleOutcome::Idle {
                return Ok(cycle);
            }
        }
        if self.has_active_processes() {
            error!("Cycle limit {} reached with active processes", max_cycles);
            return Err(SchedulerError::CycleLimitReached(max_cycles));
        }
        Ok(max_cycles)
    }
}
