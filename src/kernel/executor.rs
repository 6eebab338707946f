/*!
 * Instruction Executor
 * Advances a dispatched process until it blocks, preempts, or dies
 */

use super::types::RunOutcome;
use super::Kernel;
use crate::core::errors::SchedulerError;
use crate::core::types::Pid;
use crate::process::types::{ProcessState, SyscallKind};
use log::info;

impl Kernel {
    /// Execute instructions for the RUNNING process `pid`, one per step,
    /// counted against its time-slice quantum.
    ///
    /// Reaching `pc == size` is terminal and wins over every other
    /// transition; a long system call blocks after being stepped past;
    /// quantum exhaustion demotes the process back to READY.
    pub(crate) fn execute(&mut self, pid: Pid) -> Result<RunOutcome, SchedulerError> {
        let pcb = self
            .table
            .pcb_mut(pid)
            .map_err(|_| SchedulerError::InvalidSelection(pid))?;

        let quantum = pcb.timeslice;
        let mut executed: u32 = 0;

        let outcome = loop {
            if pcb.pc >= pcb.size {
                pcb.state = ProcessState::Dead;
                break RunOutcome::Completed;
            }

            let call = pcb.code[pcb.pc as usize].syscall;
            pcb.pc += 1;
            executed += 1;

            if pcb.pc >= pcb.size {
                pcb.state = ProcessState::Dead;
                break RunOutcome::Completed;
            }
            if call == SyscallKind::Long {
                pcb.state = ProcessState::Blocked;
                break RunOutcome::Blocked;
            }
            if executed >= quantum {
                pcb.state = ProcessState::Ready;
                break RunOutcome::Preempted;
            }
        };

        match outcome {
            RunOutcome::Completed => {
                self.stats.completions += 1;
                info!("Process {} completed after {} instructions", pid, executed);
            }
            RunOutcome::Blocked => {
                self.stats.blocks += 1;
                info!(
                    "Process {} blocked on a long call after {} instructions",
                    pid, executed
                );
            }
            RunOutcome::Preempted => {
                self.stats.preemptions += 1;
                info!("Process {} preempted, quantum of {} exhausted", pid, quantum);
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::types::{Instruction, ProcessType};
    use crate::sched::Policy;
    use pretty_assertions::assert_eq;

    fn kernel_with_one(size: i64) -> Kernel {
        let mut kernel = Kernel::with_seed(13);
        kernel
            .create_process("p", size, 20, ProcessType::Regular)
            .unwrap();
        kernel
    }

    fn rewrite_code(kernel: &mut Kernel, pid: u32, kinds: &[SyscallKind]) {
        let pcb = kernel.table_mut().pcb_mut(pid).unwrap();
        pcb.code = kinds
            .iter()
            .enumerate()
            .map(|(num, &syscall)| Instruction {
                num: num as u32,
                syscall,
                addr_ref: 0,
            })
            .collect();
        pcb.size = kinds.len() as u32;
    }

    #[test]
    fn long_call_blocks_and_advances_past_it() {
        let mut kernel = kernel_with_one(3);
        rewrite_code(
            &mut kernel,
            1,
            &[SyscallKind::Long, SyscallKind::Short, SyscallKind::Short],
        );
        kernel.table_mut().pcb_mut(1).unwrap().state = ProcessState::Running;

        assert_eq!(kernel.execute(1), Ok(RunOutcome::Blocked));
        let pcb = kernel.pcb(1).unwrap();
        assert_eq!(pcb.state, ProcessState::Blocked);
        assert_eq!(pcb.pc, 1);
    }

    #[test]
    fn quantum_exhaustion_returns_process_to_ready() {
        let mut kernel = kernel_with_one(10);
        rewrite_code(&mut kernel, 1, &[SyscallKind::Short; 10]);
        {
            let pcb = kernel.table_mut().pcb_mut(1).unwrap();
            pcb.state = ProcessState::Running;
            pcb.timeslice = 4;
        }

        assert_eq!(kernel.execute(1), Ok(RunOutcome::Preempted));
        let pcb = kernel.pcb(1).unwrap();
        assert_eq!(pcb.state, ProcessState::Ready);
        assert_eq!(pcb.pc, 4);
    }

    #[test]
    fn completion_wins_over_trailing_long_call() {
        let mut kernel = kernel_with_one(2);
        rewrite_code(&mut kernel, 1, &[SyscallKind::Short, SyscallKind::Long]);
        kernel.table_mut().pcb_mut(1).unwrap().state = ProcessState::Running;

        assert_eq!(kernel.execute(1), Ok(RunOutcome::Completed));
        let pcb = kernel.pcb(1).unwrap();
        assert_eq!(pcb.state, ProcessState::Dead);
        assert_eq!(pcb.pc, 2);
    }

    #[test]
    fn program_counter_never_exceeds_size() {
        let mut kernel = kernel_with_one(40);
        let policy = Policy::RoundRobin;
        for _ in 0..200 {
            kernel.run_cycle(policy).unwrap();
            let pcb = kernel.pcb(1).unwrap();
            assert!(pcb.pc <= pcb.size);
            if !kernel.has_active_processes() {
                break;
            }
        }
        assert!(!kernel.has_active_processes());
    }

    #[test]
    fn executing_a_missing_pid_is_an_invalid_selection() {
        let mut kernel = kernel_with_one(1);
        assert_eq!(
            kernel.execute(42),
            Err(SchedulerError::InvalidSelection(42))
        );
    }
}
