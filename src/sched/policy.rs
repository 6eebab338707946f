/*!
 * Scheduling Policies
 * FCFS, SJF, Priority, and Round-Robin selection over the ready queue
 */

use crate::core::errors::SchedulerError;
use crate::core::types::Pid;
use crate::process::pcb::Pcb;
use crate::process::table::ProcessTable;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// First come, first served: head of the ready queue
    Fcfs,
    /// Shortest job first: minimum remaining instructions
    Sjf,
    /// Minimum priority value wins (lower = more urgent)
    Priority,
    /// Circular rotation over the ready queue
    RoundRobin,
}

impl Policy {
    pub const ALL: [Policy; 4] = [Policy::Fcfs, Policy::Sjf, Policy::Priority, Policy::RoundRobin];
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::Priority => "priority",
            Policy::RoundRobin => "rr",
        };
        f.write_str(name)
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "priority" => Ok(Policy::Priority),
            "rr" => Ok(Policy::RoundRobin),
            other => Err(SchedulerError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Policy selector over ready-queue snapshots.
///
/// The only persistent piece of state is the pid Round-Robin dispatched
/// last: the queue is rebuilt every cycle, so rotation resumes from that
/// pid's position in the current snapshot rather than from a raw index,
/// falling back to the front when it is no longer ready.
#[derive(Debug, Default)]
pub struct Selector {
    last_dispatched: Option<Pid>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget Round-Robin rotation state
    pub fn reset(&mut self) {
        self.last_dispatched = None;
    }

    /// Pick one live pid from the ready snapshot, or `None` if the queue
    /// is empty or holds no live entry. Invalid entries are skipped, not
    /// fatal.
    pub fn select(&mut self, policy: Policy, ready: &[Pid], table: &ProcessTable) -> Option<Pid> {
        if ready.is_empty() {
            return None;
        }
        let selected = match policy {
            Policy::Fcfs => self.select_fcfs(ready, table),
            Policy::Sjf => self.select_sjf(ready, table),
            Policy::Priority => self.select_priority(ready, table),
            Policy::RoundRobin => self.select_round_robin(ready, table),
        };
        if let Some(pid) = selected {
            self.last_dispatched = Some(pid);
        }
        selected
    }

    fn select_fcfs(&self, ready: &[Pid], table: &ProcessTable) -> Option<Pid> {
        let pid = ready.iter().copied().find(|&pid| live(table, pid))?;
        debug!("[fcfs] selected pid {} at queue head", pid);
        Some(pid)
    }

    fn select_sjf(&self, ready: &[Pid], table: &ProcessTable) -> Option<Pid> {
        let pcb = live_pcbs(ready, table).min_by_key(|pcb| pcb.remaining())?;
        debug!(
            "[sjf] selected pid {} ({} instructions remaining)",
            pcb.pid,
            pcb.remaining()
        );
        Some(pcb.pid)
    }

    fn select_priority(&self, ready: &[Pid], table: &ProcessTable) -> Option<Pid> {
        let pcb = live_pcbs(ready, table).min_by_key(|pcb| pcb.priority)?;
        debug!("[priority] selected pid {} (priority {})", pcb.pid, pcb.priority);
        Some(pcb.pid)
    }

    fn select_round_robin(&self, ready: &[Pid], table: &ProcessTable) -> Option<Pid> {
        let start = self
            .last_dispatched
            .and_then(|last| ready.iter().position(|&pid| pid == last))
            .map_or(0, |pos| pos + 1);

        for offset in 0..ready.len() {
            let pid = ready[(start + offset) % ready.len()];
            if live(table, pid) {
                debug!("[rr] selected pid {} (rotation from {:?})", pid, self.last_dispatched);
                return Some(pid);
            }
        }
        None
    }
}

fn live(table: &ProcessTable, pid: Pid) -> bool {
    match table.pcb(pid) {
        Ok(_) => true,
        Err(err) => {
            warn!("Skipping ready-queue entry {}: {}", pid, err);
            false
        }
    }
}

fn live_pcbs<'a>(ready: &'a [Pid], table: &'a ProcessTable) -> impl Iterator<Item = &'a Pcb> {
    ready.iter().filter_map(move |&pid| match table.pcb(pid) {
        Ok(pcb) => Some(pcb),
        Err(err) => {
            warn!("Skipping ready-queue entry {}: {}", pid, err);
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::types::ProcessType;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table_with(sizes: &[i64], priorities: &[u32]) -> ProcessTable {
        let mut table = ProcessTable::new();
        let mut rng = StdRng::seed_from_u64(5);
        for (&size, &priority) in sizes.iter().zip(priorities) {
            table
                .create(&mut rng, "p", size, priority, ProcessType::Regular)
                .unwrap();
        }
        table
    }

    #[test]
    fn fcfs_returns_queue_head() {
        let table = table_with(&[10, 10, 10], &[20, 20, 20]);
        let mut selector = Selector::new();
        assert_eq!(selector.select(Policy::Fcfs, &[1, 2, 3], &table), Some(1));
    }

    #[test]
    fn sjf_picks_minimum_remaining_instructions() {
        let mut table = table_with(&[10, 5, 8], &[20, 20, 20]);
        // Remaining: pid 1 -> 10, pid 2 -> 3, pid 3 -> 7.
        table.pcb_mut(2).unwrap().pc = 2;
        table.pcb_mut(3).unwrap().pc = 1;
        let mut selector = Selector::new();
        assert_eq!(selector.select(Policy::Sjf, &[1, 2, 3], &table), Some(2));
    }

    #[test]
    fn sjf_breaks_ties_by_queue_order() {
        let table = table_with(&[6, 6, 6], &[20, 20, 20]);
        let mut selector = Selector::new();
        assert_eq!(selector.select(Policy::Sjf, &[2, 1, 3], &table), Some(2));
    }

    #[test]
    fn priority_prefers_lowest_value() {
        let table = table_with(&[10, 10, 10], &[20, 5, 15]);
        let mut selector = Selector::new();
        assert_eq!(selector.select(Policy::Priority, &[1, 2, 3], &table), Some(2));
    }

    #[test]
    fn round_robin_rotates_over_stable_queue() {
        let table = table_with(&[10, 10, 10], &[20, 20, 20]);
        let mut selector = Selector::new();
        let ready = [1, 2, 3];
        let picks: Vec<_> = (0..4)
            .map(|_| selector.select(Policy::RoundRobin, &ready, &table).unwrap())
            .collect();
        assert_eq!(picks, vec![1, 2, 3, 1]);
    }

    #[test]
    fn round_robin_restarts_when_last_pid_left_the_queue() {
        let table = table_with(&[10, 10, 10], &[20, 20, 20]);
        let mut selector = Selector::new();
        assert_eq!(selector.select(Policy::RoundRobin, &[2], &table), Some(2));
        // Pid 2 vanished from the snapshot; rotation falls back to the front.
        assert_eq!(selector.select(Policy::RoundRobin, &[1, 3], &table), Some(1));
    }

    #[test]
    fn dead_queue_entries_are_skipped_not_fatal() {
        let table = table_with(&[10], &[20]);
        let mut selector = Selector::new();
        assert_eq!(selector.select(Policy::Fcfs, &[99, 1], &table), Some(1));
        assert_eq!(selector.select(Policy::Sjf, &[99, 1], &table), Some(1));
        assert_eq!(selector.select(Policy::RoundRobin, &[99], &table), None);
    }

    #[test]
    fn empty_queue_selects_nothing() {
        let table = table_with(&[], &[]);
        let mut selector = Selector::new();
        for policy in Policy::ALL {
            assert_eq!(selector.select(policy, &[], &table), None);
        }
    }

    #[test]
    fn policy_names_round_trip() {
        for policy in Policy::ALL {
            assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
        }
        assert!(matches!(
            "lottery".parse::<Policy>(),
            Err(SchedulerError::UnknownPolicy(name)) if name == "lottery"
        ));
    }
}
