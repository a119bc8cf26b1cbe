/*!
 * Round-Robin Policy
 * Preemptive FIFO ready queue with a fixed tick quantum
 */

use super::traits::SchedulingPolicy;
use super::types::{PolicyKind, Quantum, Selection};
use crate::core::types::{Pid, ProcessId};
use crate::process::ProcessTable;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Round-robin policy
///
/// Stamps the configured quantum onto each process it selects. An empty queue
/// yields [`Selection::Exhausted`]: this policy never hands the CPU to idle.
#[derive(Debug)]
pub struct RoundRobin {
    quantum: Quantum,
    ready: VecDeque<Pid>,
}

impl RoundRobin {
    pub fn new(quantum: Quantum) -> Self {
        Self {
            quantum,
            ready: VecDeque::new(),
        }
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(Quantum::DEFAULT)
    }
}

impl SchedulingPolicy for RoundRobin {
    fn kind(&self) -> PolicyKind {
        PolicyKind::RoundRobin
    }

    fn add_process(&mut self, id: ProcessId) {
        match id {
            ProcessId::User(pid) => {
                self.ready.push_back(pid);
                debug!(pid, queued = self.ready.len(), "rr: process queued");
            }
            ProcessId::Idle => warn!("rr: refusing to queue the idle process"),
        }
    }

    fn next_process(&mut self, table: &mut ProcessTable) -> Selection {
        let Some(pid) = self.ready.pop_front() else {
            return Selection::Exhausted;
        };

        if let Some(entry) = table.get_mut(ProcessId::User(pid)) {
            entry.quantum = self.quantum.ticks();
        } else {
            warn!(pid, "rr: selected pid missing from process table");
        }
        Selection::Ready(pid)
    }

    fn reschedule_after_interrupt(&self) -> bool {
        true
    }

    fn quantum(&self) -> Option<Quantum> {
        Some(self.quantum)
    }

    fn ready_len(&self) -> usize {
        self.ready.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Program;
    use std::sync::Arc;

    #[test]
    fn test_selection_stamps_quantum() {
        let mut table = ProcessTable::new(Arc::new(Program::idle()));
        let pid = table.allocate("a", Arc::new(Program::default()), 0);
        let mut policy = RoundRobin::new(Quantum::new(3).unwrap());

        policy.add_process(ProcessId::User(pid));
        assert_eq!(policy.next_process(&mut table), Selection::Ready(pid));
        assert_eq!(table.get(ProcessId::User(pid)).unwrap().quantum, 3);
    }

    #[test]
    fn test_empty_queue_is_exhausted() {
        let mut table = ProcessTable::new(Arc::new(Program::idle()));
        let mut policy = RoundRobin::default();
        assert_eq!(policy.next_process(&mut table), Selection::Exhausted);
    }

    #[test]
    fn test_preemptive_contract() {
        let policy = RoundRobin::new(Quantum::new(2).unwrap());
        assert!(policy.is_preemptive());
        assert!(policy.reschedule_after_interrupt());
        assert_eq!(policy.quantum().map(|q| q.ticks()), Some(2));
    }
}
