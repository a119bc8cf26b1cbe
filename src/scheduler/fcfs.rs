/*!
 * First-Come-First-Served Policy
 * Non-preemptive FIFO ready queue that falls back to idle
 */

use super::traits::SchedulingPolicy;
use super::types::{PolicyKind, Quantum, Selection};
use crate::core::types::{Pid, ProcessId};
use crate::process::ProcessTable;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// FIFO policy: runs each process until it blocks or terminates
#[derive(Debug, Default)]
pub struct FirstComeFirstServed {
    ready: VecDeque<Pid>,
}

impl FirstComeFirstServed {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingPolicy for FirstComeFirstServed {
    fn kind(&self) -> PolicyKind {
        PolicyKind::FirstComeFirstServed
    }

    fn add_process(&mut self, id: ProcessId) {
        match id {
            ProcessId::User(pid) => {
                self.ready.push_back(pid);
                debug!(pid, queued = self.ready.len(), "fcfs: process queued");
            }
            ProcessId::Idle => warn!("fcfs: refusing to queue the idle process"),
        }
    }

    fn next_process(&mut self, _table: &mut ProcessTable) -> Selection {
        match self.ready.pop_front() {
            Some(pid) => Selection::Ready(pid),
            None => Selection::Idle,
        }
    }

    fn reschedule_after_interrupt(&self) -> bool {
        false
    }

    fn quantum(&self) -> Option<Quantum> {
        None
    }

    fn ready_len(&self) -> usize {
        self.ready.len()
    }
}
