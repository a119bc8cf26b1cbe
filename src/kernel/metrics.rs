/*!
 * Kernel Metrics
 * Turnaround and starvation over the process table, plus event counters
 */

use super::Kernel;
use crate::core::types::Tick;
use crate::process::ProcessInfo;
use crate::scheduler::PolicyKind;
use serde::{Deserialize, Serialize};

/// Kernel event counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KernelStats {
    pub processes_created: u64,
    pub context_switches: u64,
    /// Switches that displaced a process which could still have run
    pub preemptions: u64,
    pub timeouts: u64,
    pub reads_issued: u64,
    pub interrupts: u64,
    pub faults: u64,
    /// Processes killed by malformed read results
    pub aborted: u64,
}

/// End-of-run summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationReport {
    pub policy: PolicyKind,
    pub ticks: Tick,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_turnaround: Option<f64>,
    pub maximal_starvation: Tick,
    pub stats: KernelStats,
    pub processes: Vec<ProcessInfo>,
}

impl Kernel {
    /// Mean of `end - start` over terminated user processes
    ///
    /// `None` when no user process has terminated.
    pub fn average_turnaround(&self) -> Option<f64> {
        let (sum, count) = self
            .table
            .user_entries()
            .filter_map(|e| e.turnaround())
            .fold((0u64, 0u64), |(sum, count), t| (sum + t, count + 1));

        if count == 0 {
            None
        } else {
            Some(sum as f64 / count as f64)
        }
    }

    /// Largest starvation high-water mark of any user process
    pub fn maximal_starvation(&self) -> Tick {
        self.table
            .user_entries()
            .map(|e| e.max_starvation)
            .max()
            .unwrap_or(0)
    }

    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            policy: self.policy.kind(),
            ticks: self.cpu.tick,
            average_turnaround: self.average_turnaround(),
            maximal_starvation: self.maximal_starvation(),
            stats: self.stats.clone(),
            processes: self.table.snapshot(),
        }
    }
}
