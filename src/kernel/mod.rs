/*!
 * Kernel
 * Owns the process table, the ready policy and the disk queue, and decides
 * which process holds the CPU
 */

use crate::config::KernelConfig;
use crate::core::errors::ProcessError;
use crate::core::types::ProcessId;
use crate::io::{Disk, ReadTokenRequest};
use crate::process::{AddressSpace, Console, ProcessContext, ProcessTable, ProcessTableEntry};
use crate::program::Program;
use crate::scheduler::{policy_for, SchedulingPolicy};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::info;

mod cpu;
mod metrics;
mod operations;
mod switch;

pub use cpu::Cpu;
pub use metrics::{KernelStats, SimulationReport};

/// Single-CPU kernel
///
/// Every method runs on the caller's thread; the CPU loop and the disk call in
/// synchronously, which keeps request order and scheduling decisions
/// deterministic.
pub struct Kernel {
    cpu: Cpu,
    table: ProcessTable,
    pending: VecDeque<ReadTokenRequest>,
    policy: Box<dyn SchedulingPolicy>,
    disk: Box<dyn Disk>,
    stats: KernelStats,
}

impl Kernel {
    /// Create a kernel with the idle process already in the table
    pub fn new(policy: Box<dyn SchedulingPolicy>, disk: Box<dyn Disk>) -> Self {
        info!(policy = policy.kind().as_str(), "kernel initialized");

        Self {
            cpu: Cpu::new(),
            table: ProcessTable::new(Arc::new(Program::idle())),
            pending: VecDeque::new(),
            policy,
            disk,
            stats: KernelStats::default(),
        }
    }

    /// Create a kernel with the policy named in `config`
    pub fn from_config(config: &KernelConfig, disk: Box<dyn Disk>) -> Self {
        Self::new(policy_for(config.policy, config.quantum), disk)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn process(&self, id: ProcessId) -> Option<&ProcessTableEntry> {
        self.table.get(id)
    }

    pub fn policy(&self) -> &dyn SchedulingPolicy {
        self.policy.as_ref()
    }

    pub fn disk(&self) -> &dyn Disk {
        self.disk.as_ref()
    }

    pub fn disk_mut(&mut self) -> &mut dyn Disk {
        self.disk.as_mut()
    }

    /// Requests waiting for the disk, oldest first
    pub fn pending_requests(&self) -> impl Iterator<Item = &ReadTokenRequest> {
        self.pending.iter()
    }

    pub fn stats(&self) -> &KernelStats {
        &self.stats
    }

    /// Program of the process on the CPU
    pub fn active_program(&self) -> Option<Arc<Program>> {
        let active = self.cpu.active?;
        self.table.get(active).map(|e| Arc::clone(&e.program))
    }

    /// Address space of `id`, wherever it is currently loaded
    pub fn address_space(&self, id: ProcessId) -> Option<&AddressSpace> {
        self.context(id).map(|c| &c.address_space)
    }

    /// Console of `id`, wherever it is currently loaded
    pub fn console(&self, id: ProcessId) -> Option<&Console> {
        self.context(id).map(|c| &c.console)
    }

    /// Nothing can run and no I/O is outstanding
    pub fn is_finished(&self) -> bool {
        self.cpu.halted && self.disk.is_idle() && self.pending.is_empty()
    }

    fn context(&self, id: ProcessId) -> Option<&ProcessContext> {
        if self.cpu.active == Some(id) {
            self.cpu.context.as_ref()
        } else {
            self.table.get(id)?.context.as_ref()
        }
    }

    fn context_mut(&mut self, id: ProcessId) -> Result<&mut ProcessContext, ProcessError> {
        let context = if self.cpu.active == Some(id) {
            self.cpu.context.as_mut()
        } else {
            self.table.entry_mut(id)?.context.as_mut()
        };
        context.ok_or_else(|| {
            ProcessError::InvalidState(format!("context of process {} is not loaded anywhere", id))
        })
    }
}
