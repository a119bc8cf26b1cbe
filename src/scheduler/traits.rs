/*!
 * Scheduler Traits
 * Interface definitions for ready-queue policies
 */

use super::types::{PolicyKind, Quantum, Selection};
use crate::core::types::ProcessId;
use crate::process::ProcessTable;

/// Ready-queue strategy consulted by the kernel
///
/// Policies own their ready structure and share nothing with the kernel except
/// the process table passed at call time. They never fail: handing them an
/// unknown id is a programmer error.
pub trait SchedulingPolicy: Send {
    /// Which policy this is (for logs and reports)
    fn kind(&self) -> PolicyKind;

    /// Insert a ready process; the idle process is ignored
    fn add_process(&mut self, id: ProcessId);

    /// Select and remove the next process to run
    fn next_process(&mut self, table: &mut ProcessTable) -> Selection;

    /// Whether a disk completion should trigger an immediate scheduling decision
    fn reschedule_after_interrupt(&self) -> bool;

    /// Whether the CPU's remaining-quantum register is meaningful
    fn is_preemptive(&self) -> bool {
        self.quantum().is_some()
    }

    /// Tick allowance per dispatch, for preemptive policies
    fn quantum(&self) -> Option<Quantum>;

    /// Number of processes waiting in the ready structure
    fn ready_len(&self) -> usize;
}
