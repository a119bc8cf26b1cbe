/*!
 * Scheduler Module
 * Ready-queue policies and policy selection
 */

pub mod fcfs;
pub mod round_robin;
pub mod traits;
pub mod types;

// Re-export public API
pub use fcfs::FirstComeFirstServed;
pub use round_robin::RoundRobin;
pub use traits::SchedulingPolicy;
pub use types::{PolicyKind, Quantum, Selection};

/// Build the policy named by `kind`
pub fn policy_for(kind: PolicyKind, quantum: Quantum) -> Box<dyn SchedulingPolicy> {
    match kind {
        PolicyKind::FirstComeFirstServed => Box::new(FirstComeFirstServed::new()),
        PolicyKind::RoundRobin => Box::new(RoundRobin::new(quantum)),
    }
}
