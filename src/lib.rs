/*!
 * Scheduling Kernel Library
 * Single-CPU process scheduler simulation: process table, pluggable ready
 * policies, context switching and interrupt-driven disk reads
 */

pub mod config;
pub mod core;
pub mod io;
pub mod kernel;
pub mod monitoring;
pub mod process;
pub mod program;
pub mod scheduler;
pub mod sim;

// Re-exports
pub use config::KernelConfig;
pub use crate::core::errors::{KernelError, KernelResult, ProcessError, ProgramError, SchedulerError};
pub use crate::core::types::{Pid, ProcessId, Tick};
pub use io::{Disk, ReadTokenRequest, TokenDisk};
pub use kernel::{Cpu, Kernel, KernelStats, SimulationReport};
pub use monitoring::init_tracing;
pub use process::{ProcessTable, ProcessTableEntry};
pub use program::{Program, ProgramStore};
pub use scheduler::{
    policy_for, FirstComeFirstServed, PolicyKind, Quantum, RoundRobin, SchedulingPolicy, Selection,
};
pub use sim::Machine;
