/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The process table only holds ids handed out by create_process.")
    )]
    NotFound(u32),

    #[error("Process {pid} received malformed token {token:?} for variable '{variable}'")]
    #[diagnostic(
        code(process::malformed_token),
        help("Tokens must parse as numbers; the owning process was aborted.")
    )]
    MalformedToken {
        pid: Pid,
        variable: String,
        token: String,
    },

    #[error("Process {pid} faulted at instruction {pc}: {reason}")]
    #[diagnostic(
        code(process::execution_fault),
        help("The instruction could not be executed; the process is terminated.")
    )]
    ExecutionFault { pid: u32, pc: usize, reason: String },

    #[error("Invalid process state: {0}")]
    #[diagnostic(
        code(process::invalid_state),
        help("Operation cannot be performed in current process state.")
    )]
    InvalidState(String),
}

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Use fcfs (first_come_first_served) or round_robin (rr).")
    )]
    InvalidPolicy(String),

    #[error("Invalid quantum: {0}")]
    #[diagnostic(
        code(scheduler::invalid_quantum),
        help("The round-robin quantum is a whole number of ticks, at least 1.")
    )]
    InvalidQuantum(String),

    #[error("Process {0} is runnable but not in the ready queue")]
    #[diagnostic(
        code(scheduler::stalled),
        help("A ready process was lost by the policy. This is a scheduling bug.")
    )]
    Stalled(Pid),

    #[error("No process is active on the CPU")]
    #[diagnostic(
        code(scheduler::no_active_process),
        help("CPU callbacks are only valid while a process is dispatched.")
    )]
    NoActiveProcess,
}

/// Program text errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProgramError {
    #[error("{file}:{line}: {message}")]
    #[diagnostic(
        code(program::syntax),
        help("Instructions are `x = a`, `x = a + b`, `print a`, `read FILE INDEX x` or `idle`.")
    )]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },

    #[error("Program '{0}' not found")]
    #[diagnostic(code(program::not_found))]
    NotFound(String),
}

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Program error: {0}")]
    #[diagnostic(transparent)]
    Program(#[from] ProgramError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(kernel::io_error),
        help("Check that program and token files exist and are readable.")
    )]
    Io(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(kernel::configuration_error),
        help("Invalid configuration. Review SCHED_* environment variables.")
    )]
    Configuration(String),

    #[error("Simulation exceeded {0} ticks")]
    #[diagnostic(
        code(kernel::tick_limit),
        help("Raise SCHED_MAX_TICKS or check for programs that never finish.")
    )]
    TickLimit(Tick),
}

impl From<std::io::Error> for KernelError {
    fn from(err: std::io::Error) -> Self {
        KernelError::Io(err.to_string())
    }
}

/// Result type for kernel operations
pub type KernelResult<T> = std::result::Result<T, KernelError>;
