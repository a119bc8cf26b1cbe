/*!
 * Core Types
 * Identifiers and time units shared across the kernel
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// User process ID type (ids start at 1; 0 is the idle process)
pub type Pid = u32;

/// Simulation time in CPU ticks
pub type Tick = u64;

/// Raw id reserved for the idle process
pub const IDLE_RAW_ID: u32 = 0;

/// Process identity as seen by the process table
///
/// The idle process is a distinct variant rather than a magic id, so code that
/// must exclude it from queues and metrics matches on it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessId {
    Idle,
    User(Pid),
}

impl ProcessId {
    /// Dense table index of this process (idle is 0)
    #[inline(always)]
    #[must_use]
    pub const fn raw(self) -> u32 {
        match self {
            Self::Idle => IDLE_RAW_ID,
            Self::User(pid) => pid,
        }
    }

    /// Inverse of [`ProcessId::raw`]
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        if raw == IDLE_RAW_ID {
            Self::Idle
        } else {
            Self::User(raw)
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// User pid, if this is not the idle process
    #[inline]
    #[must_use]
    pub const fn user(self) -> Option<Pid> {
        match self {
            Self::Idle => None,
            Self::User(pid) => Some(pid),
        }
    }
}

impl From<Pid> for ProcessId {
    fn from(raw: Pid) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::User(pid) => write!(f, "{}", pid),
        }
    }
}
