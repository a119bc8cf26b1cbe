/*!
 * Scheduler Types
 * Domain types for scheduling policies
 */

use crate::core::errors::SchedulerError;
use crate::core::types::Pid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of asking a policy for the next process
///
/// Policies disagree on what an empty ready queue means, so the answer is a
/// tagged result instead of a sentinel id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Dispatch this user process
    Ready(Pid),
    /// Nothing ready; running the idle process is acceptable
    Idle,
    /// Nothing ready and the policy never falls back to idle
    Exhausted,
}

impl Selection {
    #[inline]
    #[must_use]
    pub const fn pid(self) -> Option<Pid> {
        match self {
            Self::Ready(pid) => Some(pid),
            Self::Idle | Self::Exhausted => None,
        }
    }
}

/// Scheduling policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Non-preemptive FIFO
    FirstComeFirstServed,
    /// Preemptive FIFO with a fixed tick quantum
    RoundRobin,
}

impl PolicyKind {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, SchedulerError> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" | "first_come_first_served" | "firstcomefirstserved" => {
                Ok(Self::FirstComeFirstServed)
            }
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(SchedulerError::InvalidPolicy(format!(
                "'{}'. Valid: fcfs, round_robin",
                s
            ))),
        }
    }

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstComeFirstServed => "first_come_first_served",
            Self::RoundRobin => "round_robin",
        }
    }
}

impl Serialize for PolicyKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PolicyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Time quantum in CPU ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quantum(u32);

impl Quantum {
    pub const DEFAULT: Quantum = Quantum(1);

    /// Create new time quantum
    pub fn new(ticks: u32) -> Result<Self, SchedulerError> {
        if ticks == 0 {
            return Err(SchedulerError::InvalidQuantum(
                "quantum must be at least 1 tick".to_string(),
            ));
        }
        Ok(Self(ticks))
    }

    #[inline(always)]
    pub const fn ticks(&self) -> u32 {
        self.0
    }
}

impl Default for Quantum {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> Deserialize<'de> for Quantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = u32::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}
