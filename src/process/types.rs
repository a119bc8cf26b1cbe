/*!
 * Process Types
 * Per-process state records and the context swapped onto the CPU
 */

use crate::core::types::{ProcessId, Tick};
use crate::program::Program;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Variable storage owned by one process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressSpace {
    variables: AHashMap<String, f64>,
}

impl AddressSpace {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    #[inline]
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Output sink for one process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Console {
    lines: Vec<String>,
    closed: bool,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line; writes after close are dropped
    pub fn write_line(&mut self, line: impl Into<String>) {
        if self.closed {
            warn!("write to closed console dropped");
            return;
        }
        self.lines.push(line.into());
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// State that moves onto the CPU while the process is active
#[derive(Debug, Clone, Default)]
pub struct ProcessContext {
    pub address_space: AddressSpace,
    pub console: Console,
}

/// Process table entry
#[derive(Debug, Clone)]
pub struct ProcessTableEntry {
    pub id: ProcessId,
    pub name: String,
    pub program: Arc<Program>,
    /// Saved program counter; stale while the process is on the CPU
    pub program_counter: usize,
    /// `None` while the context is loaded into the CPU
    pub(crate) context: Option<ProcessContext>,
    pub done: bool,
    pub blocked: bool,
    pub quantum: u32,
    pub start_time: Tick,
    pub end_time: Option<Tick>,
    /// Tick at which the process last became ready
    pub out_of_block: Tick,
    pub max_starvation: Tick,
}

impl ProcessTableEntry {
    pub fn new(id: ProcessId, name: impl Into<String>, program: Arc<Program>, now: Tick) -> Self {
        Self {
            id,
            name: name.into(),
            program,
            program_counter: 0,
            context: Some(ProcessContext::default()),
            done: false,
            blocked: false,
            quantum: 0,
            start_time: now,
            end_time: None,
            out_of_block: now,
            max_starvation: 0,
        }
    }

    /// Not done and not blocked
    #[inline(always)]
    #[must_use]
    pub const fn is_runnable(&self) -> bool {
        !self.done && !self.blocked
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.id.is_idle()
    }

    /// Context, when it is not loaded into the CPU
    pub fn context(&self) -> Option<&ProcessContext> {
        self.context.as_ref()
    }

    /// Ticks from creation to termination
    #[inline]
    #[must_use]
    pub fn turnaround(&self) -> Option<Tick> {
        self.end_time.map(|end| end.saturating_sub(self.start_time))
    }

    /// Raise the starvation high-water mark to `now - out_of_block`
    pub fn record_starvation(&mut self, now: Tick) {
        let waited = now.saturating_sub(self.out_of_block);
        if waited > self.max_starvation {
            self.max_starvation = waited;
        }
    }

    pub fn info(&self) -> ProcessInfo {
        ProcessInfo {
            id: self.id,
            name: self.name.clone(),
            done: self.done,
            blocked: self.blocked,
            start_time: self.start_time,
            end_time: self.end_time,
            turnaround: self.turnaround(),
            max_starvation: self.max_starvation,
        }
    }
}

/// Serializable process summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub id: ProcessId,
    pub name: String,
    pub done: bool,
    pub blocked: bool,
    pub start_time: Tick,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Tick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnaround: Option<Tick>,
    pub max_starvation: Tick,
}
