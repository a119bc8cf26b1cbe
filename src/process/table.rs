/*!
 * Process Table
 * Dense id-indexed storage of process entries
 */

use super::types::{ProcessInfo, ProcessTableEntry};
use crate::core::errors::ProcessError;
use crate::core::types::{Pid, ProcessId, Tick};
use crate::program::Program;
use std::sync::Arc;

/// Process table
///
/// Ids are table indices: the idle process sits at index 0 and user ids are
/// handed out sequentially. Entries are never removed, so ids are never reused.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    entries: Vec<ProcessTableEntry>,
}

impl ProcessTable {
    /// Create a table holding only the idle process
    pub fn new(idle_program: Arc<Program>) -> Self {
        Self {
            entries: vec![ProcessTableEntry::new(
                ProcessId::Idle,
                "idle",
                idle_program,
                0,
            )],
        }
    }

    /// Append a new user process and return its id
    pub fn allocate(&mut self, name: impl Into<String>, program: Arc<Program>, now: Tick) -> Pid {
        let pid = self.entries.len() as Pid;
        self.entries
            .push(ProcessTableEntry::new(ProcessId::User(pid), name, program, now));
        pid
    }

    #[inline]
    pub fn get(&self, id: ProcessId) -> Option<&ProcessTableEntry> {
        self.entries.get(id.raw() as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ProcessId) -> Option<&mut ProcessTableEntry> {
        self.entries.get_mut(id.raw() as usize)
    }

    /// Lookup that reports unknown ids as [`ProcessError::NotFound`]
    pub fn entry(&self, id: ProcessId) -> Result<&ProcessTableEntry, ProcessError> {
        self.get(id).ok_or(ProcessError::NotFound(id.raw()))
    }

    pub fn entry_mut(&mut self, id: ProcessId) -> Result<&mut ProcessTableEntry, ProcessError> {
        self.get_mut(id).ok_or(ProcessError::NotFound(id.raw()))
    }

    pub fn idle(&self) -> &ProcessTableEntry {
        &self.entries[0]
    }

    /// Number of entries including idle
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessTableEntry> {
        self.entries.iter()
    }

    /// All entries except idle
    pub fn user_entries(&self) -> impl Iterator<Item = &ProcessTableEntry> {
        self.entries.iter().skip(1)
    }

    /// True once every user process has terminated
    pub fn all_user_done(&self) -> bool {
        self.user_entries().all(|e| e.done)
    }

    /// User processes that are neither done nor blocked
    pub fn runnable_user_pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.user_entries()
            .filter(|e| e.is_runnable())
            .filter_map(|e| e.id.user())
    }

    /// Summaries of the user processes, in id order
    pub fn snapshot(&self) -> Vec<ProcessInfo> {
        self.user_entries().map(ProcessTableEntry::info).collect()
    }
}
