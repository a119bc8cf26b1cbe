/*!
 * Program Store
 * Parsed programs cached by file name
 */

use super::Program;
use crate::core::errors::{KernelResult, ProgramError};
use ahash::AHashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Code source: parses each program once and hands out shared copies
#[derive(Debug, Default)]
pub struct ProgramStore {
    programs: AHashMap<String, Arc<Program>>,
}

impl ProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register program text under `name`, replacing any previous program
    pub fn register(&mut self, name: &str, source: &str) -> Result<Arc<Program>, ProgramError> {
        let program = Arc::new(Program::parse(name, source)?);
        self.programs.insert(name.to_string(), Arc::clone(&program));
        debug!(name, instructions = program.len(), "program registered");
        Ok(program)
    }

    /// Load a program file, keyed by the path as given
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> KernelResult<Arc<Program>> {
        let path = path.as_ref();
        let name = path.display().to_string();
        if let Some(program) = self.programs.get(&name) {
            return Ok(Arc::clone(program));
        }

        let source = std::fs::read_to_string(path)?;
        Ok(self.register(&name, &source)?)
    }

    pub fn get(&self, name: &str) -> Result<Arc<Program>, ProgramError> {
        self.programs
            .get(name)
            .cloned()
            .ok_or_else(|| ProgramError::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
