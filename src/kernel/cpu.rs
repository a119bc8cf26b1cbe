/*!
 * CPU Registers
 * Live execution state of the single simulated CPU
 */

use crate::core::types::{ProcessId, Tick};
use crate::process::ProcessContext;

/// CPU register file
///
/// While a process is active its program counter and context live here; the
/// process table entry holds stale copies until the next switch-out.
#[derive(Debug, Default)]
pub struct Cpu {
    pub(crate) tick: Tick,
    pub(crate) active: Option<ProcessId>,
    pub(crate) program_counter: usize,
    pub(crate) remaining_quantum: u32,
    pub(crate) context: Option<ProcessContext>,
    pub(crate) halted: bool,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Active process, `None` before the first dispatch
    #[inline(always)]
    pub fn active(&self) -> Option<ProcessId> {
        self.active
    }

    #[inline(always)]
    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    #[inline(always)]
    pub fn remaining_quantum(&self) -> u32 {
        self.remaining_quantum
    }

    #[inline(always)]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Context of the active process
    pub fn context(&self) -> Option<&ProcessContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut ProcessContext> {
        self.context.as_mut()
    }

    /// Move simulated time forward by one tick
    pub fn advance(&mut self) -> Tick {
        self.tick += 1;
        self.tick
    }

    pub fn set_program_counter(&mut self, pc: usize) {
        self.program_counter = pc;
    }

    /// Burn one tick of quantum; true when the quantum is used up
    pub fn consume_quantum(&mut self) -> bool {
        self.remaining_quantum = self.remaining_quantum.saturating_sub(1);
        self.remaining_quantum == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_cpu_has_no_active_process() {
        let cpu = Cpu::new();
        assert_eq!(cpu.active(), None);
        assert_eq!(cpu.tick(), 0);
        assert!(!cpu.is_halted());
        assert!(cpu.context().is_none());
    }

    #[test]
    fn test_consume_quantum_saturates() {
        let mut cpu = Cpu::new();
        cpu.remaining_quantum = 2;
        assert!(!cpu.consume_quantum());
        assert!(cpu.consume_quantum());
        assert!(cpu.consume_quantum());
        assert_eq!(cpu.remaining_quantum(), 0);
    }
}
