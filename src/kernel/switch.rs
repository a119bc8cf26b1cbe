/*!
 * Scheduling Decisions
 * Scheduler activation and context switching
 */

use super::Kernel;
use crate::core::errors::{KernelResult, ProcessError, SchedulerError};
use crate::core::types::ProcessId;
use crate::scheduler::Selection;
use tracing::{debug, info};

impl Kernel {
    /// Ask the policy who runs next and dispatch it
    pub fn activate_scheduler(&mut self) -> KernelResult<()> {
        match self.policy.next_process(&mut self.table) {
            Selection::Ready(pid) => self.context_switch(ProcessId::User(pid)),
            Selection::Idle => {
                self.check_liveness()?;
                if self.table.all_user_done() {
                    self.halt("only idle remains");
                    Ok(())
                } else {
                    self.context_switch(ProcessId::Idle)
                }
            }
            Selection::Exhausted => {
                self.check_liveness()?;
                match self.cpu.active {
                    // Quantum expired with nobody else ready: keep running
                    Some(active @ ProcessId::User(_))
                        if self.table.get(active).is_some_and(|e| e.is_runnable()) =>
                    {
                        self.context_switch(active)
                    }
                    _ => {
                        self.halt("all processes terminated or blocked");
                        Ok(())
                    }
                }
            }
        }
    }

    /// Every runnable user process other than the active one must be queued,
    /// so an empty ready structure means there are none.
    fn check_liveness(&self) -> Result<(), SchedulerError> {
        let active = self.cpu.active;
        match self
            .table
            .runnable_user_pids()
            .find(|pid| active != Some(ProcessId::User(*pid)))
        {
            Some(pid) => Err(SchedulerError::Stalled(pid)),
            None => Ok(()),
        }
    }

    fn halt(&mut self, reason: &str) {
        if !self.cpu.halted {
            info!(tick = self.cpu.tick, reason, "cpu halted");
        }
        self.cpu.halted = true;
    }

    /// Put `entering` on the CPU
    ///
    /// Three cases: the same process gets a fresh quantum only; a different
    /// process triggers save, starvation accounting and restore; an empty CPU
    /// just loads.
    fn context_switch(&mut self, entering: ProcessId) -> KernelResult<()> {
        let now = self.cpu.tick;
        let preemptive = self.policy.is_preemptive();
        self.cpu.halted = false;

        match self.cpu.active {
            Some(current) if current == entering => {
                if preemptive {
                    self.cpu.remaining_quantum = self.table.entry(entering)?.quantum;
                }
                debug!(pid = %entering, tick = now, "continuing active process");
                return Ok(());
            }
            Some(outgoing) => {
                let outgoing_entry = self.table.entry_mut(outgoing)?;
                outgoing_entry.record_starvation(now);

                let still_ready = !outgoing_entry.is_idle() && outgoing_entry.is_runnable();
                if still_ready {
                    outgoing_entry.out_of_block = now;
                }
                outgoing_entry.program_counter = self.cpu.program_counter;
                outgoing_entry.context = self.cpu.context.take();

                if still_ready {
                    self.policy.add_process(outgoing);
                    self.stats.preemptions += 1;
                }
                self.stats.context_switches += 1;
                debug!(from = %outgoing, to = %entering, tick = now, "context switch");
            }
            None => debug!(pid = %entering, tick = now, "first dispatch"),
        }

        let entering_entry = self.table.entry_mut(entering)?;
        let context = entering_entry.context.take().ok_or_else(|| {
            ProcessError::InvalidState(format!("process {} has no saved context", entering))
        })?;

        self.cpu.active = Some(entering);
        self.cpu.program_counter = entering_entry.program_counter;
        self.cpu.context = Some(context);
        if preemptive {
            self.cpu.remaining_quantum = entering_entry.quantum;
        }
        Ok(())
    }
}
