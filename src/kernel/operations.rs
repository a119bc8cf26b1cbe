/*!
 * Kernel Operations
 * Process creation, CPU callbacks and disk interrupts
 */

use super::Kernel;
use crate::core::errors::{KernelResult, ProcessError, SchedulerError};
use crate::core::types::{Pid, ProcessId};
use crate::io::ReadTokenRequest;
use crate::program::Program;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

impl Kernel {
    /// Add a process and queue it; no scheduling decision is forced
    pub fn create_process(&mut self, name: impl Into<String>, program: Arc<Program>) -> Pid {
        let name = name.into();
        let now = self.cpu.tick;
        let pid = self.table.allocate(name.clone(), program, now);
        self.policy.add_process(ProcessId::User(pid));
        self.stats.processes_created += 1;

        info!(pid, name = %name, tick = now, "process created");
        pid
    }

    /// The active process finished its program or faulted
    ///
    /// Faults are logged; bookkeeping is identical either way.
    #[instrument(level = "debug", skip(self, fault))]
    pub fn process_terminated(&mut self, fault: Option<&ProcessError>) -> KernelResult<()> {
        let active = self.cpu.active.ok_or(SchedulerError::NoActiveProcess)?;
        if active.is_idle() {
            return Err(ProcessError::InvalidState("idle process cannot terminate".into()).into());
        }

        let now = self.cpu.tick;
        match fault {
            Some(err) => {
                self.stats.faults += 1;
                warn!(pid = %active, error = %err, "process terminated unexpectedly");
            }
            None => info!(pid = %active, tick = now, "process terminated"),
        }

        self.finish(active)?;
        self.activate_scheduler()
    }

    /// The active process used up its quantum (or idle yielded)
    pub fn timeout_reached(&mut self) -> KernelResult<()> {
        self.stats.timeouts += 1;
        debug!(active = ?self.cpu.active, tick = self.cpu.tick, "timeout reached");
        self.activate_scheduler()
    }

    /// Block `process` on a token read and hand the CPU to someone else
    #[instrument(level = "debug", skip(self))]
    pub fn read_token(
        &mut self,
        file_name: &str,
        token_number: usize,
        process: ProcessId,
        target_variable: &str,
    ) -> KernelResult<()> {
        let pid = ProcessId::from_raw(process.raw()).user().ok_or_else(|| {
            ProcessError::InvalidState("idle process cannot issue reads".into())
        })?;
        let now = self.cpu.tick;
        let request = ReadTokenRequest::new(file_name, token_number, pid, target_variable);

        let entry = self.table.entry_mut(process)?;
        entry.blocked = true;

        if self.disk.is_idle() {
            self.disk.submit(request, now);
        } else {
            debug!(pid, queued = self.pending.len() + 1, "disk busy, request queued");
            self.pending.push_back(request);
        }

        // Resume after the read once unblocked
        if self.cpu.active == Some(process) {
            self.cpu.program_counter += 1;
        } else {
            entry.program_counter += 1;
        }

        self.stats.reads_issued += 1;
        self.activate_scheduler()
    }

    /// Disk completion for `request`
    ///
    /// A missing token stores NaN (end-of-file). A token that is not a number
    /// aborts the owning process and is returned as an error once the disk
    /// queue has been advanced.
    #[instrument(level = "debug", skip(self, request), fields(pid = request.process_id))]
    pub fn interrupt(&mut self, request: ReadTokenRequest) -> KernelResult<()> {
        let now = self.cpu.tick;
        let process = ProcessId::from_raw(request.process_id);
        if process.is_idle() {
            return Err(ProcessError::InvalidState(
                "read completion addressed to the idle process".into(),
            )
            .into());
        }
        self.stats.interrupts += 1;

        let value = match request.token.as_deref() {
            None => Ok(f64::NAN),
            Some(token) => token.trim().parse::<f64>().map_err(|_| ProcessError::MalformedToken {
                pid: request.process_id,
                variable: request.target_variable.clone(),
                token: token.to_string(),
            }),
        };

        let failure = match value {
            Ok(value) => {
                self.context_mut(process)?
                    .address_space
                    .set(request.target_variable.as_str(), value);
                debug!(variable = %request.target_variable, value, "read completed");
                None
            }
            Err(err) => {
                error!(error = %err, "aborting process on malformed read result");
                self.stats.aborted += 1;
                self.finish(process)?;
                Some(err)
            }
        };

        let entry = self.table.entry_mut(process)?;
        entry.blocked = false;
        entry.out_of_block = now;
        if !entry.done {
            self.policy.add_process(process);
        }

        if self.disk.is_idle() {
            if let Some(next) = self.pending.pop_front() {
                self.disk.submit(next, now);
            }
        }

        if self.policy.reschedule_after_interrupt() {
            self.activate_scheduler()?;
        }

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Mark `process` done, stamp its end time and close its console
    fn finish(&mut self, process: ProcessId) -> KernelResult<()> {
        let now = self.cpu.tick;
        let entry = self.table.entry_mut(process)?;
        entry.done = true;
        entry.end_time = Some(now);
        self.context_mut(process)?.console.close();
        Ok(())
    }
}
