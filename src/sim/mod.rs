/*!
 * Simulation Machine
 * CPU fetch/execute loop and disk polling around a kernel
 *
 * One instruction of the active process executes per tick. After each tick
 * the disk is polled and a finished request is delivered as an interrupt.
 */

use crate::core::errors::{KernelError, KernelResult, ProcessError, SchedulerError};
use crate::core::types::{ProcessId, Tick};
use crate::kernel::{Kernel, SimulationReport};
use crate::monitoring::span_simulation;
use crate::program::Instruction;
use tracing::{debug, info, warn};

/// What the CPU must do after executing one instruction
enum Effect<'a> {
    Next,
    Read {
        file: &'a str,
        token: usize,
        target: &'a str,
    },
    Yield,
}

/// Simulated machine: CPU loop plus disk, driving one kernel
pub struct Machine {
    kernel: Kernel,
    max_ticks: Tick,
    trace: Vec<ProcessId>,
    read_errors: Vec<ProcessError>,
}

impl Machine {
    pub fn new(kernel: Kernel, max_ticks: Tick) -> Self {
        Self {
            kernel,
            max_ticks,
            trace: Vec::new(),
            read_errors: Vec::new(),
        }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut Kernel {
        &mut self.kernel
    }

    pub fn into_kernel(self) -> Kernel {
        self.kernel
    }

    /// Process that executed each instruction, in order
    pub fn trace(&self) -> &[ProcessId] {
        &self.trace
    }

    /// Malformed read results reported by interrupts during the run
    pub fn read_errors(&self) -> &[ProcessError] {
        &self.read_errors
    }

    /// Run until nothing can execute and no I/O is outstanding
    pub fn run(&mut self) -> KernelResult<SimulationReport> {
        let span = span_simulation(self.kernel.policy().kind().as_str());
        let _entered = span.enter();

        if self.kernel.cpu().active().is_none() && !self.kernel.cpu().is_halted() {
            self.kernel.activate_scheduler()?;
        }

        while !self.kernel.is_finished() {
            if self.kernel.cpu().tick() >= self.max_ticks {
                warn!(max_ticks = self.max_ticks, "tick limit reached");
                return Err(KernelError::TickLimit(self.max_ticks));
            }
            self.step()?;
        }

        let report = self.kernel.report();
        info!(
            ticks = report.ticks,
            average_turnaround = ?report.average_turnaround,
            maximal_starvation = report.maximal_starvation,
            "simulation finished"
        );
        Ok(report)
    }

    /// Execute one instruction (or idle one tick while halted), then poll the disk
    ///
    /// Fetching past the end of a program terminates it without using a tick.
    pub fn step(&mut self) -> KernelResult<()> {
        if self.kernel.cpu().is_halted() {
            self.kernel.cpu_mut().advance();
            return self.poll_disk();
        }

        let active = self
            .kernel
            .cpu()
            .active()
            .ok_or(SchedulerError::NoActiveProcess)?;
        let program = self
            .kernel
            .active_program()
            .ok_or(ProcessError::NotFound(active.raw()))?;
        let pc = self.kernel.cpu().program_counter();

        let Some(instruction) = program.fetch(pc) else {
            return self.kernel.process_terminated(None);
        };

        let effect = self.execute(instruction)?;
        self.trace.push(active);
        self.kernel.cpu_mut().advance();

        match effect {
            Ok(Effect::Next) => {
                self.kernel.cpu_mut().set_program_counter(pc + 1);
                if self.kernel.policy().is_preemptive()
                    && !active.is_idle()
                    && self.kernel.cpu_mut().consume_quantum()
                {
                    self.kernel.timeout_reached()?;
                }
            }
            Ok(Effect::Read {
                file,
                token,
                target,
            }) => self.kernel.read_token(file, token, active, target)?,
            Ok(Effect::Yield) => {
                // The idle process stays pinned at its only instruction
                if !active.is_idle() {
                    self.kernel.cpu_mut().set_program_counter(pc + 1);
                }
                self.kernel.timeout_reached()?;
            }
            Err(reason) => {
                let fault = ProcessError::ExecutionFault {
                    pid: active.raw(),
                    pc,
                    reason,
                };
                self.kernel.process_terminated(Some(&fault))?;
            }
        }

        self.poll_disk()
    }

    /// Apply one instruction to the loaded context
    ///
    /// The outer result is a kernel inconsistency; the inner one a process fault.
    fn execute<'a>(
        &mut self,
        instruction: &'a Instruction,
    ) -> KernelResult<Result<Effect<'a>, String>> {
        let context = self.kernel.cpu_mut().context_mut().ok_or_else(|| {
            ProcessError::InvalidState("active process has no loaded context".into())
        })?;
        let space = &mut context.address_space;

        let effect = match instruction {
            Instruction::Assign { target, value } => value.eval(space).map(|v| {
                space.set(target.as_str(), v);
                Effect::Next
            }),
            Instruction::Compute {
                target,
                lhs,
                op,
                rhs,
            } => lhs
                .eval(space)
                .and_then(|l| rhs.eval(space).and_then(|r| op.apply(l, r)))
                .map(|v| {
                    space.set(target.as_str(), v);
                    Effect::Next
                }),
            Instruction::Print(value) => value.eval(space).map(|v| {
                context.console.write_line(v.to_string());
                Effect::Next
            }),
            Instruction::Read {
                file,
                token,
                target,
            } => Ok(Effect::Read {
                file: file.as_str(),
                token: *token,
                target: target.as_str(),
            }),
            Instruction::Idle => Ok(Effect::Yield),
        };
        Ok(effect)
    }

    fn poll_disk(&mut self) -> KernelResult<()> {
        let now = self.kernel.cpu().tick();
        let Some(completed) = self.kernel.disk_mut().poll(now) else {
            return Ok(());
        };
        debug!(pid = completed.process_id, tick = now, "disk interrupt");

        match self.kernel.interrupt(completed) {
            Ok(()) => Ok(()),
            Err(KernelError::Process(err @ ProcessError::MalformedToken { .. })) => {
                self.read_errors.push(err);
                Ok(())
            }
            Err(other) => Err(other),
        }
    }
}
