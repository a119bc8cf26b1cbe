/*!
 * Shared test helpers
 */

#![allow(dead_code)]

use scheduling_kernel::{
    Disk, Kernel, Machine, Pid, ProcessId, ProgramStore, ReadTokenRequest, SchedulingPolicy,
    Tick, TokenDisk,
};
use std::sync::{Arc, Mutex};

/// Build a machine running `programs` (name, source) in creation order
pub fn machine(
    policy: Box<dyn SchedulingPolicy>,
    disk: impl Disk + 'static,
    programs: &[(&str, &str)],
) -> Machine {
    let mut kernel = Kernel::new(policy, Box::new(disk));
    let mut store = ProgramStore::new();
    for (name, source) in programs {
        let program = store.register(name, source).expect("test program parses");
        kernel.create_process(*name, program);
    }
    Machine::new(kernel, 10_000)
}

/// Kernel with processes created but nothing dispatched yet
pub fn kernel(
    policy: Box<dyn SchedulingPolicy>,
    disk: TokenDisk,
    programs: &[(&str, &str)],
) -> Kernel {
    machine(policy, disk, programs).into_kernel()
}

/// Trace without idle ticks
pub fn user_trace(trace: &[ProcessId]) -> Vec<Pid> {
    trace.iter().filter_map(|id| id.user()).collect()
}

/// `n` copies of a one-tick instruction
pub fn straight_line(n: usize) -> String {
    (0..n).map(|i| format!("v{} = {}\n", i, i)).collect()
}

/// Disk wrapper that logs every submission
pub struct RecordingDisk {
    inner: TokenDisk,
    log: Arc<Mutex<Vec<(Pid, String)>>>,
}

impl RecordingDisk {
    pub fn new(inner: TokenDisk) -> (Self, Arc<Mutex<Vec<(Pid, String)>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                inner,
                log: Arc::clone(&log),
            },
            log,
        )
    }
}

impl Disk for RecordingDisk {
    fn is_idle(&self) -> bool {
        self.inner.is_idle()
    }

    fn submit(&mut self, request: ReadTokenRequest, now: Tick) {
        self.log
            .lock()
            .unwrap()
            .push((request.process_id, request.file_name.clone()));
        self.inner.submit(request, now);
    }

    fn poll(&mut self, now: Tick) -> Option<ReadTokenRequest> {
        self.inner.poll(now)
    }

    fn active_request(&self) -> Option<&ReadTokenRequest> {
        self.inner.active_request()
    }
}
