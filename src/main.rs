/*!
 * Scheduler Simulator - Main Entry Point
 *
 * Loads program files, runs them on the simulated kernel and prints the
 * per-process output followed by a JSON metrics report.
 *
 * Usage: scheduler-sim PROGRAM... (configuration via SCHED_* variables)
 */

use miette::{IntoDiagnostic, Result};
use scheduling_kernel::{
    init_tracing, Kernel, KernelConfig, KernelError, Machine, ProgramStore, TokenDisk,
};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let config = KernelConfig::from_env()?;
    info!(
        policy = config.policy.as_str(),
        quantum = config.quantum.ticks(),
        disk_latency = config.disk_latency,
        "configuration loaded"
    );

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return Err(KernelError::Configuration(
            "no programs given. Usage: scheduler-sim PROGRAM...".into(),
        )
        .into());
    }

    let mut disk = TokenDisk::new(config.disk_latency);
    if let Some(dir) = &config.data_dir {
        disk.load_dir(dir)?;
    }

    let mut kernel = Kernel::from_config(&config, Box::new(disk));
    let mut store = ProgramStore::new();
    for path in &paths {
        let program = store.load_file(path)?;
        kernel.create_process(path.as_str(), program);
    }

    let mut machine = Machine::new(kernel, config.max_ticks);
    let report = machine.run()?;

    let kernel = machine.kernel();
    for entry in kernel.table().user_entries() {
        if let Some(console) = kernel.console(entry.id) {
            for line in console.lines() {
                println!("[{} {}] {}", entry.id, entry.name, line);
            }
        }
    }
    for err in machine.read_errors() {
        eprintln!("{:?}", miette::Report::new(err.clone()));
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&report).into_diagnostic()?
    );
    Ok(())
}
