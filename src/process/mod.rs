/*!
 * Process Module
 * Process table entries, per-process context and the table container
 */

pub mod table;
pub mod types;

// Re-export for convenience
pub use table::ProcessTable;
pub use types::{AddressSpace, Console, ProcessContext, ProcessInfo, ProcessTableEntry};
