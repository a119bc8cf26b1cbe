/*!
 * Core Module
 * Fundamental kernel types and error handling
 */

pub mod errors;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use types::*;
