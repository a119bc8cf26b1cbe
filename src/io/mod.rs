/*!
 * I/O Module
 * Blocking read requests and the disk that serves them
 */

pub mod disk;
pub mod request;

pub use disk::{Disk, TokenDisk};
pub use request::ReadTokenRequest;
