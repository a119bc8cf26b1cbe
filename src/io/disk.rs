/*!
 * Disk
 * Single-request token disk raising completions after a fixed latency
 */

use super::request::ReadTokenRequest;
use crate::core::errors::KernelResult;
use crate::core::types::Tick;
use ahash::AHashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Disk collaborator contract
///
/// The disk serves at most one request at a time. Completions are collected by
/// whoever drives simulated time and delivered to the kernel as interrupts.
pub trait Disk: Send {
    /// No request in flight
    fn is_idle(&self) -> bool;

    /// Start serving `request`; only valid while idle
    fn submit(&mut self, request: ReadTokenRequest, now: Tick);

    /// Completed request, if the one in flight is done at `now`
    fn poll(&mut self, now: Tick) -> Option<ReadTokenRequest>;

    /// Request currently in flight
    fn active_request(&self) -> Option<&ReadTokenRequest>;
}

#[derive(Debug)]
struct InFlight {
    request: ReadTokenRequest,
    ready_at: Tick,
}

/// In-memory disk of whitespace-separated token files
#[derive(Debug)]
pub struct TokenDisk {
    files: AHashMap<String, Vec<String>>,
    latency: Tick,
    in_flight: Option<InFlight>,
    served: u64,
}

impl TokenDisk {
    pub fn new(latency: Tick) -> Self {
        Self {
            files: AHashMap::new(),
            latency,
            in_flight: None,
            served: 0,
        }
    }

    /// Add or replace a token file
    pub fn insert_file(&mut self, name: impl Into<String>, contents: &str) {
        let tokens = contents.split_whitespace().map(str::to_string).collect();
        self.files.insert(name.into(), tokens);
    }

    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, contents: &str) -> Self {
        self.insert_file(name, contents);
        self
    }

    /// Load every regular file in `dir`, keyed by file name
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> KernelResult<usize> {
        let mut loaded = 0;
        for entry in std::fs::read_dir(dir.as_ref())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let contents = std::fs::read_to_string(entry.path())?;
            self.insert_file(name, &contents);
            loaded += 1;
        }
        debug!(dir = %dir.as_ref().display(), loaded, "token files loaded");
        Ok(loaded)
    }

    /// Requests completed so far
    pub fn served(&self) -> u64 {
        self.served
    }

    fn resolve(&self, request: &ReadTokenRequest) -> Option<String> {
        match self.files.get(&request.file_name) {
            Some(tokens) => tokens.get(request.token_number).cloned(),
            None => {
                warn!(file = %request.file_name, "read from unknown token file, reporting end-of-file");
                None
            }
        }
    }
}

impl Disk for TokenDisk {
    fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    fn submit(&mut self, request: ReadTokenRequest, now: Tick) {
        debug_assert!(self.in_flight.is_none(), "disk already serving a request");
        debug!(
            pid = request.process_id,
            file = %request.file_name,
            token = request.token_number,
            "disk request started"
        );
        self.in_flight = Some(InFlight {
            request,
            ready_at: now + self.latency,
        });
    }

    fn poll(&mut self, now: Tick) -> Option<ReadTokenRequest> {
        if self.in_flight.as_ref()?.ready_at > now {
            return None;
        }
        let InFlight { request, .. } = self.in_flight.take()?;
        let token = self.resolve(&request);
        self.served += 1;
        Some(request.completed(token))
    }

    fn active_request(&self) -> Option<&ReadTokenRequest> {
        self.in_flight.as_ref().map(|f| &f.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_after_latency() {
        let mut disk = TokenDisk::new(2).with_file("nums.txt", "10 20\n30");
        disk.submit(ReadTokenRequest::new("nums.txt", 2, 1, "x"), 5);

        assert!(!disk.is_idle());
        assert_eq!(disk.poll(6), None);
        let done = disk.poll(7).unwrap();
        assert_eq!(done.token.as_deref(), Some("30"));
        assert!(disk.is_idle());
        assert_eq!(disk.served(), 1);
    }

    #[test]
    fn test_past_end_and_unknown_file_are_eof() {
        let mut disk = TokenDisk::new(0).with_file("nums.txt", "1");

        disk.submit(ReadTokenRequest::new("nums.txt", 1, 1, "x"), 0);
        assert_eq!(disk.poll(0).unwrap().token, None);

        disk.submit(ReadTokenRequest::new("missing.txt", 0, 1, "x"), 0);
        assert_eq!(disk.poll(0).unwrap().token, None);
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "1 2 3").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let mut disk = TokenDisk::new(1);
        assert_eq!(disk.load_dir(dir.path()).unwrap(), 1);

        disk.submit(ReadTokenRequest::new("a.txt", 1, 1, "x"), 0);
        assert_eq!(disk.poll(1).unwrap().token.as_deref(), Some("2"));
    }
}
