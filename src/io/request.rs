/*!
 * Read Requests
 * One pending blocking-read operation
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};

/// Blocking token read issued by a process
///
/// `token` stays `None` until the disk resolves the request; a completed
/// request that still has no token means end-of-file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReadTokenRequest {
    pub process_id: Pid,
    pub token_number: usize,
    pub target_variable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub file_name: String,
}

impl ReadTokenRequest {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        token_number: usize,
        process_id: Pid,
        target_variable: impl Into<String>,
    ) -> Self {
        Self {
            process_id,
            token_number,
            target_variable: target_variable.into(),
            token: None,
            file_name: file_name.into(),
        }
    }

    /// Same request with a resolved payload
    #[must_use]
    pub fn completed(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}
