//! Types for the storage module.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Result of a single upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Object name the upload targeted.
    pub destination: String,
    /// Bytes sent.
    pub size_bytes: u64,
    /// Failure cause, if the upload did not succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn succeeded(destination: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            destination: destination.into(),
            size_bytes,
            error: None,
        }
    }

    pub fn failed(destination: impl Into<String>, cause: impl Display) -> Self {
        Self {
            destination: destination.into(),
            size_bytes: 0,
            error: Some(cause.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
