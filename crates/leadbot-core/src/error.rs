// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Leadbot.

use thiserror::Error;

/// The primary error type used across all Leadbot adapter traits and core operations.
#[derive(Debug, Error)]
pub enum LeadbotError {
    /// Configuration errors (missing token, malformed admin chat id).
    #[error("configuration error: {0}")]
    Config(String),

    /// User input rejected by a domain constructor.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Lead log errors (file creation, append, parse).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel adapter errors (connection failure, delivery failure, closed queue).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LeadbotError {
    /// Wraps any I/O-ish error as a storage error.
    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        LeadbotError::Storage { source: err.into() }
    }

    /// Returns true when the error means the channel will never yield again.
    pub fn is_channel_closed(&self) -> bool {
        matches!(self, LeadbotError::Channel { message, .. } if message.contains("closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field() {
        let err = LeadbotError::Validation {
            field: "contact".into(),
            message: "must not be empty".into(),
        };
        assert_eq!(err.to_string(), "invalid contact: must not be empty");
    }

    #[test]
    fn closed_channel_is_detected() {
        let err = LeadbotError::Channel {
            message: "inbound channel closed".into(),
            source: None,
        };
        assert!(err.is_channel_closed());

        let err = LeadbotError::Channel {
            message: "failed to send message".into(),
            source: None,
        };
        assert!(!err.is_channel_closed());
    }

    #[test]
    fn storage_helper_wraps_io_error() {
        let err = LeadbotError::storage(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "storage error: disk full");
    }
}
