//! RPC Failure Taxonomy
//!
//! This module defines the closed set of causes a remote call can fail with,
//! their classification into user-facing categories, and the error
//! description object surfaced to the UI.
//!
//! # Error Categories
//!
//! - `CallFailure` - what actually went wrong at the call boundary
//! - `ErrorCategory` - the classification a failure routes to
//! - `ErrorDescription` - human-readable text (plus optional detail) shown to the user
//!
//! # Usage
//!
//! ```rust
//! use pagebridge::rpc::error::{CallFailure, ErrorCategory};
//!
//! let cause = CallFailure::status(403);
//! assert_eq!(cause.category(), ErrorCategory::NotAuthorized(403));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

/// Application-level validation failure reported by the backend.
///
/// Validation failures get a chance at local handling before the generic
/// error path runs; see
/// [`CallerHooks::on_validation_error`](crate::rpc::caller::CallerHooks::on_validation_error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Overall failure message
    pub message: String,
    /// Per-field messages, possibly empty
    pub field_errors: Vec<FieldError>,
}

impl ValidationFailure {
    /// Create a validation failure without field detail.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Attach a field-level message.
    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.field_errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Why a remote call failed.
///
/// The set is closed: transports and application code map whatever they hit
/// into one of these variants, and the call layer classifies from here. A
/// status code of zero means no response was received at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallFailure {
    /// HTTP status failure; code 0 = no response received
    #[error("HTTP status {code}")]
    Status {
        /// Status code, 0 when the request never got a response
        code: u16,
    },

    /// The call exceeded its configured timeout
    #[error("request timed out")]
    Timeout,

    /// The security token accompanying the call was rejected
    #[error("security token rejected: {message}")]
    TokenRejected {
        /// Human-readable error message
        message: String,
    },

    /// The call violated a server-side security rule
    #[error("security violation: {message}")]
    SecurityViolation {
        /// Human-readable error message
        message: String,
    },

    /// Client and server disagree on the service contract version
    #[error("incompatible service version: client {client}, server {server}")]
    IncompatibleVersion {
        /// Version this client speaks
        client: String,
        /// Version the server answered with
        server: String,
    },

    /// The backend rejected the request as invalid
    #[error("validation failed: {0}")]
    Validation(ValidationFailure),

    /// Anything else
    #[error("{message}")]
    Other {
        /// Human-readable error message
        message: String,
    },
}

impl CallFailure {
    /// Create a status failure.
    pub fn status(code: u16) -> Self {
        Self::Status { code }
    }

    /// Create a token-rejection failure.
    pub fn token_rejected(message: impl Into<String>) -> Self {
        Self::TokenRejected {
            message: message.into(),
        }
    }

    /// Create a security-violation failure.
    pub fn security(message: impl Into<String>) -> Self {
        Self::SecurityViolation {
            message: message.into(),
        }
    }

    /// Create a version-mismatch failure.
    pub fn incompatible(client: impl Into<String>, server: impl Into<String>) -> Self {
        Self::IncompatibleVersion {
            client: client.into(),
            server: server.into(),
        }
    }

    /// Create an uncategorized failure.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this failure.
    ///
    /// Status-code sub-matching: 0 means no response was received, 401 and
    /// 403 mean the caller is not authorized, anything else is a general RPC
    /// failure carrying its status.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Status { code: 0 } => ErrorCategory::NoResponse,
            Self::Status { code } if *code == 401 || *code == 403 => {
                ErrorCategory::NotAuthorized(*code)
            }
            Self::Status { code } => ErrorCategory::General(Some(*code)),
            Self::Timeout => ErrorCategory::Timeout,
            Self::TokenRejected { .. } => ErrorCategory::Token,
            Self::SecurityViolation { .. } => ErrorCategory::Security,
            Self::IncompatibleVersion { .. } => ErrorCategory::Incompatible,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Other { .. } => ErrorCategory::General(None),
        }
    }
}

/// Classification of a [`CallFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No response received from the server
    NoResponse,
    /// The server refused the call with the given status
    NotAuthorized(u16),
    /// Security rule violation
    Security,
    /// Security token rejected
    Token,
    /// Call timed out
    Timeout,
    /// Client/server contract mismatch
    Incompatible,
    /// Validation failure
    Validation,
    /// General RPC failure, with its status when one exists
    General(Option<u16>),
}

/// User-facing description of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescription {
    /// Text shown to the user
    pub text: String,
    /// Optional technical detail
    pub detail: Option<String>,
}

impl ErrorDescription {
    /// Create a description without technical detail.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detail: None,
        }
    }

    /// Create a description carrying technical detail.
    pub fn with_detail(text: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for ErrorDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({detail})", self.text),
            None => write!(f, "{}", self.text),
        }
    }
}
