//! RPC call layer: uniform policy, classification, and retry for remote calls.
//!
//! An [`RpcCaller`] wraps one logical call with timeout, progress, logging,
//! and attempt accounting; an [`RpcCallback`] resolves each attempt; the
//! failure taxonomy in [`error`] keeps classification closed; and
//! [`RpcEndpoint`] is the HTTP transport that produces those failures.

pub mod callback;
pub mod caller;
pub mod error;
pub mod transport;

// Re-export the call surface
pub use callback::{AttemptOutcome, RpcCallback};
pub use caller::{next_caller_id, CallerHooks, RpcCaller};
pub use error::{CallFailure, ErrorCategory, ErrorDescription, FieldError, ValidationFailure};
pub use transport::{RpcEndpoint, API_VERSION};
