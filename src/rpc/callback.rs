//! Terminal handler for one call attempt.
//!
//! An [`RpcCallback`] resolves each attempt of a logical call: success
//! delivers the result, failure either stops (handled validation), earns
//! another attempt, or escalates to the caller's unhandled-error path. One
//! callback value is reused across all retries of a call; it carries no
//! per-attempt state, so reuse is safe.

use crate::rpc::caller::{CallerHooks, RpcCaller};
use crate::rpc::error::CallFailure;
use std::time::Duration;

/// What the retry driver should do after an attempt resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The logical call is finished, successfully or not
    Resolved,
    /// Re-invoke with the same callback
    Retry,
}

/// Generic terminal handler, one per logical call, reused per attempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct RpcCallback;

impl RpcCallback {
    pub fn new() -> Self {
        Self
    }

    /// An attempt succeeded: hide progress, log, deliver.
    pub fn on_success<H: CallerHooks>(
        &mut self,
        caller: &mut RpcCaller<H>,
        elapsed: Duration,
        result: H::Output,
    ) {
        caller.hooks_mut().hide_progress();
        tracing::info!(
            "[RPC] {} {}.{}(): success after {} ms",
            caller.caller_id(),
            caller.service(),
            caller.method(),
            elapsed.as_millis()
        );
        caller.hooks_mut().on_success_result(result);
    }

    /// An attempt failed: hide progress, then resolve the failure.
    ///
    /// Validation failures get the local handling chance first. Everything
    /// unhandled goes through the retry gate, and past the budget to the
    /// caller's unhandled-error path.
    pub fn on_failure<H: CallerHooks>(
        &mut self,
        caller: &mut RpcCaller<H>,
        elapsed: Duration,
        cause: CallFailure,
    ) -> AttemptOutcome {
        caller.hooks_mut().hide_progress();
        if let CallFailure::Validation(failure) = &cause {
            let failure = failure.clone();
            if caller.hooks_mut().on_validation_error(&failure) {
                tracing::info!(
                    "[RPC] {} {}.{}(): validation error after {} ms",
                    caller.caller_id(),
                    caller.service(),
                    caller.method(),
                    elapsed.as_millis()
                );
                return AttemptOutcome::Resolved;
            }
            tracing::warn!(
                "[RPC] {} {}.{}(): unhandled validation error after {} ms: {}",
                caller.caller_id(),
                caller.service(),
                caller.method(),
                elapsed.as_millis(),
                failure
            );
        } else {
            tracing::warn!(
                "[RPC] {} {}.{}(): unhandled exception after {} ms: {}",
                caller.caller_id(),
                caller.service(),
                caller.method(),
                elapsed.as_millis(),
                cause
            );
        }
        if caller.is_another_attempt_allowed(&cause) {
            return AttemptOutcome::Retry;
        }
        caller.on_unhandled_error(cause);
        AttemptOutcome::Resolved
    }
}
