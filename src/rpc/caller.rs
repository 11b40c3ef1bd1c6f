//! # RPC Caller
//!
//! Policy wrapper around one logical remote call. Every call made through an
//! [`RpcCaller`] gets the same cross-cutting treatment: a timeout, a progress
//! indicator, attempt counting, structured start/resolution logging, failure
//! classification, and retry of retryable failures within a configured
//! attempt budget.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pagebridge::config::CallConfig;
//! use pagebridge::rpc::{CallerHooks, ErrorDescription, RpcCaller};
//!
//! struct ContactScreen;
//!
//! impl CallerHooks for ContactScreen {
//!     type Output = Vec<String>;
//!
//!     fn on_success_result(&mut self, names: Vec<String>) {
//!         // hand the rows to the display
//!     }
//!
//!     fn show_error(&mut self, error: ErrorDescription) {
//!         // surface the text to the user
//!     }
//! }
//!
//! # async fn example(endpoint: pagebridge::rpc::RpcEndpoint) {
//! let config = CallConfig::builder().max_attempts(3).build().unwrap();
//! let mut caller = RpcCaller::new("ContactService", "listNames", config, ContactScreen);
//! caller
//!     .invoke(|| endpoint.call::<(), Vec<String>>("/contacts/names", &()))
//!     .await;
//! # }
//! ```

use crate::config::CallConfig;
use crate::rpc::callback::{AttemptOutcome, RpcCallback};
use crate::rpc::error::{CallFailure, ErrorDescription, ValidationFailure};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Process-wide caller id generator
static CALLER_IDS: AtomicU64 = AtomicU64::new(1);

/// Next caller id. Ids only disambiguate log lines, nothing orders on them.
pub fn next_caller_id() -> u64 {
    CALLER_IDS.fetch_add(1, Ordering::Relaxed)
}

/// Application-supplied contract for one kind of remote call.
///
/// Required methods deliver results and surface errors. Everything else has
/// a default: no-op policy and progress hooks, no local validation handling,
/// no special-error interception, timeout as the only retryable failure, and
/// English description text. Override the `*_error` family to localize.
pub trait CallerHooks {
    /// What a successful call produces.
    type Output;

    /// A call resolved successfully.
    fn on_success_result(&mut self, result: Self::Output);

    /// Surface a terminal failure to the user.
    fn show_error(&mut self, error: ErrorDescription);

    /// Caller-specific policy applied before every attempt.
    fn apply_policies(&mut self) {}

    /// An attempt is starting; show busy state.
    fn show_progress(&mut self) {}

    /// An attempt resolved; hide busy state.
    fn hide_progress(&mut self) {}

    /// Chance to handle a validation failure locally, e.g. by marking form
    /// fields. Return true when handled; the call then resolves quietly.
    fn on_validation_error(&mut self, _failure: &ValidationFailure) -> bool {
        false
    }

    /// Chance to intercept a cause out-of-band, e.g. redirecting to a login
    /// page on an expired session. Return true to suppress the generic path.
    fn handle_special_errors(&mut self, _cause: &CallFailure) -> bool {
        false
    }

    /// Which failures qualify for another attempt. Timeout only, unless
    /// widened here.
    fn is_failure_retryable(&self, cause: &CallFailure) -> bool {
        matches!(cause, CallFailure::Timeout)
    }

    fn no_response_error(&self) -> ErrorDescription {
        ErrorDescription::new("The server could not be reached.")
    }

    fn not_authorized_error(&self, status: u16) -> ErrorDescription {
        ErrorDescription::with_detail(
            "You are not authorized to perform this action.",
            format!("HTTP status {status}"),
        )
    }

    fn security_error(&self, message: &str) -> ErrorDescription {
        ErrorDescription::with_detail("The call was rejected for security reasons.", message)
    }

    fn token_error(&self, message: &str) -> ErrorDescription {
        ErrorDescription::with_detail("Your session token was rejected.", message)
    }

    fn timeout_error(&self) -> ErrorDescription {
        ErrorDescription::new("The server did not answer in time.")
    }

    fn incompatible_version_error(&self, client: &str, server: &str) -> ErrorDescription {
        ErrorDescription::with_detail(
            "The application is out of date, please reload.",
            format!("client version {client}, server version {server}"),
        )
    }

    fn general_rpc_error(&self, status: Option<u16>, detail: &str) -> ErrorDescription {
        match status {
            Some(code) => {
                ErrorDescription::with_detail("The call failed.", format!("HTTP status {code}"))
            }
            None => ErrorDescription::with_detail("The call failed.", detail),
        }
    }
}

/// Policy wrapper for one logical remote call.
///
/// Attempt counting is monotonic for the life of the caller: retries re-use
/// the same caller, and the same [`RpcCallback`], for every attempt.
pub struct RpcCaller<H> {
    hooks: H,
    service: String,
    method: String,
    caller_id: u64,
    attempts: u32,
    config: CallConfig,
}

impl<H: CallerHooks> RpcCaller<H> {
    /// Create a caller for `service.method` under the given policy.
    pub fn new(
        service: impl Into<String>,
        method: impl Into<String>,
        config: CallConfig,
        hooks: H,
    ) -> Self {
        Self {
            hooks,
            service: service.into(),
            method: method.into(),
            caller_id: next_caller_id(),
            attempts: 0,
            config,
        }
    }

    /// Run the call to resolution, retrying retryable failures while the
    /// attempt budget lasts.
    ///
    /// `call` is invoked once per attempt to produce the attempt's future;
    /// each attempt runs under the configured timeout, with expiry mapped to
    /// [`CallFailure::Timeout`]. Results and errors are delivered through
    /// the hooks, never returned.
    pub async fn invoke<F, Fut>(&mut self, mut call: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<H::Output, CallFailure>>,
    {
        let mut callback = RpcCallback::new();
        loop {
            let started = self.begin_attempt();
            let outcome = match tokio::time::timeout(self.config.timeout(), call()).await {
                Ok(Ok(result)) => {
                    callback.on_success(self, started.elapsed(), result);
                    AttemptOutcome::Resolved
                }
                Ok(Err(cause)) => callback.on_failure(self, started.elapsed(), cause),
                Err(_) => callback.on_failure(self, started.elapsed(), CallFailure::Timeout),
            };
            if outcome == AttemptOutcome::Resolved {
                return;
            }
        }
    }

    /// Apply per-attempt policy, count the attempt, and log its start.
    fn begin_attempt(&mut self) -> Instant {
        self.hooks.apply_policies();
        self.hooks.show_progress();
        self.attempts += 1;
        tracing::info!(
            "[RPC] {} {}.{}(): start{}",
            self.caller_id,
            self.service,
            self.method,
            self.descriptive_call_state()
        );
        Instant::now()
    }

    /// Whether `cause` earns another attempt: it must be retryable and the
    /// attempt budget must not be spent.
    pub fn is_another_attempt_allowed(&self, cause: &CallFailure) -> bool {
        self.hooks.is_failure_retryable(cause) && self.attempts < self.config.max_attempts()
    }

    /// Classify `cause` into a user-facing description.
    pub fn generate_error(&self, cause: &CallFailure) -> ErrorDescription {
        match cause {
            CallFailure::Status { code: 0 } => self.hooks.no_response_error(),
            CallFailure::Status { code } if *code == 401 || *code == 403 => {
                self.hooks.not_authorized_error(*code)
            }
            CallFailure::Status { code } => {
                self.hooks.general_rpc_error(Some(*code), &cause.to_string())
            }
            CallFailure::Timeout => self.hooks.timeout_error(),
            CallFailure::TokenRejected { message } => self.hooks.token_error(message),
            CallFailure::SecurityViolation { message } => self.hooks.security_error(message),
            CallFailure::IncompatibleVersion { client, server } => {
                self.hooks.incompatible_version_error(client, server)
            }
            CallFailure::Validation(_) | CallFailure::Other { .. } => {
                self.hooks.general_rpc_error(None, &cause.to_string())
            }
        }
    }

    /// Terminal failure path: one interception chance, then a visible error.
    ///
    /// Nothing is ever dropped silently; a failure that gets here either
    /// reports itself handled out-of-band or reaches `show_error`.
    pub fn on_unhandled_error(&mut self, cause: CallFailure) {
        if self.hooks.handle_special_errors(&cause) {
            tracing::debug!(
                "[RPC] {} {}.{}(): failure handled out of band",
                self.caller_id,
                self.service,
                self.method
            );
            return;
        }
        let error = self.generate_error(&cause);
        self.hooks.show_error(error);
    }

    /// `" (attempt N of M)"` when retries are configured, otherwise empty.
    /// Log readability only.
    pub fn descriptive_call_state(&self) -> String {
        if self.config.max_attempts() > 1 {
            format!(
                " (attempt {} of {})",
                self.attempts,
                self.config.max_attempts()
            )
        } else {
            String::new()
        }
    }

    /// Attempts started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// This caller's log id.
    pub fn caller_id(&self) -> u64 {
        self.caller_id
    }

    /// Service name, for logging.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Method name, for logging.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable access to the hooks.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    #[cfg(test)]
    pub(crate) fn set_attempts(&mut self, attempts: u32) {
        self.attempts = attempts;
    }
}
