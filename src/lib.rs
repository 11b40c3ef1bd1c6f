//! pagebridge - Main Library
//!
//! pagebridge binds windowed, table-style displays to asynchronous paginated
//! backends and wraps every remote call in a uniform policy layer.
//!
//! # Overview
//!
//! This library provides:
//! - Paging value objects shared between client and backend
//! - A data source that translates visible-range changes into page fetches
//! - A range-change adapter between displays and their data source
//! - An RPC caller applying timeout, logging, attempt counting, and retry
//! - A closed failure taxonomy with uniform classification
//! - An HTTP transport producing that taxonomy over reqwest
//!
//! # Module Structure
//!
//! - **`pagination`** - Paging state and result windows
//! - **`binding`** - DataSource, DataProvider, and the display boundary
//! - **`rpc`** - RpcCaller, RpcCallback, failure taxonomy, HTTP transport
//! - **`config`** - Call policy and endpoint configuration
//!
//! # Usage
//!
//! Bind a display to a backend page query:
//!
//! ```rust,no_run
//! use pagebridge::binding::{DataSource, PageLoader};
//! use pagebridge::pagination::Pagination;
//!
//! struct OrderLoader { /* channels to the fetch task */ }
//!
//! impl PageLoader<String> for OrderLoader {
//!     fn request_page(&mut self, start: u64, pagination: &Pagination) {
//!         // start the backend query; completion applies results to the source
//!     }
//! }
//!
//! let provider = DataSource::new(25, OrderLoader {}).into_provider();
//! // wire provider.on_range_changed(..) to the display's range-change event
//! ```
//!
//! Run a remote call under policy:
//!
//! ```rust,no_run
//! # use pagebridge::config::{CallConfig, EndpointConfig};
//! # use pagebridge::rpc::{CallerHooks, ErrorDescription, RpcCaller, RpcEndpoint};
//! # struct Screen;
//! # impl CallerHooks for Screen {
//! #     type Output = Vec<String>;
//! #     fn on_success_result(&mut self, _result: Vec<String>) {}
//! #     fn show_error(&mut self, _error: ErrorDescription) {}
//! # }
//! # async fn example() {
//! let endpoint = RpcEndpoint::new(EndpointConfig::default());
//! let config = CallConfig::builder().max_attempts(3).build().unwrap();
//! let mut caller = RpcCaller::new("OrderService", "listOrders", config, Screen);
//! caller.invoke(|| endpoint.call("/orders/list", &())).await;
//! # }
//! ```
//!
//! # Concurrency
//!
//! The binding layer is written for the single-threaded, callback-driven
//! model of UI event loops: no locks, suspension only at the async call
//! boundary. The fetch-active flag in `DataSource` is a plain bool for that
//! reason. The RPC layer is plain async and runs on any tokio runtime.
//!
//! # Error Handling
//!
//! The library uses Rust's standard error handling:
//!
//! - `Result<T, E>` for fallible operations
//! - A closed `CallFailure` cause set at the call boundary
//! - Custom error types in `rpc::error` and `config`

/// Binding layer between displays and paginated backends
pub mod binding;

/// Call policy and endpoint configuration
pub mod config;

/// Paging value objects
pub mod pagination;

/// RPC call layer
pub mod rpc;
