//! # Data Source
//!
//! Bridges a display's visible window into backend page fetches and pushes
//! the results back at the display.
//!
//! ## Features
//!
//! - **Window Translation**: Converts a visible-range start row into a 1-based page request
//! - **Fetch Suppression**: At most one backend fetch in flight per source
//! - **Result Application**: Pushes row data, then row count, then owns the returned paging state
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pagebridge::binding::{DataSource, PageLoader};
//! use pagebridge::pagination::Pagination;
//!
//! struct ContactLoader;
//!
//! impl PageLoader<String> for ContactLoader {
//!     fn request_page(&mut self, start: u64, pagination: &Pagination) {
//!         // Kick off the backend query for this window. Its completion path
//!         // calls `apply_results` or `mark_retrieve_complete` on the source.
//!     }
//! }
//!
//! let mut source = DataSource::new(25, ContactLoader);
//! ```

use crate::binding::display::{DisplaySurface, VisibleRange};
use crate::binding::provider::DataProvider;
use crate::pagination::{PaginatedResults, Pagination};
use std::marker::PhantomData;

/// Backend hook invoked when the source needs a page.
///
/// Implementations start an asynchronous backend query and return
/// immediately. Whatever handles the query's completion must call exactly one
/// of [`DataSource::apply_results`] or [`DataSource::mark_retrieve_complete`],
/// otherwise the source stays fetch-active and suppresses all further
/// requests. Failure handling belongs to the RPC layer, not here.
pub trait PageLoader<T> {
    /// Start retrieving the window beginning at zero-based row `start`.
    fn request_page(&mut self, start: u64, pagination: &Pagination);
}

/// Mediator between one display and one asynchronous paginated backend.
///
/// Owns the paging state and a fetch-active flag. The flag is a plain bool:
/// everything here runs as event handlers on one logical thread, with
/// suspension only at the async call boundary, so no interleaving can occur
/// between checking and setting it.
#[derive(Debug)]
pub struct DataSource<T, L> {
    pagination: Pagination,
    loader: L,
    retrieve_active: bool,
    _rows: PhantomData<fn(T)>,
}

impl<T, L: PageLoader<T>> DataSource<T, L> {
    /// Create a source fetching `page_size` rows per page through `loader`.
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    pub fn new(page_size: u64, loader: L) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            loader,
            retrieve_active: false,
            _rows: PhantomData,
        }
    }

    /// Wrap this source in its range-change adapter.
    pub fn into_provider(self) -> DataProvider<T, L> {
        DataProvider::new(self)
    }

    /// React to a change of the display's visible window.
    ///
    /// Derives the page containing the window's first row and requests it
    /// from the loader. If a fetch is already active the request is dropped,
    /// not queued: the underlying display machinery is expected to re-fire a
    /// range change once it reacts to the in-flight fetch's results.
    pub fn update_display(&mut self, display: &impl DisplaySurface<T>) {
        let start = display.visible_range().start;
        let page_number = self.pagination.page_for_offset(start);
        if self.retrieve_active {
            tracing::debug!(
                "[DATASOURCE] fetch active, dropping range change at row {} (page {})",
                start,
                page_number
            );
            return;
        }
        self.retrieve_active = true;
        let pagination = self.pagination.page(page_number);
        tracing::debug!(
            "[DATASOURCE] requesting page {} ({} rows from row {})",
            page_number,
            pagination.page_size(),
            start
        );
        self.loader.request_page(start, &pagination);
    }

    /// Apply a completed fetch to the display.
    ///
    /// Clears the fetch-active flag, adopts the paging state the backend
    /// answered with, deselects the incoming rows, then pushes row data and
    /// row count. Row count must go after row data: some table widgets
    /// repaint a stale window when the count changes first.
    pub fn apply_results(
        &mut self,
        display: &mut impl DisplaySurface<T>,
        start: u64,
        results: PaginatedResults<T>,
    ) {
        self.retrieve_active = false;
        let (rows, pagination) = results.into_parts();
        self.pagination = pagination;
        for row in &rows {
            display.set_selected(row, false);
        }
        display.set_row_data(start, rows);
        display.set_row_count(self.pagination.total_rows(), self.pagination.is_total_finalized());
    }

    /// Clear the fetch-active flag without touching the display.
    ///
    /// The completion path for fetches that produced no applicable results,
    /// such as a failed RPC whose error the call layer already surfaced.
    pub fn mark_retrieve_complete(&mut self) {
        self.retrieve_active = false;
    }

    /// Reset paging and force a re-fetch of page 1.
    ///
    /// Replaces the owned paging state with a fresh one at the same page size
    /// and moves the display's window back to `[0, page_size)`. The display's
    /// next range-change event triggers the actual fetch.
    pub fn clear(&mut self, display: &mut impl DisplaySurface<T>) {
        self.pagination = Pagination::new(self.pagination.page_size());
        display.set_visible_range_and_clear(VisibleRange::new(0, self.pagination.page_size()));
    }

    /// Current paging state.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Whether a backend fetch is in flight.
    pub fn is_retrieve_active(&self) -> bool {
        self.retrieve_active
    }

    /// The backend hook.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Mutable access to the backend hook.
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }
}
