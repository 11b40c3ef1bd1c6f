//! # Pagination
//!
//! Value objects describing one page of a windowed query and the results a
//! backend answered it with.
//!
//! ## Features
//!
//! - **Immutable Paging State**: Paging changes produce a new value, never a mutation
//! - **Estimated Totals**: Row counts may be estimates until the backend finalizes them
//! - **Window Math**: Conversions between zero-based row offsets and 1-based page numbers
//!
//! ## Usage
//!
//! ```rust
//! use pagebridge::pagination::Pagination;
//!
//! let pagination = Pagination::new(25);
//! assert_eq!(pagination.page_number(), 1);
//!
//! // Move to page 3 without touching the original value
//! let third = pagination.page(3);
//! assert_eq!(third.offset(), 50);
//! assert_eq!(pagination.page_number(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Paging state for a single windowed query.
///
/// A `Pagination` is immutable per request: moving to another page or
/// recording a row count yields a new value. Page numbers are 1-based,
/// row offsets are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Rows per page, always positive
    page_size: u64,
    /// Current page, 1-based
    page_number: u64,
    /// Total row count, possibly an estimate
    total_rows: u64,
    /// True once the backend has returned an exact count
    total_finalized: bool,
}

impl Pagination {
    /// Create paging state for page 1 with an unknown total.
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    pub fn new(page_size: u64) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            page_size,
            page_number: 1,
            total_rows: 0,
            total_finalized: false,
        }
    }

    /// Return a new value positioned on `page_number`.
    ///
    /// Page numbers below 1 are clamped to 1.
    pub fn page(&self, page_number: u64) -> Self {
        Self {
            page_number: page_number.max(1),
            ..self.clone()
        }
    }

    /// Return a new value carrying a row count reported by the backend.
    pub fn with_total(&self, total_rows: u64, finalized: bool) -> Self {
        Self {
            total_rows,
            total_finalized: finalized,
            ..self.clone()
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Current page, 1-based.
    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    /// Total row count. An estimate until [`is_total_finalized`](Self::is_total_finalized) is true.
    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// Whether the backend has returned an exact row count.
    pub fn is_total_finalized(&self) -> bool {
        self.total_finalized
    }

    /// Zero-based offset of this page's first row.
    pub fn offset(&self) -> u64 {
        (self.page_number - 1) * self.page_size
    }

    /// Page containing the zero-based row offset `start`.
    pub fn page_for_offset(&self, start: u64) -> u64 {
        (start + 1) / self.page_size + 1
    }
}

/// One window of rows together with the paging state the backend answered with.
///
/// The embedded [`Pagination`] is authoritative: it carries the row count the
/// backend knows, which may correct the count the request was issued with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResults<T> {
    rows: Vec<T>,
    pagination: Pagination,
}

impl<T> PaginatedResults<T> {
    /// Bundle a result window with its paging state.
    pub fn new(rows: Vec<T>, pagination: Pagination) -> Self {
        Self { rows, pagination }
    }

    /// Rows in this window.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Paging state reported by the backend.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Number of rows in this window.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Split into rows and paging state.
    pub fn into_parts(self) -> (Vec<T>, Pagination) {
        (self.rows, self.pagination)
    }
}
