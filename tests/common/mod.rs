//! Common test utilities
//!
//! Recording doubles shared by the integration tests: a display surface that
//! journals every push it receives, and caller hooks that journal results,
//! errors, and progress transitions.

#![allow(dead_code)]

use pagebridge::binding::{DisplaySurface, VisibleRange};
use pagebridge::rpc::{CallerHooks, ErrorDescription, ValidationFailure};

/// Display double that records everything pushed at it, in order.
pub struct RecordingDisplay<T> {
    pub range: VisibleRange,
    pub rows: Vec<(u64, Vec<T>)>,
    pub counts: Vec<(u64, bool)>,
    pub deselected: Vec<T>,
    pub events: Vec<&'static str>,
}

impl<T> RecordingDisplay<T> {
    pub fn at(start: u64, length: u64) -> Self {
        Self {
            range: VisibleRange::new(start, length),
            rows: Vec::new(),
            counts: Vec::new(),
            deselected: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl<T: Clone> DisplaySurface<T> for RecordingDisplay<T> {
    fn visible_range(&self) -> VisibleRange {
        self.range
    }

    fn set_row_data(&mut self, start: u64, rows: Vec<T>) {
        self.events.push("row_data");
        self.rows.push((start, rows));
    }

    fn set_row_count(&mut self, count: u64, exact: bool) {
        self.events.push("row_count");
        self.counts.push((count, exact));
    }

    fn set_visible_range_and_clear(&mut self, range: VisibleRange) {
        self.events.push("range_reset");
        self.range = range;
    }

    fn set_selected(&mut self, row: &T, selected: bool) {
        if !selected {
            self.deselected.push(row.clone());
        }
    }
}

/// Caller hooks double journaling every delivery.
pub struct RecordingHooks<T> {
    pub results: Vec<T>,
    pub errors: Vec<ErrorDescription>,
    pub progress: Vec<&'static str>,
    pub validation_failures: Vec<ValidationFailure>,
    pub handle_validation: bool,
}

impl<T> Default for RecordingHooks<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            errors: Vec::new(),
            progress: Vec::new(),
            validation_failures: Vec::new(),
            handle_validation: false,
        }
    }
}

impl<T> CallerHooks for RecordingHooks<T> {
    type Output = T;

    fn on_success_result(&mut self, result: T) {
        self.results.push(result);
    }

    fn show_error(&mut self, error: ErrorDescription) {
        self.errors.push(error);
    }

    fn show_progress(&mut self) {
        self.progress.push("show");
    }

    fn hide_progress(&mut self) {
        self.progress.push("hide");
    }

    fn on_validation_error(&mut self, failure: &ValidationFailure) -> bool {
        self.validation_failures.push(failure.clone());
        self.handle_validation
    }
}
