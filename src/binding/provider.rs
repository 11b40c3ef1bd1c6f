//! Range-change adapter between a display and its data source.

use crate::binding::display::DisplaySurface;
use crate::binding::source::{DataSource, PageLoader};

/// Forwards a display's range-change events to its [`DataSource`].
///
/// Holds no state of its own. The 1:1 pairing with the source is expressed
/// by ownership: build one with [`DataSource::into_provider`] and hand its
/// `on_range_changed` to whatever event plumbing the display exposes.
#[derive(Debug)]
pub struct DataProvider<T, L> {
    source: DataSource<T, L>,
}

impl<T, L: PageLoader<T>> DataProvider<T, L> {
    /// Adapt `source` to display range-change events.
    pub fn new(source: DataSource<T, L>) -> Self {
        Self { source }
    }

    /// The display's visible window changed; delegate unconditionally.
    pub fn on_range_changed(&mut self, display: &impl DisplaySurface<T>) {
        self.source.update_display(display);
    }

    /// The wrapped source.
    pub fn source(&self) -> &DataSource<T, L> {
        &self.source
    }

    /// Mutable access to the wrapped source, for result application.
    pub fn source_mut(&mut self) -> &mut DataSource<T, L> {
        &mut self.source
    }

    /// Unwrap the source.
    pub fn into_source(self) -> DataSource<T, L> {
        self.source
    }
}
