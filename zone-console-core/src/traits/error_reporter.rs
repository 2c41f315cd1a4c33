//! Global error channel

use crate::error::CoreError;

/// Receives errors that end the current view (bad route, failed load).
///
/// There is no recovery path after a report; the hosting page decides what to show.
pub trait ErrorReporter: Send + Sync {
    fn raise_error(&self, error: &CoreError);
}
