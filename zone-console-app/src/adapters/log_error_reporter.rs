//! Log-backed error channel

use zone_console_core::error::CoreError;
use zone_console_core::traits::ErrorReporter;

/// Writes reported errors to the log.
///
/// Expected failures (bad route, unknown domain) go out as warnings.
#[derive(Debug, Default)]
pub struct LogErrorReporter;

impl ErrorReporter for LogErrorReporter {
    fn raise_error(&self, error: &CoreError) {
        if error.is_expected() {
            log::warn!("View error: {}", error.display_message());
        } else {
            log::error!("View error: {}", error.display_message());
        }
    }
}
