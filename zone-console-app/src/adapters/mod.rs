//! Default collaborator adapters for hosts that bring none of their own.

mod history_navigator;
mod log_error_reporter;

pub use history_navigator::HistoryNavigator;
pub use log_error_reporter::LogErrorReporter;
