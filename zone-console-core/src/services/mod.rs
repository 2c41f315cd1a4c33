//! Controller layer

mod domain_details;

pub use domain_details::{CommitOutcome, DomainDetailsController, LoadState};

use std::sync::Arc;

use crate::config::ControllerConfig;
use crate::traits::{DomainStore, ErrorReporter, Navigator, UserStore};

/// Collaborators shared by every controller
///
/// The hosting platform builds one and injects its own implementations.
pub struct ControllerContext {
    /// Domain store
    pub domain_store: Arc<dyn DomainStore>,
    /// Session/user store
    pub user_store: Arc<dyn UserStore>,
    /// Global error channel
    pub error_reporter: Arc<dyn ErrorReporter>,
    /// Navigation
    pub navigator: Arc<dyn Navigator>,
    /// Behaviour settings
    pub config: ControllerConfig,
}

impl ControllerContext {
    /// Context with default settings
    #[must_use]
    pub fn new(
        domain_store: Arc<dyn DomainStore>,
        user_store: Arc<dyn UserStore>,
        error_reporter: Arc<dyn ErrorReporter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            domain_store,
            user_store,
            error_reporter,
            navigator,
            config: ControllerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }
}
