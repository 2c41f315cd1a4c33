//! Platform-agnostic application bootstrap for the zone console.
//!
//! Provides `AppState` (collaborator container), `AppStateBuilder` (adapter
//! injection) and `AppConfig` (file-based settings).

pub mod adapters;
mod config;

use std::path::Path;
use std::sync::Arc;

use zone_console_core::error::CoreResult;
use zone_console_core::services::{ControllerContext, DomainDetailsController};
use zone_console_core::traits::{
    DomainStore, ErrorReporter, InMemoryDomainStore, InMemoryUserStore, Navigator, UserStore,
};
use zone_console_core::types::Domain;
use zone_console_core::ControllerConfig;

use adapters::{HistoryNavigator, LogErrorReporter};
pub use config::AppConfig;

/// Platform-agnostic application state.
///
/// Holds the shared `ControllerContext`. Every frontend constructs this once
/// at startup via `AppStateBuilder` and opens one controller per view.
pub struct AppState {
    /// Controller context (holds all collaborators)
    pub ctx: Arc<ControllerContext>,
}

impl AppState {
    /// Open the domain details view for a raw route parameter.
    ///
    /// Returns the controller even when loading fails; the failure has already
    /// gone to the error reporter and the controller stays unloaded.
    pub async fn open_domain_details(&self, route_param: &str) -> DomainDetailsController {
        let mut controller = DomainDetailsController::new(Arc::clone(&self.ctx));
        if controller.init(route_param).await.is_err() {
            log::debug!("Domain details view for {route_param:?} left unloaded");
        }
        controller
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Defaults
/// - `domain_store`: `InMemoryDomainStore` (seeded from `seed_domains`)
/// - `user_store`: `InMemoryUserStore` with no signed-in user
/// - `error_reporter`: `LogErrorReporter`
/// - `navigator`: `HistoryNavigator`
pub struct AppStateBuilder {
    domain_store: Option<Arc<dyn DomainStore>>,
    user_store: Option<Arc<dyn UserStore>>,
    error_reporter: Option<Arc<dyn ErrorReporter>>,
    navigator: Option<Arc<dyn Navigator>>,
    config: ControllerConfig,
    seed: Vec<Domain>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            domain_store: None,
            user_store: None,
            error_reporter: None,
            navigator: None,
            config: ControllerConfig::default(),
            seed: Vec::new(),
        }
    }

    /// Start from a loaded configuration, seeding the default store.
    ///
    /// `base` resolves a relative seed file path.
    pub fn from_config(config: &AppConfig, base: &Path) -> CoreResult<Self> {
        let seed = config.load_seed_domains(base)?;
        Ok(Self::new()
            .controller_config(config.controller.clone())
            .seed_domains(seed))
    }

    #[must_use]
    pub fn domain_store(mut self, store: Arc<dyn DomainStore>) -> Self {
        self.domain_store = Some(store);
        self
    }

    #[must_use]
    pub fn user_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.user_store = Some(store);
        self
    }

    #[must_use]
    pub fn error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.error_reporter = Some(reporter);
        self
    }

    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    #[must_use]
    pub fn controller_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Domains for the default in-memory store; ignored when a store is injected
    #[must_use]
    pub fn seed_domains(mut self, domains: Vec<Domain>) -> Self {
        self.seed = domains;
        self
    }

    /// Build the `AppState`.
    #[must_use]
    pub fn build(self) -> AppState {
        let seed = self.seed;
        let domain_store = self.domain_store.unwrap_or_else(|| {
            log::debug!("Using in-memory domain store with {} domains", seed.len());
            Arc::new(InMemoryDomainStore::with_domains(seed))
        });
        let user_store = self
            .user_store
            .unwrap_or_else(|| Arc::new(InMemoryUserStore::new()));
        let error_reporter = self
            .error_reporter
            .unwrap_or_else(|| Arc::new(LogErrorReporter));
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(HistoryNavigator::default()));

        let ctx = ControllerContext::new(domain_store, user_store, error_reporter, navigator)
            .with_config(self.config);

        AppState { ctx: Arc::new(ctx) }
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
