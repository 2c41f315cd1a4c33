//! Collaborator abstraction trait definitions

mod domain_store;
mod error_reporter;
mod manager;
mod navigator;
mod user_store;

pub use domain_store::{DomainStore, InMemoryDomainStore};
pub use error_reporter::ErrorReporter;
pub use manager::{load_managers, Manager};
pub use navigator::Navigator;
pub use user_store::{InMemoryUserStore, UserStore};
