//! Zone Console Core Library
//!
//! Controller logic for the domain details page of a fleet-management UI:
//! - Domain loading by route identifier
//! - Record row edit/delete state machine and store synchronization
//! - Domain-level actions (delete domain, add record)
//!
//! This library is renderer-independent, reaching its collaborators (domain
//! store, user store, error channel, navigation) only through traits.

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::ControllerConfig;
pub use error::{CoreError, CoreResult};
pub use services::{ControllerContext, DomainDetailsController};
pub use traits::{DomainStore, ErrorReporter, Manager, Navigator, UserStore};
