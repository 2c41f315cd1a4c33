//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::{DomainId, RecordKey, ValidationMessages};

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Route parameter is not a valid domain identifier
    #[error("Invalid domain identifier.")]
    InvalidIdentifier(String),

    /// Domain not found in the store
    #[error("Domain not found: {0}")]
    DomainNotFound(DomainId),

    /// Record not found in the loaded domain
    #[error("Record not found: {0}")]
    RecordNotFound(RecordKey),

    /// A required manager failed to load its items
    #[error("Failed to load {manager}: {message}")]
    ManagerLoad { manager: String, message: String },

    /// Validation error reported by the store (structured, supports field level errors)
    #[error("{0}")]
    Validation(ValidationMessages),

    /// Record was generated by the system and cannot be edited or deleted
    #[error("Record is system-generated: {0}")]
    RecordAutogenerated(RecordKey),

    /// Operation needs a loaded domain
    #[error("Domain not loaded")]
    NotLoaded,

    /// Another domain-level action is already in progress
    #[error("Another action is already in progress")]
    ActionInProgress,

    /// Confirmation without the matching action being active
    #[error("No matching action in progress")]
    NoActiveAction,

    /// Commit without an edit session
    #[error("No record is being edited")]
    NotEditing,

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidIdentifier(_)
            | Self::DomainNotFound(_)
            | Self::RecordNotFound(_)
            | Self::Validation(_)
            | Self::RecordAutogenerated(_)
            | Self::NotLoaded
            | Self::ActionInProgress
            | Self::NoActiveAction
            | Self::NotEditing => true,
            Self::ManagerLoad { .. }
            | Self::StorageError(_)
            | Self::NetworkError(_)
            | Self::ConfigError(_) => false,
        }
    }

    /// Message shown inline next to the form that triggered the error.
    ///
    /// Validation errors are flattened into `field: message` lines.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Validation(messages) => messages.to_display_string(),
            other => other.to_string(),
        }
    }

    /// Build a validation error from a raw store payload.
    pub fn validation(raw: &str) -> Self {
        Self::Validation(ValidationMessages::parse(raw))
    }

    pub(crate) fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
