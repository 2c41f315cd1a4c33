//! Domain-level action state

use crate::error::{CoreError, CoreResult};
use crate::types::NewRecord;

/// Action started from the domain page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainAction {
    /// Waiting for the user to confirm deleting the domain
    DeleteDomain,
    /// Adding a record; holds the form draft
    AddRecord(NewRecord),
}

/// At most one domain-level action at a time.
///
/// An action is "in progress" from the moment it starts until it is
/// cancelled or completes; a failed confirmation leaves it in progress.
#[derive(Debug, Default)]
pub struct ActionState {
    current: Option<DomainAction>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&DomainAction> {
        self.current.as_ref()
    }

    pub fn in_progress(&self) -> bool {
        self.current.is_some()
    }

    pub fn start(&mut self, action: DomainAction) -> CoreResult<()> {
        if self.current.is_some() {
            return Err(CoreError::ActionInProgress);
        }
        self.current = Some(action);
        Ok(())
    }

    /// Full reset, used for both cancel and completion
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_deleting_domain(&self) -> bool {
        matches!(self.current, Some(DomainAction::DeleteDomain))
    }

    pub fn new_record(&self) -> Option<&NewRecord> {
        match &self.current {
            Some(DomainAction::AddRecord(record)) => Some(record),
            _ => None,
        }
    }

    pub fn new_record_mut(&mut self) -> Option<&mut NewRecord> {
        match &mut self.current {
            Some(DomainAction::AddRecord(record)) => Some(record),
            _ => None,
        }
    }
}
