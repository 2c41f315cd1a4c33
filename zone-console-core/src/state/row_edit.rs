//! Record row edit/delete state

use crate::error::{CoreError, CoreResult};
use crate::types::{DomainId, RecordFields, RecordKey, RecordUpdate, ResourceRecord};

/// An open edit on one record row.
///
/// `previous` holds the row's values at edit start; the presentation layer
/// writes into `draft`. The stored row is untouched until a commit succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    previous: RecordFields,
    /// Values being edited
    pub draft: RecordFields,
    dnsresource_id: u64,
    dnsdata_id: Option<u64>,
}

impl EditSession {
    /// `None` for system-generated rows
    fn from_row(row: &ResourceRecord) -> Option<Self> {
        let dnsresource_id = row.dnsresource_id?;
        let previous = row.fields();
        Some(Self {
            draft: previous.clone(),
            previous,
            dnsresource_id,
            dnsdata_id: row.dnsdata_id,
        })
    }

    /// Values captured when editing started
    pub fn previous(&self) -> &RecordFields {
        &self.previous
    }

    /// Key of the row being edited
    pub fn key(&self) -> RecordKey {
        self.previous.key()
    }

    /// Whether the draft differs from the captured values
    pub fn is_dirty(&self) -> bool {
        self.draft != self.previous
    }

    pub fn to_update(&self, domain_id: DomainId) -> RecordUpdate {
        RecordUpdate {
            domain_id,
            dnsresource_id: self.dnsresource_id,
            dnsdata_id: self.dnsdata_id,
            previous: self.previous.clone(),
            current: self.draft.clone(),
        }
    }
}

/// Row state of the record table; one value covers all rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowState {
    #[default]
    Idle,
    Editing(EditSession),
    /// Waiting for the user to confirm deletion
    Deleting(RecordKey),
}

/// Which row, if any, is being edited or deleted.
///
/// Editing one row and confirming deletion of another are mutually
/// exclusive; entering either mode drops the other.
#[derive(Debug, Default)]
pub struct RowEditor {
    state: RowState,
}

impl RowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RowState {
        &self.state
    }

    /// Open an edit session on `row`
    pub fn start_edit(&mut self, row: &ResourceRecord) -> CoreResult<()> {
        let session =
            EditSession::from_row(row).ok_or_else(|| CoreError::RecordAutogenerated(row.key()))?;
        self.state = RowState::Editing(session);
        Ok(())
    }

    /// Ask for confirmation before deleting `row`
    pub fn start_delete(&mut self, row: &ResourceRecord) -> CoreResult<()> {
        if row.is_autogenerated() {
            return Err(CoreError::RecordAutogenerated(row.key()));
        }
        self.state = RowState::Deleting(row.key());
        Ok(())
    }

    /// Back to idle, dropping any edit draft
    pub fn stop(&mut self) {
        self.state = RowState::Idle;
    }

    pub fn editing(&self) -> Option<&EditSession> {
        match &self.state {
            RowState::Editing(session) => Some(session),
            _ => None,
        }
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditSession> {
        match &mut self.state {
            RowState::Editing(session) => Some(session),
            _ => None,
        }
    }

    pub fn deleting(&self) -> Option<&RecordKey> {
        match &self.state {
            RowState::Deleting(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_editing(&self, key: &RecordKey) -> bool {
        self.editing().is_some_and(|s| &s.key() == key)
    }

    pub fn is_deleting(&self, key: &RecordKey) -> bool {
        self.deleting() == Some(key)
    }
}
