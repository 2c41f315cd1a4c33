//! Domain details controller
//!
//! Owns the per-view state of one domain page: which domain is shown, the
//! record table sort, the row being edited or deleted, and the domain-level
//! action. Store calls are awaited and the resulting transition is applied
//! once they complete.

use std::sync::Arc;

use tokio::sync::watch;

use super::ControllerContext;
use crate::error::{CoreError, CoreResult};
use crate::state::{ActionState, DomainAction, RowEditor, RowState, SortKey, TableSort};
use crate::traits::{load_managers, Manager};
use crate::types::{
    Domain, DomainHandle, DomainId, DomainSummary, NewRecord, PageChrome, RecordDeletion,
    RecordFields, RecordKey, RecordType, ResourceRecord,
};

/// Whether the view has adopted a domain
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded(DomainHandle),
}

/// Result of committing an edit session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing changed, the store was not called
    Unchanged,
    /// The store accepted the new values
    Updated,
}

/// Controller behind the domain details page
pub struct DomainDetailsController {
    ctx: Arc<ControllerContext>,
    load: LoadState,
    chrome: PageChrome,
    editing_summary: bool,
    sort: TableSort,
    rows: RowEditor,
    action: ActionState,
    /// Displayable error for the current form
    error: Option<String>,
}

impl DomainDetailsController {
    #[must_use]
    pub fn new(ctx: Arc<ControllerContext>) -> Self {
        let config = &ctx.config;
        let chrome = PageChrome {
            title: config.loading_title.clone(),
            page: config.page.clone(),
        };
        let sort = TableSort::new(config.default_sort, config.reset_sort_direction_on_key_change);
        Self {
            ctx,
            load: LoadState::Unloaded,
            chrome,
            editing_summary: false,
            sort,
            rows: RowEditor::new(),
            action: ActionState::new(),
            error: None,
        }
    }

    // ===== Loading =====

    /// Resolve the route's domain identifier and adopt the domain.
    ///
    /// Failures are sent to the error reporter and leave the view unloaded.
    pub async fn init(&mut self, route_param: &str) -> CoreResult<()> {
        let result = self.load_domain(route_param).await;
        if let Err(e) = &result {
            e.log("Failed to load domain");
            self.ctx.error_reporter.raise_error(e);
        }
        result
    }

    async fn load_domain(&mut self, route_param: &str) -> CoreResult<()> {
        let requested = DomainId::parse(route_param)?;

        let managers: [&dyn Manager; 2] = [
            self.ctx.domain_store.as_ref(),
            self.ctx.user_store.as_ref(),
        ];
        load_managers(&managers).await?;

        // Possibly redirected from a view that already selected this domain.
        if let Some(active) = self.ctx.domain_store.active_item() {
            if active.id() == requested {
                log::debug!("Domain {requested} already active, skipping fetch");
                self.domain_loaded(active);
                return Ok(());
            }
        }

        let handle = self.ctx.domain_store.set_active_item(requested).await?;
        self.domain_loaded(handle);
        Ok(())
    }

    fn domain_loaded(&mut self, handle: DomainHandle) {
        self.chrome.title = handle.borrow().displayname.clone();
        log::info!("Loaded domain {} ({})", handle.id(), self.chrome.title);
        self.load = LoadState::Loaded(handle);
    }

    // ===== View state =====

    pub fn is_loaded(&self) -> bool {
        matches!(self.load, LoadState::Loaded(_))
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Live domain; do not hold the returned guard across an `.await`
    pub fn domain(&self) -> Option<watch::Ref<'_, Domain>> {
        match &self.load {
            LoadState::Loaded(handle) => Some(handle.borrow()),
            LoadState::Unloaded => None,
        }
    }

    fn handle(&self) -> CoreResult<&DomainHandle> {
        match &self.load {
            LoadState::Loaded(handle) => Ok(handle),
            LoadState::Unloaded => Err(CoreError::NotLoaded),
        }
    }

    pub fn chrome(&self) -> &PageChrome {
        &self.chrome
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn set_error(&mut self, context: &str, error: &CoreError) {
        error.log(context);
        self.error = Some(error.display_message());
    }

    // ===== Predicates =====

    pub fn is_superuser(&self) -> bool {
        self.ctx.user_store.is_superuser()
    }

    pub fn is_default_domain(&self) -> bool {
        self.domain().is_some_and(|d| d.is_default())
    }

    /// Only empty domains can be deleted; the default-domain check is separate.
    pub fn can_be_deleted(&self) -> bool {
        self.domain().is_some_and(|d| d.rrsets.is_empty())
    }

    /// Rows without an owning resource are generated by the system
    pub fn is_record_autogenerated(row: &ResourceRecord) -> bool {
        row.is_autogenerated()
    }

    pub fn supported_record_types() -> &'static [RecordType] {
        &RecordType::ALL
    }

    // ===== Sorting =====

    pub fn sort(&self) -> &TableSort {
        &self.sort
    }

    pub fn sort_table(&mut self, key: SortKey) {
        self.sort.sort_by(key);
    }

    /// Rows of the live domain in table order
    pub fn sorted_records(&self) -> Vec<ResourceRecord> {
        let mut rows = self.domain().map(|d| d.rrsets.clone()).unwrap_or_default();
        self.sort.apply(&mut rows);
        rows
    }

    // ===== Summary =====

    pub fn editing_summary(&self) -> bool {
        self.editing_summary
    }

    pub fn enter_edit_summary(&mut self) {
        self.editing_summary = true;
    }

    pub fn exit_edit_summary(&mut self) {
        self.editing_summary = false;
    }

    /// Save the summary form; stays in summary edit on failure.
    pub async fn save_summary(&mut self, summary: DomainSummary) -> CoreResult<()> {
        let domain_id = self.handle()?.id();
        match self.ctx.domain_store.update_domain(domain_id, &summary).await {
            Ok(()) => {
                self.editing_summary = false;
                self.error = None;
                if let Some(title) = self.domain().map(|d| d.displayname.clone()) {
                    self.chrome.title = title;
                }
                Ok(())
            }
            Err(e) => {
                self.set_error("Failed to update domain", &e);
                Err(e)
            }
        }
    }

    // ===== Record rows =====

    pub fn row_state(&self) -> &RowState {
        self.rows.state()
    }

    pub fn rows(&self) -> &RowEditor {
        &self.rows
    }

    fn find_row(&self, key: &RecordKey) -> CoreResult<ResourceRecord> {
        self.handle()?
            .borrow()
            .find_record(key)
            .cloned()
            .ok_or_else(|| CoreError::RecordNotFound(key.clone()))
    }

    /// Start editing a row; drops any pending delete.
    pub fn start_edit(&mut self, key: &RecordKey) -> CoreResult<()> {
        let row = self.find_row(key)?;
        self.rows.start_edit(&row)
    }

    /// Draft of the row being edited
    pub fn edit_draft_mut(&mut self) -> Option<&mut RecordFields> {
        self.rows.editing_mut().map(|session| &mut session.draft)
    }

    /// Ask for delete confirmation on a row; drops any edit session.
    pub fn start_delete(&mut self, key: &RecordKey) -> CoreResult<()> {
        let row = self.find_row(key)?;
        self.rows.start_delete(&row)
    }

    /// Cancel edit or delete; the row keeps its stored values.
    pub fn stop_editing_row(&mut self) {
        self.rows.stop();
    }

    /// Send the edit to the store if anything changed.
    ///
    /// On failure the session stays open so the user can fix the values.
    pub async fn commit_edit(&mut self) -> CoreResult<CommitOutcome> {
        let domain_id = self.handle()?.id();
        let session = self.rows.editing().ok_or(CoreError::NotEditing)?;
        if !session.is_dirty() {
            self.rows.stop();
            return Ok(CommitOutcome::Unchanged);
        }

        let update = session.to_update(domain_id);
        match self.ctx.domain_store.update_dns_record(&update).await {
            Ok(()) => {
                log::info!("Updated record {} in domain {domain_id}", update.current.key());
                self.rows.stop();
                self.error = None;
                Ok(CommitOutcome::Updated)
            }
            Err(e) => {
                self.set_error("Failed to update record", &e);
                Err(e)
            }
        }
    }

    /// Delete the row awaiting confirmation.
    ///
    /// `key` must be the row passed to [`Self::start_delete`]. The row state
    /// returns to idle whether or not the store accepts the deletion; failures
    /// are kept as the displayable error.
    pub async fn confirm_delete_record(&mut self, key: &RecordKey) -> CoreResult<()> {
        if self.rows.deleting() != Some(key) {
            return Err(CoreError::NoActiveAction);
        }
        let result = self.delete_record(key).await;
        self.rows.stop();
        match result {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.set_error("Failed to delete record", &e);
                Err(e)
            }
        }
    }

    async fn delete_record(&self, key: &RecordKey) -> CoreResult<()> {
        let domain_id = self.handle()?.id();
        let row = self.find_row(key)?;
        let dnsresource_id = row
            .dnsresource_id
            .ok_or_else(|| CoreError::RecordAutogenerated(key.clone()))?;

        // The store needs the domain id alongside the row.
        let deletion = RecordDeletion {
            domain_id,
            dnsresource_id,
            dnsdata_id: row.dnsdata_id,
            key: key.clone(),
        };
        self.ctx.domain_store.delete_dns_record(&deletion).await?;
        log::info!("Deleted record {key} from domain {domain_id}");
        Ok(())
    }

    // ===== Domain actions =====

    pub fn action(&self) -> Option<&DomainAction> {
        self.action.current()
    }

    pub fn action_in_progress(&self) -> bool {
        self.action.in_progress()
    }

    fn start_action(&mut self, action: DomainAction) -> CoreResult<()> {
        self.action.start(action)?;
        self.error = None;
        Ok(())
    }

    /// Delete domain button
    pub fn start_delete_domain(&mut self) -> CoreResult<()> {
        self.start_action(DomainAction::DeleteDomain)
    }

    /// Add record button
    pub fn start_add_record(&mut self) -> CoreResult<()> {
        self.start_action(DomainAction::AddRecord(NewRecord::default()))
    }

    /// Draft of the record being added
    pub fn new_record_mut(&mut self) -> Option<&mut NewRecord> {
        self.action.new_record_mut()
    }

    pub fn cancel_action(&mut self) {
        self.action.clear();
        self.error = None;
    }

    /// Delete the domain and leave the page.
    ///
    /// A rejected deletion keeps the action in progress with the store's
    /// validation message as the error, so the user can retry or cancel.
    pub async fn confirm_delete_domain(&mut self) -> CoreResult<()> {
        if !self.action.is_deleting_domain() {
            return Err(CoreError::NoActiveAction);
        }
        let domain_id = self.handle()?.id();
        match self.ctx.domain_store.delete_domain(domain_id).await {
            Ok(()) => {
                self.action.clear();
                self.error = None;
                self.ctx.navigator.navigate(&self.ctx.config.listing_path);
                Ok(())
            }
            Err(e) => {
                self.set_error("Failed to delete domain", &e);
                Err(e)
            }
        }
    }

    /// Create the drafted record; the form stays open on failure.
    pub async fn confirm_add_record(&mut self) -> CoreResult<()> {
        let record = self
            .action
            .new_record()
            .cloned()
            .ok_or(CoreError::NoActiveAction)?;
        let domain_id = self.handle()?.id();
        match self.ctx.domain_store.create_dns_record(domain_id, &record).await {
            Ok(()) => {
                log::info!("Added {} record {} to domain {domain_id}", record.rrtype, record.name);
                self.action.clear();
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.set_error("Failed to add record", &e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
#[path = "domain_details_tests.rs"]
mod tests;
