//! Test helpers
//!
//! Mock collaborators and factories for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::services::{ControllerContext, DomainDetailsController};
use crate::traits::{
    DomainStore, ErrorReporter, InMemoryDomainStore, InMemoryUserStore, Manager, Navigator,
};
use crate::types::{
    Domain, DomainHandle, DomainId, DomainSummary, NewRecord, RecordDeletion, RecordType,
    RecordUpdate, ResourceRecord, User,
};

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ===== MockDomainStore =====

/// Store operations, for call counting and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    LoadItems,
    SetActiveItem,
    CreateRecord,
    UpdateRecord,
    DeleteRecord,
    UpdateDomain,
    DeleteDomain,
}

/// Wraps the in-memory store, recording calls and failing on demand
pub struct MockDomainStore {
    inner: InMemoryDomainStore,
    calls: Mutex<Vec<StoreOp>>,
    failures: Mutex<HashMap<StoreOp, CoreError>>,
}

impl MockDomainStore {
    pub fn new(domains: Vec<Domain>) -> Self {
        Self {
            inner: InMemoryDomainStore::with_domains(domains),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Make every later call of `op` fail with `error`
    pub fn fail(&self, op: StoreOp, error: CoreError) {
        lock(&self.failures).insert(op, error);
    }

    pub fn calls(&self, op: StoreOp) -> usize {
        lock(&self.calls).iter().filter(|c| **c == op).count()
    }

    fn enter(&self, op: StoreOp) -> CoreResult<()> {
        lock(&self.calls).push(op);
        match lock(&self.failures).get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Manager for MockDomainStore {
    fn name(&self) -> &'static str {
        "domains"
    }

    async fn load_items(&self) -> CoreResult<()> {
        self.enter(StoreOp::LoadItems)
    }
}

#[async_trait]
impl DomainStore for MockDomainStore {
    fn active_item(&self) -> Option<DomainHandle> {
        self.inner.active_item()
    }

    async fn set_active_item(&self, id: DomainId) -> CoreResult<DomainHandle> {
        self.enter(StoreOp::SetActiveItem)?;
        self.inner.set_active_item(id).await
    }

    fn list(&self) -> Vec<Domain> {
        self.inner.list()
    }

    async fn create_dns_record(&self, domain_id: DomainId, record: &NewRecord) -> CoreResult<()> {
        self.enter(StoreOp::CreateRecord)?;
        self.inner.create_dns_record(domain_id, record).await
    }

    async fn update_dns_record(&self, update: &RecordUpdate) -> CoreResult<()> {
        self.enter(StoreOp::UpdateRecord)?;
        self.inner.update_dns_record(update).await
    }

    async fn delete_dns_record(&self, deletion: &RecordDeletion) -> CoreResult<()> {
        self.enter(StoreOp::DeleteRecord)?;
        self.inner.delete_dns_record(deletion).await
    }

    async fn update_domain(&self, domain_id: DomainId, summary: &DomainSummary) -> CoreResult<()> {
        self.enter(StoreOp::UpdateDomain)?;
        self.inner.update_domain(domain_id, summary).await
    }

    async fn delete_domain(&self, domain_id: DomainId) -> CoreResult<()> {
        self.enter(StoreOp::DeleteDomain)?;
        self.inner.delete_domain(domain_id).await
    }
}

// ===== RecordingErrorReporter / RecordingNavigator =====

#[derive(Default)]
pub struct RecordingErrorReporter {
    errors: Mutex<Vec<CoreError>>,
}

impl RecordingErrorReporter {
    pub fn errors(&self) -> Vec<CoreError> {
        lock(&self.errors).clone()
    }
}

impl ErrorReporter for RecordingErrorReporter {
    fn raise_error(&self, error: &CoreError) {
        lock(&self.errors).push(error.clone());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        lock(&self.paths).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        lock(&self.paths).push(path.to_string());
    }
}

// ===== Factories =====

pub struct TestHarness {
    pub store: Arc<MockDomainStore>,
    pub users: Arc<InMemoryUserStore>,
    pub reporter: Arc<RecordingErrorReporter>,
    pub navigator: Arc<RecordingNavigator>,
    pub ctx: Arc<ControllerContext>,
}

impl TestHarness {
    pub fn controller(&self) -> DomainDetailsController {
        DomainDetailsController::new(Arc::clone(&self.ctx))
    }
}

/// Controller context wired to fresh mocks
pub fn create_test_harness(domains: Vec<Domain>) -> TestHarness {
    let store = Arc::new(MockDomainStore::new(domains));
    let users = Arc::new(InMemoryUserStore::new());
    let reporter = Arc::new(RecordingErrorReporter::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let ctx = Arc::new(ControllerContext::new(
        store.clone(),
        users.clone(),
        reporter.clone(),
        navigator.clone(),
    ));
    TestHarness {
        store,
        users,
        reporter,
        navigator,
        ctx,
    }
}

/// A user-managed row
pub fn user_record(name: &str, rrtype: RecordType, rrdata: &str, id: u64) -> ResourceRecord {
    ResourceRecord {
        name: name.to_string(),
        rrtype,
        rrdata: rrdata.to_string(),
        ttl: Some(3600),
        dnsresource_id: Some(id),
        dnsdata_id: Some(id * 100),
        system_id: None,
        user_id: Some(1),
    }
}

/// A row generated from a deployed node
pub fn node_record(name: &str, rrdata: &str, system_id: &str) -> ResourceRecord {
    ResourceRecord {
        name: name.to_string(),
        rrtype: RecordType::A,
        rrdata: rrdata.to_string(),
        ttl: None,
        dnsresource_id: None,
        dnsdata_id: None,
        system_id: Some(system_id.to_string()),
        user_id: None,
    }
}

pub fn test_domain(id: u64, name: &str, rrsets: Vec<ResourceRecord>) -> Domain {
    let mut domain = Domain::new(DomainId(id), name);
    domain.rrsets = rrsets;
    domain
}

pub fn superuser() -> User {
    User {
        id: 1,
        username: "admin".to_string(),
        is_superuser: true,
    }
}
