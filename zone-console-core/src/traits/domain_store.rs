//! Domain store abstract Trait

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;

use super::manager::Manager;
use crate::error::{CoreError, CoreResult};
use crate::types::{
    Domain, DomainHandle, DomainId, DomainSummary, NewRecord, RecordDeletion, RecordFields,
    RecordUpdate, ResourceRecord, ValidationMessages,
};

/// Domain store Trait
///
/// Owns every domain and its records. Views hold [`DomainHandle`]s, and the
/// store publishes refreshed data through them after each change.
#[async_trait]
pub trait DomainStore: Manager {
    /// The domain currently selected in the store, if any
    fn active_item(&self) -> Option<DomainHandle>;

    /// Select a domain
    ///
    /// # Errors
    /// * `DomainNotFound` - unknown or inaccessible id
    async fn set_active_item(&self, id: DomainId) -> CoreResult<DomainHandle>;

    /// Snapshot of all loaded domains
    fn list(&self) -> Vec<Domain>;

    /// Add a record to a domain
    async fn create_dns_record(&self, domain_id: DomainId, record: &NewRecord) -> CoreResult<()>;

    /// Replace the data of an existing record
    async fn update_dns_record(&self, update: &RecordUpdate) -> CoreResult<()>;

    /// Delete a record; the request carries its domain id
    async fn delete_dns_record(&self, deletion: &RecordDeletion) -> CoreResult<()>;

    /// Update domain summary fields
    async fn update_domain(&self, domain_id: DomainId, summary: &DomainSummary) -> CoreResult<()>;

    /// Delete a domain
    ///
    /// # Errors
    /// * `Validation` - the domain is not empty or otherwise cannot be deleted
    async fn delete_domain(&self, domain_id: DomainId) -> CoreResult<()>;
}

#[derive(Default)]
struct StoreInner {
    domains: BTreeMap<DomainId, watch::Sender<Domain>>,
    active: Option<DomainId>,
    next_resource_id: u64,
    next_data_id: u64,
}

impl StoreInner {
    /// Apply `change` to a copy of the domain and publish it only on success.
    fn modify<R>(
        &mut self,
        id: DomainId,
        change: impl FnOnce(&mut Self, &mut Domain) -> CoreResult<R>,
    ) -> CoreResult<R> {
        let mut domain = self
            .domains
            .get(&id)
            .ok_or(CoreError::DomainNotFound(id))?
            .borrow()
            .clone();
        let result = change(self, &mut domain)?;
        domain.updated = Some(Utc::now());
        if let Some(tx) = self.domains.get(&id) {
            tx.send_replace(domain);
        }
        Ok(result)
    }
}

/// In-memory domain store
///
/// Reference implementation of [`DomainStore`], available on all platforms.
/// Applies the same validation rules as the backend for the operations the
/// domain details view uses.
#[derive(Default)]
pub struct InMemoryDomainStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryDomainStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `domains`
    #[must_use]
    pub fn with_domains(domains: impl IntoIterator<Item = Domain>) -> Self {
        let store = Self::new();
        for domain in domains {
            store.insert(domain);
        }
        store
    }

    /// Insert or replace a domain
    pub fn insert(&self, domain: Domain) {
        let mut inner = self.write();
        let max_resource = domain
            .rrsets
            .iter()
            .filter_map(|r| r.dnsresource_id)
            .max()
            .unwrap_or(0);
        let max_data = domain
            .rrsets
            .iter()
            .filter_map(|r| r.dnsdata_id)
            .max()
            .unwrap_or(0);
        inner.next_resource_id = inner.next_resource_id.max(max_resource);
        inner.next_data_id = inner.next_data_id.max(max_data);

        let id = domain.id;
        if let Some(tx) = inner.domains.get(&id) {
            tx.send_replace(domain);
        } else {
            let (tx, _) = DomainHandle::channel(domain);
            inner.domains.insert(id, tx);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn validate_fields(name: &str, rrdata: &str) -> CoreResult<()> {
    let mut messages = ValidationMessages::default();
    if name.trim().is_empty() {
        messages
            .fields
            .insert("name".to_string(), vec!["This field is required.".to_string()]);
    }
    if rrdata.trim().is_empty() {
        messages
            .fields
            .insert("rrdata".to_string(), vec!["This field is required.".to_string()]);
    }
    if messages.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(messages))
    }
}

/// Stored rows never carry surrounding whitespace in name or data
fn normalized(fields: &RecordFields) -> RecordFields {
    RecordFields {
        name: fields.name.trim().to_string(),
        rrtype: fields.rrtype,
        rrdata: fields.rrdata.trim().to_string(),
        ttl: fields.ttl,
    }
}

fn record_exists(domain: &Domain, fields: &RecordFields) -> CoreResult<()> {
    if domain.find_record(&fields.key()).is_some() {
        return Err(CoreError::Validation(ValidationMessages::field(
            "rrdata",
            format!(
                "{} record {} with data {} already exists.",
                fields.rrtype, fields.name, fields.rrdata
            ),
        )));
    }
    Ok(())
}

#[async_trait]
impl Manager for InMemoryDomainStore {
    fn name(&self) -> &'static str {
        "domains"
    }

    async fn load_items(&self) -> CoreResult<()> {
        log::debug!("In-memory domain store holds {} domains", self.read().domains.len());
        Ok(())
    }
}

#[async_trait]
impl DomainStore for InMemoryDomainStore {
    fn active_item(&self) -> Option<DomainHandle> {
        let inner = self.read();
        let id = inner.active?;
        inner
            .domains
            .get(&id)
            .map(|tx| DomainHandle::new(tx.subscribe()))
    }

    async fn set_active_item(&self, id: DomainId) -> CoreResult<DomainHandle> {
        let mut inner = self.write();
        let handle = inner
            .domains
            .get(&id)
            .map(|tx| DomainHandle::new(tx.subscribe()))
            .ok_or(CoreError::DomainNotFound(id))?;
        inner.active = Some(id);
        Ok(handle)
    }

    fn list(&self) -> Vec<Domain> {
        self.read()
            .domains
            .values()
            .map(|tx| tx.borrow().clone())
            .collect()
    }

    async fn create_dns_record(&self, domain_id: DomainId, record: &NewRecord) -> CoreResult<()> {
        validate_fields(&record.name, &record.rrdata)?;
        self.write().modify(domain_id, |inner, domain| {
            let fields = normalized(&RecordFields {
                name: record.name.clone(),
                rrtype: record.rrtype,
                rrdata: record.rrdata.clone(),
                ttl: record.ttl,
            });
            record_exists(domain, &fields)?;

            // Records sharing a name share their owning resource.
            let dnsresource_id = domain
                .rrsets
                .iter()
                .find(|r| r.name == fields.name && r.dnsresource_id.is_some())
                .and_then(|r| r.dnsresource_id)
                .unwrap_or_else(|| {
                    inner.next_resource_id += 1;
                    inner.next_resource_id
                });
            inner.next_data_id += 1;

            domain.rrsets.push(ResourceRecord {
                name: fields.name,
                rrtype: fields.rrtype,
                rrdata: fields.rrdata,
                ttl: fields.ttl,
                dnsresource_id: Some(dnsresource_id),
                dnsdata_id: Some(inner.next_data_id),
                system_id: None,
                user_id: None,
            });
            Ok(())
        })
    }

    async fn update_dns_record(&self, update: &RecordUpdate) -> CoreResult<()> {
        validate_fields(&update.current.name, &update.current.rrdata)?;
        let current = normalized(&update.current);
        self.write().modify(update.domain_id, |_, domain| {
            let previous_key = update.previous.key();
            if current.key() != previous_key {
                record_exists(domain, &current)?;
            }
            let row = domain
                .rrsets
                .iter_mut()
                .find(|r| r.matches(&previous_key) && r.dnsresource_id == Some(update.dnsresource_id))
                .ok_or(CoreError::RecordNotFound(previous_key))?;
            row.apply_fields(&current);
            Ok(())
        })
    }

    async fn delete_dns_record(&self, deletion: &RecordDeletion) -> CoreResult<()> {
        self.write().modify(deletion.domain_id, |_, domain| {
            let index = domain
                .rrsets
                .iter()
                .position(|r| {
                    r.matches(&deletion.key) && r.dnsresource_id == Some(deletion.dnsresource_id)
                })
                .ok_or_else(|| CoreError::RecordNotFound(deletion.key.clone()))?;
            domain.rrsets.remove(index);
            Ok(())
        })
    }

    async fn update_domain(&self, domain_id: DomainId, summary: &DomainSummary) -> CoreResult<()> {
        if summary.name.trim().is_empty() {
            return Err(CoreError::Validation(ValidationMessages::field(
                "name",
                "This field is required.",
            )));
        }
        self.write().modify(domain_id, |_, domain| {
            summary.apply_to(domain);
            Ok(())
        })
    }

    async fn delete_domain(&self, domain_id: DomainId) -> CoreResult<()> {
        let mut inner = self.write();
        let tx = inner
            .domains
            .get(&domain_id)
            .ok_or(CoreError::DomainNotFound(domain_id))?;
        {
            let domain = tx.borrow();
            if domain.is_default() {
                return Err(CoreError::Validation(ValidationMessages::message(
                    "The default domain cannot be deleted.",
                )));
            }
            if !domain.rrsets.is_empty() {
                return Err(CoreError::Validation(ValidationMessages::message(
                    "Domain must be empty before it can be deleted.",
                )));
            }
        }
        inner.domains.remove(&domain_id);
        if inner.active == Some(domain_id) {
            inner.active = None;
        }
        log::info!("Domain {domain_id} deleted");
        Ok(())
    }
}
