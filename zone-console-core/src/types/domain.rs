//! Domain (DNS zone) related type definitions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::record::{RecordKey, ResourceRecord};
use crate::error::{CoreError, CoreResult};

/// Domain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(pub u64);

impl DomainId {
    /// The distinguished default domain
    pub const DEFAULT: Self = Self(0);

    /// Parse a route parameter.
    ///
    /// Standard integer parsing: surrounding whitespace or trailing garbage is rejected.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        raw.parse::<u64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidIdentifier(raw.to_string()))
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A DNS zone together with its resource records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
    /// Name shown as the page title
    pub displayname: String,
    #[serde(default)]
    pub authoritative: bool,
    /// Default TTL for records without their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Number of hosts with records in this domain
    #[serde(default)]
    pub hosts: u32,
    #[serde(default)]
    pub resource_count: u32,
    #[serde(default)]
    pub rrsets: Vec<ResourceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Domain {
    #[must_use]
    pub fn new(id: DomainId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            displayname: name.clone(),
            name,
            authoritative: true,
            ttl: None,
            hosts: 0,
            resource_count: 0,
            rrsets: Vec::new(),
            created: None,
            updated: None,
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.id == DomainId::DEFAULT
    }

    pub fn find_record(&self, key: &RecordKey) -> Option<&ResourceRecord> {
        self.rrsets.iter().find(|r| r.matches(key))
    }

    /// Current editable summary fields
    #[must_use]
    pub fn summary(&self) -> DomainSummary {
        DomainSummary {
            name: self.name.clone(),
            authoritative: self.authoritative,
            ttl: self.ttl,
        }
    }
}

/// Editable domain summary fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub name: String,
    pub authoritative: bool,
    pub ttl: Option<u32>,
}

impl DomainSummary {
    /// Apply to a domain; the display name follows the name.
    pub fn apply_to(&self, domain: &mut Domain) {
        domain.name.clone_from(&self.name);
        domain.displayname.clone_from(&self.name);
        domain.authoritative = self.authoritative;
        domain.ttl = self.ttl;
    }
}

/// Live view of a domain owned by the store.
///
/// Holds the receiving side of the store's publication channel, so every
/// refresh the store makes is visible here without copying.
#[derive(Debug, Clone)]
pub struct DomainHandle {
    rx: watch::Receiver<Domain>,
}

impl DomainHandle {
    #[must_use]
    pub fn new(rx: watch::Receiver<Domain>) -> Self {
        Self { rx }
    }

    /// Create a publication channel for `domain`; stores keep the sender.
    #[must_use]
    pub fn channel(domain: Domain) -> (watch::Sender<Domain>, Self) {
        let (tx, rx) = watch::channel(domain);
        (tx, Self::new(rx))
    }

    pub fn id(&self) -> DomainId {
        self.rx.borrow().id
    }

    /// Borrow the current value. Do not hold across an `.await`.
    pub fn borrow(&self) -> watch::Ref<'_, Domain> {
        self.rx.borrow()
    }

    #[must_use]
    pub fn snapshot(&self) -> Domain {
        self.rx.borrow().clone()
    }
}
