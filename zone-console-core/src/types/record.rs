//! DNS resource record related type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::DomainId;

/// Record types that can be created or edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// SSH public key fingerprint record.
    Sshfp,
    /// Text record.
    Txt,
}

impl RecordType {
    /// All supported types, in display order
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Srv,
        Self::Sshfp,
        Self::Txt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Sshfp => "SSHFP",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported record type: {s}"))
    }
}

/// One row of a domain's resource record table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub name: String,
    pub rrtype: RecordType,
    pub rrdata: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Owning resource; absent for system-generated records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnsresource_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnsdata_id: Option<u64>,
    /// Node the record was derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl ResourceRecord {
    /// Rows without an owning resource were generated from a deployed node
    /// (or similar) and cannot be edited or deleted here.
    #[must_use]
    pub fn is_autogenerated(&self) -> bool {
        self.dnsresource_id.is_none()
    }

    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            name: self.name.clone(),
            rrtype: self.rrtype,
            rrdata: self.rrdata.clone(),
        }
    }

    pub fn matches(&self, key: &RecordKey) -> bool {
        self.name == key.name && self.rrtype == key.rrtype && self.rrdata == key.rrdata
    }

    #[must_use]
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            rrtype: self.rrtype,
            rrdata: self.rrdata.clone(),
            ttl: self.ttl,
        }
    }

    pub fn apply_fields(&mut self, fields: &RecordFields) {
        self.name.clone_from(&fields.name);
        self.rrtype = fields.rrtype;
        self.rrdata.clone_from(&fields.rrdata);
        self.ttl = fields.ttl;
    }
}

/// Identifies a row within its domain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub name: String,
    pub rrtype: RecordType,
    pub rrdata: String,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.rrtype, self.rrdata)
    }
}

/// The user-editable fields of a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub name: String,
    pub rrtype: RecordType,
    pub rrdata: String,
    pub ttl: Option<u32>,
}

impl RecordFields {
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            name: self.name.clone(),
            rrtype: self.rrtype,
            rrdata: self.rrdata.clone(),
        }
    }
}

/// Draft of a record being added to the domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub rrtype: RecordType,
    pub rrdata: String,
    pub ttl: Option<u32>,
}

impl Default for NewRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            rrtype: RecordType::A,
            rrdata: String::new(),
            ttl: None,
        }
    }
}

/// Edit request sent to the store; carries the previous values so the
/// store can locate the data being replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub domain_id: DomainId,
    pub dnsresource_id: u64,
    pub dnsdata_id: Option<u64>,
    pub previous: RecordFields,
    pub current: RecordFields,
}

/// Delete request sent to the store, self-contained with its domain id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDeletion {
    pub domain_id: DomainId,
    pub dnsresource_id: u64,
    pub dnsdata_id: Option<u64>,
    pub key: RecordKey,
}
