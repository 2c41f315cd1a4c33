//! Record table sort order

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ResourceRecord;

/// Column the record table is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Rrtype,
    Rrdata,
    Ttl,
    /// Node the record derives from
    Owner,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rrtype => "rrtype",
            Self::Rrdata => "rrdata",
            Self::Ttl => "ttl",
            Self::Owner => "owner",
        }
    }

    fn compare(self, a: &ResourceRecord, b: &ResourceRecord) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Rrtype => a.rrtype.cmp(&b.rrtype),
            Self::Rrdata => a.rrdata.cmp(&b.rrdata),
            Self::Ttl => a.ttl.cmp(&b.ttl),
            Self::Owner => a.system_id.cmp(&b.system_id),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "rrtype" => Ok(Self::Rrtype),
            "rrdata" => Ok(Self::Rrdata),
            "ttl" => Ok(Self::Ttl),
            "owner" => Ok(Self::Owner),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Sort state of the record table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSort {
    pub predicate: SortKey,
    pub reverse: bool,
    /// When set, choosing a different key sorts ascending again
    reset_on_key_change: bool,
}

impl TableSort {
    pub fn new(predicate: SortKey, reset_on_key_change: bool) -> Self {
        Self {
            predicate,
            reverse: false,
            reset_on_key_change,
        }
    }

    /// Sort by `key`.
    ///
    /// The direction flips on every call, including when the key changes,
    /// unless `reset_on_key_change` is set.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.reset_on_key_change && key != self.predicate {
            self.reverse = false;
        } else {
            self.reverse = !self.reverse;
        }
        self.predicate = key;
    }

    /// Stable sort, ties keep store order
    pub fn apply(&self, rows: &mut [ResourceRecord]) {
        rows.sort_by(|a, b| {
            let ord = self.predicate.compare(a, b);
            if self.reverse {
                ord.reverse()
            } else {
                ord
            }
        });
    }
}

impl Default for TableSort {
    fn default() -> Self {
        Self::new(SortKey::Name, false)
    }
}
