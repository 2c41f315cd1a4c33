//! Page chrome state

use serde::{Deserialize, Serialize};

/// Title and active navigation tab for the hosting page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChrome {
    pub title: String,
    /// Must match the top-level tab so it is highlighted
    pub page: String,
}
