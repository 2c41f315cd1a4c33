//! Controller settings

use serde::{Deserialize, Serialize};

use crate::state::SortKey;

/// Settings for the domain details view.
///
/// Every field has a default, so partial configuration files are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerConfig {
    /// Where to go after the domain is deleted
    pub listing_path: String,
    /// Top-level navigation tab to highlight
    pub page: String,
    /// Title shown until the domain is loaded
    pub loading_title: String,
    /// Initial record table sort column
    pub default_sort: SortKey,
    /// Sort ascending again when a different column is chosen
    pub reset_sort_direction_on_key_change: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            listing_path: "/domains".to_string(),
            page: "domains".to_string(),
            loading_title: "Loading...".to_string(),
            default_sort: SortKey::Name,
            reset_sort_direction_on_key_change: false,
        }
    }
}
