//! Session user type

use serde::{Deserialize, Serialize};

/// Authenticated user of the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub is_superuser: bool,
}
