//! Session/user store abstract Trait

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use super::manager::Manager;
use crate::error::CoreResult;
use crate::types::User;

/// User store Trait
///
/// Knows who is signed in for the current session.
pub trait UserStore: Manager {
    /// Currently authenticated user, if any
    fn current_user(&self) -> Option<User>;

    /// Whether the authenticated user is a superuser
    fn is_superuser(&self) -> bool {
        self.current_user().is_some_and(|u| u.is_superuser)
    }
}

/// In-memory user store
///
/// Holds a fixed session user; suitable for embedding and tests.
#[derive(Default)]
pub struct InMemoryUserStore {
    current: RwLock<Option<User>>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(user: User) -> Self {
        Self {
            current: RwLock::new(Some(user)),
        }
    }

    pub fn set_current_user(&self, user: Option<User>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}

#[async_trait]
impl Manager for InMemoryUserStore {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn load_items(&self) -> CoreResult<()> {
        Ok(())
    }
}

impl UserStore for InMemoryUserStore {
    fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
