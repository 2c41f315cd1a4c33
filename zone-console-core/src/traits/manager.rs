//! Manager abstraction: a collaborator that must load its items before a view can use it

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::error::{CoreError, CoreResult};

/// A store that loads its items from the backend before first use
#[async_trait]
pub trait Manager: Send + Sync {
    /// Name used in logs and load errors
    fn name(&self) -> &'static str;

    /// Load (or reload) all items
    async fn load_items(&self) -> CoreResult<()>;
}

/// Load every manager concurrently; the first failure wins.
///
/// Failures are reported as [`CoreError::ManagerLoad`] naming the manager.
pub async fn load_managers(managers: &[&dyn Manager]) -> CoreResult<()> {
    let loads = managers.iter().map(|manager| async move {
        manager.load_items().await.map_err(|e| match e {
            e @ CoreError::ManagerLoad { .. } => e,
            other => CoreError::ManagerLoad {
                manager: manager.name().to_string(),
                message: other.to_string(),
            },
        })
    });
    try_join_all(loads).await?;
    log::debug!("Loaded {} managers", managers.len());
    Ok(())
}
