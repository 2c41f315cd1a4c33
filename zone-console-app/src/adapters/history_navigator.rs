//! In-process navigation history

use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;
use zone_console_core::traits::Navigator;

/// Records every navigation and publishes the current path.
///
/// Hosts subscribe to follow redirects (for example, back to the domain
/// listing after a deletion).
pub struct HistoryNavigator {
    current: watch::Sender<String>,
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        let (current, _) = watch::channel(initial.clone());
        Self {
            current,
            history: Mutex::new(vec![initial]),
        }
    }

    pub fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    /// All visited paths, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current.subscribe()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        log::debug!("Navigating to {path}");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
        self.current.send_replace(path.to_string());
    }
}
