//! Navigation abstraction

/// Redirects the hosting UI to another view by path
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}
