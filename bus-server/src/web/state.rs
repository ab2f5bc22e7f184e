//! Application state for the web layer.

use std::sync::Arc;

use crate::tfl::TflClient;

/// Shared application state.
///
/// Holds nothing mutable; every request sees the same client.
#[derive(Clone)]
pub struct AppState {
    /// TfL API client
    pub tfl: Arc<TflClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tfl: TflClient) -> Self {
        Self { tfl: Arc::new(tfl) }
    }
}
