//! Shared application state.

use std::sync::Arc;

use weather_core::{Store, WeatherProvider};

/// Collaborators handed to every handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(store: Store, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { store, provider }
    }
}
