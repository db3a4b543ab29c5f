use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::store::FamilyStore;

/// Shared handle to whichever store backs the app.
pub type DynStore = Arc<dyn FamilyStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: DynStore,
    pub config: Config,
}

impl FromRef<AppState> for DynStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
