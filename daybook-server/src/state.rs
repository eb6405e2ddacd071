use std::sync::Arc;

use daybook_core::Storage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Owned by main; handlers only ever see it through this handle
    storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        AppState { storage }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}
