use std::sync::Arc;

use crate::storage::{Identity, LocalStorage};

/// The shopper's saved delivery location, one string per identity.
pub struct LocationStore<S> {
    storage: Arc<S>,
}

impl<S> Clone for LocationStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: LocalStorage> LocationStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub fn get(&self, owner: &Identity) -> Option<String> {
        self.storage.get_item(&owner.location_key())
    }

    pub fn set(&self, owner: &Identity, location: &str) {
        self.storage
            .set_item(&owner.location_key(), location.trim().to_string());
    }
}
