//! Process-local key/value storage for per-identity shopper state.
//!
//! Mirrors what a browser keeps in local storage: string values under string
//! keys, no transactions and no expiry. Writes always succeed.

use dashmap::DashMap;
use uuid::Uuid;

pub trait LocalStorage: Send + Sync + 'static {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String);
    fn remove_item(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|value| value.clone())
    }

    fn set_item(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// Who a piece of shopper state belongs to.
///
/// Anonymous shoppers are told apart by the id in their `guest_id` cookie,
/// so each browser keeps its own cart and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    User(Uuid),
    Guest(Uuid),
}

impl Identity {
    pub fn cart_key(&self) -> String {
        match self {
            Identity::User(id) => format!("cart_{id}"),
            Identity::Guest(id) => format!("cart_guest_{id}"),
        }
    }

    pub fn location_key(&self) -> String {
        match self {
            Identity::User(id) => format!("location_{id}"),
            Identity::Guest(id) => format!("location_guest_{id}"),
        }
    }
}
