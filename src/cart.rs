//! Shopper cart kept in [`LocalStorage`], one JSON list per identity.
//!
//! [`CartStore`] is the only code that reads or writes the cart keys. Every
//! mutation persists the whole list and publishes a [`CartEvent`] to
//! subscribers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use utoipa::ToSchema;

use crate::{
    models::Product,
    storage::{Identity, LocalStorage},
};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// The product fields copied into a cart line when it is first added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// An ordered list of cart lines. Quantities are always at least 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, product_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Adds `delta` to the product's line, appending a new line if needed.
    pub fn add(&mut self, product: CartProduct, delta: i64) {
        if self.get(product.product_id).is_some() {
            self.apply_delta(product.product_id, delta);
            return;
        }
        // A new line starts at max(delta, 0); zero would break the invariant, so skip it.
        let quantity = delta.max(0);
        if quantity == 0 {
            return;
        }
        self.items.push(CartItem {
            product_id: product.product_id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: u32::try_from(quantity).unwrap_or(u32::MAX),
        });
    }

    pub fn remove(&mut self, product_id: i64) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Shifts a line's quantity, dropping the line once it reaches zero.
    pub fn apply_delta(&mut self, product_id: i64, delta: i64) {
        if let Some(current) = self.get(product_id).map(|item| i64::from(item.quantity)) {
            self.set_quantity(product_id, current.saturating_add(delta));
        }
    }

    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self.item_mut(product_id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn increment(&mut self, product_id: i64) {
        if let Some(item) = self.item_mut(product_id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    /// Steps a line down by one but never below 1; removal is a separate action.
    pub fn decrement(&mut self, product_id: i64) {
        if let Some(item) = self.item_mut(product_id) {
            if item.quantity > 1 {
                item.quantity -= 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Total number of units, as shown on the cart badge.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    fn item_mut(&mut self, product_id: i64) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartChange {
    Added,
    Removed,
    QuantityChanged,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEvent {
    pub key: String,
    pub change: CartChange,
    pub item_count: u64,
    pub total: f64,
}

pub struct CartStore<S> {
    storage: Arc<S>,
    events: broadcast::Sender<CartEvent>,
}

impl<S> Clone for CartStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            events: self.events.clone(),
        }
    }
}

impl<S: LocalStorage> CartStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { storage, events }
    }

    /// Receives every change made through this store (and its clones) from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    pub fn load(&self, owner: &Identity) -> Cart {
        let key = owner.cart_key();
        let Some(raw) = self.storage.get_item(&key) else {
            return Cart::default();
        };
        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => cart,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "unreadable cart record, treating as empty");
                Cart::default()
            }
        }
    }

    pub fn items(&self, owner: &Identity) -> Vec<CartItem> {
        self.load(owner).into_items()
    }

    pub fn total(&self, owner: &Identity) -> f64 {
        self.load(owner).total()
    }

    pub fn count(&self, owner: &Identity) -> u64 {
        self.load(owner).count()
    }

    pub fn add(&self, owner: &Identity, product: CartProduct, delta: i64) -> Cart {
        self.update(owner, CartChange::Added, |cart| cart.add(product, delta))
    }

    pub fn remove(&self, owner: &Identity, product_id: i64) -> Cart {
        self.update(owner, CartChange::Removed, |cart| cart.remove(product_id))
    }

    pub fn set_quantity(&self, owner: &Identity, product_id: i64, quantity: i64) -> Cart {
        self.update(owner, CartChange::QuantityChanged, |cart| {
            cart.set_quantity(product_id, quantity)
        })
    }

    pub fn apply_delta(&self, owner: &Identity, product_id: i64, delta: i64) -> Cart {
        self.update(owner, CartChange::QuantityChanged, |cart| {
            cart.apply_delta(product_id, delta)
        })
    }

    pub fn increment(&self, owner: &Identity, product_id: i64) -> Cart {
        self.update(owner, CartChange::QuantityChanged, |cart| {
            cart.increment(product_id)
        })
    }

    pub fn decrement(&self, owner: &Identity, product_id: i64) -> Cart {
        self.update(owner, CartChange::QuantityChanged, |cart| {
            cart.decrement(product_id)
        })
    }

    pub fn clear(&self, owner: &Identity) {
        let key = owner.cart_key();
        self.storage.remove_item(&key);
        self.publish(key, CartChange::Cleared, &Cart::default());
    }

    // Read-modify-write without locking: concurrent writers to one key race
    // and the last write wins.
    fn update(&self, owner: &Identity, change: CartChange, mutate: impl FnOnce(&mut Cart)) -> Cart {
        let key = owner.cart_key();
        let mut cart = self.load(owner);
        mutate(&mut cart);

        // An empty cart is stored as no record at all.
        if cart.is_empty() {
            self.storage.remove_item(&key);
        } else {
            match serde_json::to_string(&cart) {
                Ok(raw) => self.storage.set_item(&key, raw),
                Err(err) => tracing::error!(key = %key, error = %err, "failed to serialize cart"),
            }
        }

        self.publish(key, change, &cart);
        cart
    }

    fn publish(&self, key: String, change: CartChange, cart: &Cart) {
        let event = CartEvent {
            key,
            change,
            item_count: cart.count(),
            total: cart.total(),
        };
        // No subscribers is fine; the event is simply dropped.
        let _ = self.events.send(event);
    }
}
