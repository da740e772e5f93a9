//! Process-local client state that is queryable alongside server data.
//!
//! [`LocalStore`] is an explicit handle: create one at startup, call
//! [`LocalStore::initialize`] once, and pass clones to whatever needs it.
//! Clones share the same state.

mod credentials;

pub use credentials::*;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::LaunchId;

/// Local store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Local store already initialized")]
    AlreadyInitialized,

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: LocalKey,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The closed set of fields held in the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocalKey {
    /// Session Flag: whether a credential token was present.
    IsLoggedIn,
    /// Reservation Set: launches the user put in the cart.
    CartItems,
}

impl LocalKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsLoggedIn => "isLoggedIn",
            Self::CartItems => "cartItems",
        }
    }

    fn expected_kind(&self) -> &'static str {
        match self {
            Self::IsLoggedIn => "bool",
            Self::CartItems => "ids",
        }
    }
}

impl fmt::Display for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value stored under a [`LocalKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalValue {
    Bool(bool),
    Ids(Vec<LaunchId>),
}

impl LocalValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Ids(_) => "ids",
        }
    }
}

/// Full contents of the store, used for initialization and snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalState {
    pub is_logged_in: bool,
    pub cart_items: Vec<LaunchId>,
}

#[derive(Debug, Default)]
struct Slots {
    initialized: bool,
    is_logged_in: Option<bool>,
    cart_items: Option<Vec<LaunchId>>,
}

/// Shared handle to the local store.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    slots: Arc<RwLock<Slots>>,
}

impl LocalStore {
    /// An empty, uninitialized store. Every key reads as absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. Allowed exactly once per store.
    pub fn initialize(&self, state: LocalState) -> Result<(), StoreError> {
        let mut slots = self.slots.write();
        if slots.initialized {
            return Err(StoreError::AlreadyInitialized);
        }
        let cart_items = dedup(state.cart_items);
        tracing::debug!(
            is_logged_in = state.is_logged_in,
            cart_items = cart_items.len(),
            "Initialized local store"
        );
        slots.initialized = true;
        slots.is_logged_in = Some(state.is_logged_in);
        slots.cart_items = Some(cart_items);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.slots.read().initialized
    }

    /// Read a key. `None` if it has never been written.
    pub fn get(&self, key: LocalKey) -> Option<LocalValue> {
        let slots = self.slots.read();
        match key {
            LocalKey::IsLoggedIn => slots.is_logged_in.map(LocalValue::Bool),
            LocalKey::CartItems => slots.cart_items.clone().map(LocalValue::Ids),
        }
    }

    /// Overwrite a key. The value variant must match the key.
    pub fn set(&self, key: LocalKey, value: LocalValue) -> Result<(), StoreError> {
        let mut slots = self.slots.write();
        match (key, value) {
            (LocalKey::IsLoggedIn, LocalValue::Bool(flag)) => {
                slots.is_logged_in = Some(flag);
            }
            (LocalKey::CartItems, LocalValue::Ids(ids)) => {
                slots.cart_items = Some(dedup(ids));
            }
            (key, value) => {
                return Err(StoreError::TypeMismatch {
                    key,
                    expected: key.expected_kind(),
                    actual: value.kind(),
                });
            }
        }
        tracing::debug!(%key, "Wrote local field");
        Ok(())
    }

    /// Session Flag, `false` when absent.
    pub fn is_logged_in(&self) -> bool {
        self.slots.read().is_logged_in.unwrap_or(false)
    }

    /// Reservation Set, empty when absent.
    pub fn cart_items(&self) -> Vec<LaunchId> {
        self.slots.read().cart_items.clone().unwrap_or_default()
    }

    /// Membership test on the Reservation Set without cloning it.
    pub fn cart_contains(&self, id: &LaunchId) -> bool {
        self.slots
            .read()
            .cart_items
            .as_ref()
            .is_some_and(|items| items.contains(id))
    }

    /// Read-modify-write of the Reservation Set under a single write lock.
    ///
    /// `f` receives the current list (empty if absent) and returns the
    /// replacement, which is de-duplicated, stored and returned.
    pub fn update_cart<F>(&self, f: F) -> Vec<LaunchId>
    where
        F: FnOnce(&[LaunchId]) -> Vec<LaunchId>,
    {
        let mut slots = self.slots.write();
        let next = dedup(f(slots.cart_items.as_deref().unwrap_or(&[])));
        slots.cart_items = Some(next.clone());
        tracing::debug!(cart_items = next.len(), "Updated cart");
        next
    }

    /// Current contents with absent keys at their defaults.
    pub fn snapshot(&self) -> LocalState {
        let slots = self.slots.read();
        LocalState {
            is_logged_in: slots.is_logged_in.unwrap_or(false),
            cart_items: slots.cart_items.clone().unwrap_or_default(),
        }
    }
}

/// Drop repeated ids, keeping the first occurrence.
fn dedup(ids: Vec<LaunchId>) -> Vec<LaunchId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<LaunchId> {
        raw.iter().map(|s| LaunchId::from(*s)).collect()
    }

    #[test]
    fn test_uninitialized_reads_are_absent() {
        let store = LocalStore::new();
        assert!(!store.is_initialized());
        assert_eq!(store.get(LocalKey::IsLoggedIn), None);
        assert_eq!(store.get(LocalKey::CartItems), None);
        assert!(!store.is_logged_in());
        assert!(store.cart_items().is_empty());
    }

    #[test]
    fn test_initialize_dedups_cart() {
        let store = LocalStore::new();
        store
            .initialize(LocalState {
                is_logged_in: true,
                cart_items: ids(&["1", "2", "1"]),
            })
            .unwrap();
        assert_eq!(store.cart_items(), ids(&["1", "2"]));
    }

    #[test]
    fn test_initialize_twice_fails() {
        let store = LocalStore::new();
        store.initialize(LocalState::default()).unwrap();
        assert_eq!(
            store.initialize(LocalState::default()),
            Err(StoreError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_set_rejects_wrong_variant() {
        let store = LocalStore::new();
        let err = store
            .set(LocalKey::IsLoggedIn, LocalValue::Ids(vec![]))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::TypeMismatch {
                key: LocalKey::IsLoggedIn,
                expected: "bool",
                actual: "ids",
            }
        );
        assert_eq!(store.get(LocalKey::IsLoggedIn), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = LocalStore::new();
        let other = store.clone();
        other.set(LocalKey::IsLoggedIn, LocalValue::Bool(true)).unwrap();
        assert!(store.is_logged_in());
    }

    #[test]
    fn test_update_cart_from_absent() {
        let store = LocalStore::new();
        let next = store.update_cart(|current| {
            assert!(current.is_empty());
            ids(&["7", "7"])
        });
        assert_eq!(next, ids(&["7"]));
        assert_eq!(store.get(LocalKey::CartItems), Some(LocalValue::Ids(ids(&["7"]))));
    }

    #[test]
    fn test_local_key_display() {
        assert_eq!(LocalKey::CartItems.to_string(), "cartItems");
        assert_eq!(LocalKey::IsLoggedIn.to_string(), "isLoggedIn");
    }
}
