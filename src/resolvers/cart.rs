//! Cart resolvers: the `isInCart` virtual field and the toggle mutation.

use crate::models::{Launch, LaunchId};
use crate::store::LocalStore;

/// Whether `launch` is in the cart. An absent cart resolves to `false`.
pub fn resolve_is_in_cart(launch: &Launch, store: &LocalStore) -> bool {
    store.cart_contains(&launch.id)
}

/// Add `id` to the cart, or remove it if already there.
///
/// Runs as one locked read-modify-write and returns the new cart. An
/// uninitialized store is treated as an empty cart and populated here.
pub fn toggle_reservation(id: &LaunchId, store: &LocalStore) -> Vec<LaunchId> {
    let mut added = false;
    let next = store.update_cart(|current| {
        if let Some(pos) = current.iter().position(|item| item == id) {
            let mut next = current.to_vec();
            next.remove(pos);
            next
        } else {
            added = true;
            let mut next = current.to_vec();
            next.push(id.clone());
            next
        }
    });
    tracing::debug!(%id, added, cart_items = next.len(), "Toggled reservation");
    next
}
