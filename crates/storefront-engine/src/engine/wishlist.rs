//! # Wishlist Set
//!
//! Membership set of product ids, written through to [`WishlistStorage`] on every toggle.
//! Storage failures are logged and swallowed: the in-memory set stays authoritative for the
//! session.

use crate::collaborators::WishlistStorage;
use crate::engine::catalog::Catalog;
use crate::model::{Product, ProductId};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Wishlist {
    ids: Vec<ProductId>,
    storage: Arc<dyn WishlistStorage>,
}

impl Wishlist {
    /// An empty wishlist that persists to `storage`. Call [`Wishlist::load`] to read what is
    /// already stored.
    pub fn new(storage: Arc<dyn WishlistStorage>) -> Self {
        Self {
            ids: Vec::new(),
            storage,
        }
    }

    /// Replaces the set with the stored ids. Unreadable storage yields an empty set.
    pub async fn load(&mut self) {
        match self.storage.read().await {
            Ok(mut ids) => {
                let mut seen = std::collections::HashSet::new();
                ids.retain(|id| seen.insert(id.clone()));
                info!(count = ids.len(), "Wishlist loaded");
                self.ids = ids;
            }
            Err(e) => {
                warn!(error = %e, "Wishlist storage unreadable, starting empty");
                self.ids.clear();
            }
        }
    }

    /// Flips membership of `id` and persists the set. Returns the new membership.
    pub async fn toggle(&mut self, id: &ProductId) -> bool {
        let member = match self.ids.iter().position(|existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.clone());
                true
            }
        };
        debug!(product_id = %id, member, "Wishlist toggled");

        if let Err(e) = self.storage.write(&self.ids).await {
            warn!(product_id = %id, error = %e, "Wishlist not persisted");
        }
        member
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Ids in the order they were added.
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The wishlisted products the catalog currently knows. Ids missing from the catalog
    /// are skipped.
    pub fn products<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        self.ids.iter().filter_map(|id| catalog.get(id)).collect()
    }
}
