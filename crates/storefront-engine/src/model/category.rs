/// Catalog categories kept by the category registry.
///
/// # Actor Framework
/// [`Category`] implements [`ActorEntity`](actor_framework::ActorEntity) in
/// [`crate::category_actor`]. Categories are created and listed, never edited.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence number assigned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u32);

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
}

/// Categories cannot be edited; this type has no values.
#[derive(Debug, Clone)]
pub enum CategoryUpdate {}

/// Categories shipped with the storefront, used when the registry has none.
pub const FALLBACK_CATEGORIES: [&str; 4] = ["Electronics", "Fashion", "Home", "Accessories"];
