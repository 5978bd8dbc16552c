/// Products as the catalog sees them, and the looser record shape a product store returns.
///
/// # Actor Framework
/// [`Product`] implements [`ActorEntity`](actor_framework::ActorEntity) in
/// [`crate::product_actor`], with [`ProductDraft`] as its create payload and
/// [`ProductPatch`] as its update payload.
use crate::model::ProductId;
use crate::product_actor::ProductError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A normalized catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    /// Never empty; the first entry is the primary image.
    pub images: Vec<String>,
    pub description: String,
    /// Aggregate rating, 0 to 5. Maintained outside the engine.
    pub rating: f32,
    pub reviews: u32,
    pub tags: Vec<String>,
    /// Announced but not yet purchasable.
    pub upcoming: bool,
    pub out_of_stock: bool,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether purchase actions are offered. Nothing is filtered on this.
    pub fn is_purchasable(&self) -> bool {
        !self.out_of_stock
    }

    /// Case-insensitive substring match against the name and every tag.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// A product as returned by a product store.
///
/// Older records carry a single `image` instead of the `images` sequence, and the optional
/// flags may be missing entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_upcoming: Option<bool>,
    #[serde(default)]
    pub is_out_of_stock: Option<bool>,
}

impl ProductRecord {
    /// Converts the record into the catalog shape.
    ///
    /// `images` wins when non-empty, otherwise the legacy `image` becomes the only entry.
    /// Records with neither, or with a negative price, are rejected.
    pub fn normalize(self) -> Result<Product, ProductError> {
        let images = if !self.images.is_empty() {
            self.images
        } else if let Some(image) = self.image.filter(|i| !i.is_empty()) {
            vec![image]
        } else {
            return Err(ProductError::MissingImage(self.id));
        };
        if self.price < Decimal::ZERO {
            return Err(ProductError::NegativePrice(self.price));
        }

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            price: self.price,
            category: self.category,
            images,
            description: self.description,
            rating: self.rating.unwrap_or(0.0).clamp(0.0, 5.0),
            reviews: self.reviews.unwrap_or(0),
            tags: self.tags,
            upcoming: self.is_upcoming.unwrap_or(false),
            out_of_stock: self.is_out_of_stock.unwrap_or(false),
        })
    }
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.as_str().to_string(),
            name: p.name,
            price: p.price,
            category: p.category,
            image: None,
            images: p.images,
            description: p.description,
            rating: Some(p.rating),
            reviews: Some(p.reviews),
            tags: p.tags,
            is_upcoming: Some(p.upcoming),
            is_out_of_stock: Some(p.out_of_stock),
        }
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub images: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub upcoming: bool,
    pub out_of_stock: bool,
}

/// Partial product update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    /// Replaces the whole sequence, which also moves the primary image.
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub upcoming: Option<bool>,
    pub out_of_stock: Option<bool>,
}
