//! [`ActorEntity`] implementation for [`Product`].
//!
//! Drafts and patches are validated here, so the store never holds a product without an
//! image or with a negative price.

use super::ProductError;
use crate::model::{Product, ProductDraft, ProductId, ProductPatch};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// The product store has no operations beyond create, read, update and delete.
#[derive(Debug, Clone)]
pub enum ProductAction {}

fn check_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(())
}

fn check_price(price: Decimal) -> Result<(), ProductError> {
    if price < Decimal::ZERO {
        return Err(ProductError::NegativePrice(price));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductDraft;
    type Update = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ();
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, draft: ProductDraft) -> Result<Self, Self::Error> {
        check_name(&draft.name)?;
        check_price(draft.price)?;
        if draft.images.is_empty() {
            return Err(ProductError::MissingImage(id.to_string()));
        }

        Ok(Self {
            id,
            name: draft.name,
            price: draft.price,
            category: draft.category,
            images: draft.images,
            description: draft.description,
            rating: 0.0,
            reviews: 0,
            tags: draft.tags,
            upcoming: draft.upcoming,
            out_of_stock: draft.out_of_stock,
        })
    }

    /// Applies the patch only when every provided field is valid.
    async fn on_update(&mut self, patch: ProductPatch, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &patch.name {
            check_name(name)?;
        }
        if let Some(price) = patch.price {
            check_price(price)?;
        }
        if patch.images.as_ref().is_some_and(Vec::is_empty) {
            return Err(ProductError::MissingImage(self.id.to_string()));
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(upcoming) = patch.upcoming {
            self.upcoming = upcoming;
        }
        if let Some(out_of_stock) = patch.out_of_stock {
            self.out_of_stock = out_of_stock;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ProductAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
