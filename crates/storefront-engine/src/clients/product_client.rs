//! # Product Client
//!
//! Wraps a `ResourceClient<Product>` and serves it as a [`ProductStore`].
use super::resource_error;
use crate::collaborators::ProductStore;
use crate::model::{Product, ProductDraft, ProductId, ProductPatch, ProductRecord};
use crate::product_actor::ProductError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        resource_error(e, ProductError::NotFound)
    }
}

#[async_trait]
impl ProductStore for ProductClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<ProductRecord>, ProductError> {
        debug!("Sending request");
        let products = ActorClient::list(self).await?;
        Ok(products.into_iter().map(ProductRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, draft: ProductDraft) -> Result<ProductRecord, ProductError> {
        debug!("Sending request");
        self.inner
            .create(draft)
            .await
            .map(ProductRecord::from)
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<ProductRecord, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id.clone(), patch)
            .await
            .map(ProductRecord::from)
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ProductId) -> Result<bool, ProductError> {
        debug!("Sending request");
        match ActorClient::delete(self, id.clone()).await {
            Ok(()) => Ok(true),
            Err(ProductError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
