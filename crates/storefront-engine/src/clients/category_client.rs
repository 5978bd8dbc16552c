//! # Category Client
//!
//! Wraps a `ResourceClient<Category>` and serves it as a [`CategoryRegistry`].
use super::resource_error;
use crate::category_actor::CategoryError;
use crate::collaborators::CategoryRegistry;
use crate::model::{Category, CategoryCreate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Category actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: ResourceClient<Category>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &ResourceClient<Category> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        resource_error(e, CategoryError::from)
    }
}

#[async_trait]
impl CategoryRegistry for CategoryClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<String>, CategoryError> {
        debug!("Sending request");
        let categories = ActorClient::list(self).await?;
        Ok(categories.into_iter().map(|c| c.name).collect())
    }

    /// Rejects names that already exist, ignoring case.
    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<String, CategoryError> {
        debug!("Sending request");
        let existing = CategoryRegistry::list(self).await?;
        if let Some(taken) = existing.iter().find(|n| n.eq_ignore_ascii_case(name.trim())) {
            return Err(CategoryError::Duplicate(taken.clone()));
        }
        self.inner
            .create(CategoryCreate {
                name: name.to_string(),
            })
            .await
            .map(|category| category.name)
            .map_err(Self::map_error)
    }
}
