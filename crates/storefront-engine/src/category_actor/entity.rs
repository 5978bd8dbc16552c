//! [`ActorEntity`] implementation for [`Category`].

use super::CategoryError;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub enum CategoryAction {}

#[async_trait]
impl ActorEntity for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    type Action = CategoryAction;
    type ActionResult = ();
    type Context = ();
    type Error = CategoryError;

    fn from_create_params(id: CategoryId, params: CategoryCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
        })
    }

    async fn on_update(&mut self, update: CategoryUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: CategoryAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
