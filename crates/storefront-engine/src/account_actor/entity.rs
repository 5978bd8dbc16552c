//! [`ActorEntity`] implementation for [`Identity`].

use super::{AccountAction, AccountError, AccountUpdate};
use crate::model::{Account, AccountId, Identity, Registration, Role};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Identity {
    type Id = AccountId;
    type Create = Registration;
    type Update = AccountUpdate;
    type Action = AccountAction;
    type ActionResult = bool;
    type Context = ();
    type Error = AccountError;

    fn from_create_params(id: AccountId, reg: Registration) -> Result<Self, Self::Error> {
        if reg.name.trim().is_empty() {
            return Err(AccountError::MissingField("name"));
        }
        if reg.email.trim().is_empty() {
            return Err(AccountError::MissingField("email"));
        }
        if reg.password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }

        let email = reg.email.trim().to_string();
        Ok(Self {
            account: Account {
                id,
                name: reg.name.trim().to_string(),
                role: Role::for_email(&email),
                email,
            },
            password: reg.password,
        })
    }

    async fn on_update(&mut self, update: AccountUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: AccountAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            AccountAction::VerifyPassword(secret) => Ok(secret.0 == self.password),
        }
    }
}
