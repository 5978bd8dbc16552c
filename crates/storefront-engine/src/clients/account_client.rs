//! # Account Client
//!
//! Wraps a `ResourceClient<Identity>` and serves it as an [`IdentityProvider`].
use super::resource_error;
use crate::account_actor::{AccountAction, AccountError, Secret};
use crate::collaborators::IdentityProvider;
use crate::model::{Account, Credentials, Identity, Registration};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Identity>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Identity>) -> Self {
        Self { inner }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AccountError> {
        let identities = self.list().await?;
        Ok(identities
            .into_iter()
            .find(|identity| identity.account.email.eq_ignore_ascii_case(email.trim())))
    }
}

#[async_trait]
impl ActorClient<Identity> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Identity> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        resource_error(e, AccountError::from)
    }
}

#[async_trait]
impl IdentityProvider for AccountClient {
    #[instrument(skip(self))]
    async fn login(&self, credentials: &Credentials) -> Result<Account, AccountError> {
        debug!("Sending request");
        let identity = self
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let verified = self
            .inner
            .perform_action(
                identity.account.id.clone(),
                AccountAction::VerifyPassword(Secret(credentials.password.clone())),
            )
            .await
            .map_err(Self::map_error)?;
        if !verified {
            return Err(AccountError::InvalidCredentials);
        }
        info!(account_id = %identity.account.id, "Signed in");
        Ok(identity.account)
    }

    #[instrument(skip(self))]
    async fn register(&self, registration: Registration) -> Result<Account, AccountError> {
        debug!("Sending request");
        if self.find_by_email(&registration.email).await?.is_some() {
            return Err(AccountError::EmailTaken(registration.email.trim().to_string()));
        }
        let identity = self.inner.create(registration).await.map_err(Self::map_error)?;
        info!(account_id = %identity.account.id, role = ?identity.account.role, "Registered");
        Ok(identity.account)
    }
}
