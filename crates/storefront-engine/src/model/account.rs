/// Accounts known to the identity provider.
///
/// # Actor Framework
/// The in-memory identity provider stores [`Identity`] (an account plus its password) as an
/// [`ActorEntity`](actor_framework::ActorEntity) in [`crate::account_actor`]. Only the
/// [`Account`] half ever leaves the provider.
use crate::model::AccountId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Customer,
    Operator,
}

impl Role {
    /// Operator accounts are recognized by "admin" in the identifier.
    pub fn for_email(email: &str) -> Self {
        if email.to_lowercase().contains("admin") {
            Role::Operator
        } else {
            Role::Customer
        }
    }
}

/// What the identity provider reports about a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A stored account with its secret.
#[derive(Clone)]
pub struct Identity {
    pub account: Account,
    pub(crate) password: String,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("account", &self.account)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Payload for registering an account.
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
