//! # Session/Identity Holder
//!
//! Who is browsing: nobody, a customer or an operator. The capabilities derived from that
//! decide which actions the storefront offers. They are not a security boundary; the stores
//! of record enforce who may actually write.

use crate::account_actor::AccountError;
use crate::collaborators::IdentityProvider;
use crate::model::{Account, Credentials, Registration, Role};
use std::collections::BTreeSet;
use tracing::info;

/// Placeholder name shown when nobody is signed in.
pub const GUEST_NAME: &str = "Guest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Browse,
    Purchase,
    Wishlist,
    ViewOwnOrders,
    ManageCatalog,
    ManageOrders,
}

impl Capability {
    /// What a session with `role` (or none) may do.
    pub fn for_role(role: Option<Role>) -> BTreeSet<Capability> {
        use Capability::*;
        let granted: &[Capability] = match role {
            None => &[Browse, Purchase],
            Some(Role::Customer) => &[Browse, Purchase, Wishlist, ViewOwnOrders],
            Some(Role::Operator) => &[Browse, ManageCatalog, ManageOrders],
        };
        granted.iter().copied().collect()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    account: Option<Account>,
    guest_email: String,
}

impl Session {
    /// An anonymous session that checks out as `guest_email`.
    pub fn new(guest_email: impl Into<String>) -> Self {
        Self {
            account: None,
            guest_email: guest_email.into(),
        }
    }

    pub async fn login(
        &mut self,
        provider: &dyn IdentityProvider,
        credentials: &Credentials,
    ) -> Result<&Account, AccountError> {
        let account = provider.login(credentials).await?;
        Ok(self.adopt(account))
    }

    pub async fn register(
        &mut self,
        provider: &dyn IdentityProvider,
        registration: Registration,
    ) -> Result<&Account, AccountError> {
        let account = provider.register(registration).await?;
        Ok(self.adopt(account))
    }

    /// Signs in as an account the identity provider already vouched for.
    pub fn adopt(&mut self, account: Account) -> &Account {
        info!(account_id = %account.id, role = ?account.role, "Signed in");
        self.account.insert(account)
    }

    /// Signs out, returning who was signed in.
    pub fn logout(&mut self) -> Option<Account> {
        let account = self.account.take();
        if let Some(account) = &account {
            info!(account_id = %account.id, "Signed out");
        }
        account
    }

    /// Local profile edit. Ignored when anonymous or when the name is blank.
    pub fn rename(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if let Some(account) = self.account.as_mut() {
            account.name = name.to_string();
        }
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.account.as_ref().map(|a| a.role)
    }

    pub fn display_name(&self) -> &str {
        self.account.as_ref().map_or(GUEST_NAME, |a| a.name.as_str())
    }

    /// The email orders are placed under. The guest sentinel when anonymous.
    pub fn buyer_email(&self) -> &str {
        self.account
            .as_ref()
            .map_or(self.guest_email.as_str(), |a| a.email.as_str())
    }

    pub fn capabilities(&self) -> BTreeSet<Capability> {
        Capability::for_role(self.role())
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccountId;
    use async_trait::async_trait;

    struct OneAccount;

    #[async_trait]
    impl IdentityProvider for OneAccount {
        async fn login(&self, credentials: &Credentials) -> Result<Account, AccountError> {
            if credentials.password != "secret" {
                return Err(AccountError::InvalidCredentials);
            }
            Ok(Account {
                id: AccountId::from(1),
                name: "Asha".to_string(),
                email: credentials.email.clone(),
                role: Role::for_email(&credentials.email),
            })
        }

        async fn register(&self, registration: Registration) -> Result<Account, AccountError> {
            Ok(Account {
                id: AccountId::from(2),
                name: registration.name,
                role: Role::for_email(&registration.email),
                email: registration.email,
            })
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn anonymous_session_uses_guest_identity() {
        let session = Session::new("guest@example.com");
        assert_eq!(session.display_name(), GUEST_NAME);
        assert_eq!(session.buyer_email(), "guest@example.com");
        assert!(session.has(Capability::Purchase));
        assert!(!session.has(Capability::Wishlist));
        assert!(!session.has(Capability::ManageOrders));
    }

    #[tokio::test]
    async fn customer_login_grants_wishlist_and_orders() {
        let mut session = Session::new("guest@example.com");
        session
            .login(&OneAccount, &credentials("asha@example.com", "secret"))
            .await
            .unwrap();
        assert_eq!(session.buyer_email(), "asha@example.com");
        assert!(session.has(Capability::Wishlist));
        assert!(session.has(Capability::ViewOwnOrders));
        assert!(!session.has(Capability::ManageCatalog));
    }

    #[tokio::test]
    async fn operator_manages_but_does_not_purchase() {
        let mut session = Session::new("guest@example.com");
        session
            .login(&OneAccount, &credentials("admin@example.com", "secret"))
            .await
            .unwrap();
        assert_eq!(session.role(), Some(Role::Operator));
        assert!(session.has(Capability::ManageOrders));
        assert!(session.has(Capability::ManageCatalog));
        assert!(!session.has(Capability::Purchase));
    }

    #[tokio::test]
    async fn failed_login_leaves_session_anonymous() {
        let mut session = Session::new("guest@example.com");
        let err = session
            .login(&OneAccount, &credentials("asha@example.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::InvalidCredentials);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn register_rename_and_logout() {
        let mut session = Session::new("guest@example.com");
        session
            .register(
                &OneAccount,
                Registration {
                    name: "Ravi".to_string(),
                    email: "ravi@example.com".to_string(),
                    password: "pw".to_string(),
                },
            )
            .await
            .unwrap();
        session.rename("  Ravi K ");
        assert_eq!(session.display_name(), "Ravi K");
        session.rename(" ");
        assert_eq!(session.display_name(), "Ravi K");

        let gone = session.logout().unwrap();
        assert_eq!(gone.email, "ravi@example.com");
        assert_eq!(session.display_name(), GUEST_NAME);
        assert!(session.logout().is_none());
    }
}
