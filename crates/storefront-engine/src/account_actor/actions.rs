//! Custom actions for stored identities.

/// Operations on an [`Identity`](crate::model::Identity) beyond CRUD.
#[derive(Debug, Clone)]
pub enum AccountAction {
    /// Compares the supplied password with the stored one. Returns whether they match.
    VerifyPassword(Secret),
}

/// A password travelling to the account actor. Never printed.
#[derive(Clone)]
pub struct Secret(pub String);

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Accounts cannot be edited through the provider; this type has no values.
#[derive(Debug, Clone)]
pub enum AccountUpdate {}
