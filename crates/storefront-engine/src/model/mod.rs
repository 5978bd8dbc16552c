//! # Domain Model
//!
//! Plain data shared by the collaborator actors and the engine components. Records that a
//! store of record owns (products, orders, accounts, categories) implement
//! [`ActorEntity`](actor_framework::ActorEntity) in their `*_actor` module; everything here is
//! just the shape of the data and the derivations that belong to it.

pub mod account;
pub mod category;
pub mod order;
pub mod product;

pub use account::*;
pub use category::*;
pub use order::*;
pub use product::*;

use rust_decimal::Decimal;

/// Declares a string identifier assigned by a store of record.
///
/// Store-assigned values are zero padded so that identifier order is creation order.
macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<u32> for $name {
            fn from(seq: u32) -> Self {
                Self(format!(concat!($prefix, "_{:010}"), seq))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

store_id!(
    /// Identifier of a product, assigned by the product store.
    ProductId,
    "prod"
);
store_id!(
    /// Identifier of an order, assigned by the order store.
    OrderId,
    "ord"
);
store_id!(
    /// Identifier of an account, assigned by the identity provider.
    AccountId,
    "acct"
);

/// Formats an amount for display, e.g. `₹1499.00`.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    format!("{symbol}{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_ids_are_zero_padded_and_ordered() {
        let first = ProductId::from(2);
        let later = ProductId::from(10);
        assert_eq!(first.as_str(), "prod_0000000002");
        assert_eq!(OrderId::from(1).to_string(), "ord_0000000001");
        assert_eq!(AccountId::from(7).to_string(), "acct_0000000007");
        assert!(first < later);
    }

    #[test]
    fn id_order_holds_across_the_whole_sequence_range() {
        assert!(OrderId::from(999_999) < OrderId::from(1_000_000));
        assert!(ProductId::from(4_000_000_000) < ProductId::from(u32::MAX));
        assert_eq!(ProductId::from(u32::MAX).as_str(), "prod_4294967295");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&ProductId::from("p1")).unwrap();
        assert_eq!(json, "\"p1\"");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(Decimal::new(1499, 0), "₹"), "₹1499.00");
        assert_eq!(format_money(Decimal::new(1999, 2), "$"), "$19.99");
    }
}
