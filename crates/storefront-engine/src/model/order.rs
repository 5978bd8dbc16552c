/// Orders, their fulfilment status and the shipping details captured at checkout.
///
/// # Actor Framework
/// [`Order`] implements [`ActorEntity`](actor_framework::ActorEntity) in
/// [`crate::order_actor`]: [`OrderDraft`] creates it and [`StatusChange`] is the only update
/// the store accepts. Lines, total and summary never change after creation.
use crate::model::{OrderId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Returned,
}

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Amber,
    Violet,
    Green,
    Slate,
}

/// Display mapping of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub icon: &'static str,
    pub tone: BadgeTone,
}

impl OrderStatus {
    /// Every status, in fulfilment order. Also the operator's status selector.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Returned,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Returned => "Returned",
        }
    }

    pub fn badge(self) -> StatusBadge {
        let (icon, tone) = match self {
            OrderStatus::Processing => ("clock", BadgeTone::Amber),
            OrderStatus::Shipped => ("truck", BadgeTone::Violet),
            OrderStatus::Delivered => ("check-circle", BadgeTone::Green),
            OrderStatus::Returned => ("rotate-ccw", BadgeTone::Slate),
        };
        StatusBadge {
            label: self.label(),
            icon,
            tone,
        }
    }

    /// Active orders are still on their way; the rest are past orders.
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Processing | OrderStatus::Shipped)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// The operator's status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// Labels offered by the filter control, "All" first.
    pub fn options() -> Vec<&'static str> {
        std::iter::once("All")
            .chain(OrderStatus::ALL.into_iter().map(OrderStatus::label))
            .collect()
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// A purchased line, captured when the order is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image: Option<String>,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Sum of unit price times quantity over the lines.
pub fn lines_total(lines: &[OrderLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.line_total()))
}

/// A shipping form field that must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    FullName,
    Street,
    City,
    PostalCode,
    Phone,
}

impl ShippingField {
    pub fn label(self) -> &'static str {
        match self {
            ShippingField::FullName => "full name",
            ShippingField::Street => "street address",
            ShippingField::City => "city",
            ShippingField::PostalCode => "postal code",
            ShippingField::Phone => "phone",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipping form. Only presence is checked, never format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub street: String,
    pub city: String,
    /// State or region; optional.
    pub state: Option<String>,
    pub postal_code: String,
    pub phone: String,
}

impl ShippingDetails {
    /// Required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<ShippingField> {
        [
            (ShippingField::FullName, &self.full_name),
            (ShippingField::Street, &self.street),
            (ShippingField::City, &self.city),
            (ShippingField::PostalCode, &self.postal_code),
            (ShippingField::Phone, &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn first_missing(&self) -> Option<ShippingField> {
        self.missing_fields().into_iter().next()
    }
}

/// Payload for creating an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub buyer_email: String,
    pub shipping: ShippingDetails,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
}

impl OrderDraft {
    /// Builds a draft whose total is derived from the lines.
    pub fn new(buyer_email: impl Into<String>, shipping: ShippingDetails, lines: Vec<OrderLine>) -> Self {
        let total = lines_total(&lines);
        Self {
            buyer_email: buyer_email.into(),
            shipping,
            lines,
            total,
        }
    }
}

/// The only mutation an order accepts after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: OrderStatus,
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_email: String,
    pub shipping: ShippingDetails,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    /// Denormalized "2x Name, 1x Other".
    pub summary: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn summarize(lines: &[OrderLine]) -> String {
        lines
            .iter()
            .map(|line| format!("{}x {}", line.quantity, line.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Short reference shown to the buyer, e.g. `#ORD_0000`.
    pub fn reference(&self) -> String {
        format!("#{}", id_prefix(&self.id, 8))
    }

    /// Carrier tracking number, only while the order is shipped.
    pub fn tracking_number(&self) -> Option<String> {
        (self.status == OrderStatus::Shipped).then(|| format!("TRK{}", id_prefix(&self.id, 9)))
    }

    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }
}

fn id_prefix(id: &OrderId, len: usize) -> String {
    id.as_str().chars().take(len).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, price: i64, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId::from(name),
            name: name.to_string(),
            unit_price: Decimal::new(price, 0),
            quantity,
            image: None,
        }
    }

    fn order(status: OrderStatus) -> Order {
        let lines = vec![line("Lamp", 100, 2), line("Rug", 50, 1)];
        Order {
            id: OrderId::from("ord_0000000042"),
            buyer_email: "a@b.c".to_string(),
            shipping: ShippingDetails::default(),
            total: lines_total(&lines),
            summary: Order::summarize(&lines),
            lines,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn every_status_has_a_badge() {
        for status in OrderStatus::ALL {
            let badge = status.badge();
            assert_eq!(badge.label, status.label());
            assert!(!badge.icon.is_empty());
        }
    }

    #[test]
    fn status_round_trips_through_labels() {
        for status in OrderStatus::ALL {
            assert_eq!(status.label().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("Lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn filter_parses_selector_labels() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Shipped".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(OrderStatus::Shipped)
        );
        assert_eq!(StatusFilter::options()[0], "All");
        assert_eq!(StatusFilter::options().len(), 5);
    }

    #[test]
    fn active_and_past_split() {
        assert!(OrderStatus::Processing.is_active());
        assert!(OrderStatus::Shipped.is_active());
        assert!(!OrderStatus::Delivered.is_active());
        assert!(!OrderStatus::Returned.is_active());
    }

    #[test]
    fn summary_and_total_come_from_lines() {
        let o = order(OrderStatus::Processing);
        assert_eq!(o.summary, "2x Lamp, 1x Rug");
        assert_eq!(o.total, Decimal::new(250, 0));
        assert_eq!(o.item_count(), 3);
    }

    #[test]
    fn reference_and_tracking_number() {
        assert_eq!(order(OrderStatus::Processing).reference(), "#ORD_0000");
        assert_eq!(order(OrderStatus::Processing).tracking_number(), None);
        assert_eq!(
            order(OrderStatus::Shipped).tracking_number().as_deref(),
            Some("TRKORD_00000")
        );
    }

    #[test]
    fn missing_fields_in_form_order() {
        let shipping = ShippingDetails {
            full_name: "Asha".to_string(),
            street: " ".to_string(),
            city: "Pune".to_string(),
            state: None,
            postal_code: "411001".to_string(),
            phone: String::new(),
        };
        assert_eq!(
            shipping.missing_fields(),
            vec![ShippingField::Street, ShippingField::Phone]
        );
        assert_eq!(shipping.first_missing(), Some(ShippingField::Street));
    }
}
