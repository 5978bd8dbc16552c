//! # Cart Aggregator
//!
//! Line items keyed by product id. Quantities stay between one and [`MAX_LINE_QUANTITY`]:
//! lowering a line to zero is ignored, larger counts are capped, and only [`Cart::remove`],
//! [`Cart::clear`] or [`Cart::take_ordered`] take a line away. Totals are recomputed from the
//! lines on every read.

use crate::model::{lines_total, OrderLine, Product, ProductId};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Most units a single cart line holds.
pub const MAX_LINE_QUANTITY: u32 = 9_999;

/// A product snapshot taken when it was added, plus a quantity of at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// The line as it will be written into an order.
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            unit_price: self.product.price,
            quantity: self.quantity,
            image: self.product.primary_image().map(str::to_string),
        }
    }
}

/// Display figures for the cart page. The order total stays the plain subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub estimated_tax: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` units (zero counts as one). An existing line grows; otherwise a new line
    /// is appended with the product as it is now. Lines are capped at [`MAX_LINE_QUANTITY`].
    pub fn add(&mut self, product: &Product, count: u32) {
        let count = count.clamp(1, MAX_LINE_QUANTITY);
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(count).min(MAX_LINE_QUANTITY);
                debug!(product_id = %product.id, quantity = line.quantity, "Cart line merged");
            }
            None => {
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity: count,
                });
                debug!(product_id = %product.id, quantity = count, "Cart line added");
            }
        }
    }

    pub fn remove(&mut self, id: &ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product.id != id);
        if self.lines.len() != before {
            debug!(product_id = %id, "Cart line removed");
        }
    }

    /// Sets the quantity of an existing line. Zero is ignored and leaves the line as it was;
    /// anything above [`MAX_LINE_QUANTITY`] is capped.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity < 1 {
            debug!(product_id = %id, "Ignoring quantity below one");
            return;
        }
        let quantity = quantity.min(MAX_LINE_QUANTITY);
        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
            debug!(product_id = %id, quantity, "Cart quantity set");
        }
    }

    pub fn increment(&mut self, id: &ProductId) {
        if let Some(line) = self.line_mut(id) {
            let quantity = line.quantity.saturating_add(1);
            self.set_quantity(id, quantity);
        }
    }

    /// A line at quantity one stays at one.
    pub fn decrement(&mut self, id: &ProductId) {
        if let Some(line) = self.line(id) {
            let quantity = line.quantity.saturating_sub(1);
            self.set_quantity(id, quantity);
        }
    }

    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            info!(lines = self.lines.len(), "Cart cleared");
        }
        self.lines.clear();
    }

    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.line_total()))
    }

    /// Free shipping and an estimated tax of `subtotal * tax_rate`.
    pub fn summary(&self, tax_rate: Decimal) -> CartSummary {
        let subtotal = self.total();
        let shipping = Decimal::ZERO;
        let estimated_tax = (subtotal * tax_rate).round_dp(2);
        CartSummary {
            subtotal,
            shipping,
            estimated_tax,
            total: subtotal + shipping + estimated_tax,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == id)
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.product.id == id)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Order lines with name, price and image captured now.
    pub fn snapshot_lines(&self) -> Vec<OrderLine> {
        let lines: Vec<OrderLine> = self.lines.iter().map(CartLine::to_order_line).collect();
        debug_assert_eq!(lines_total(&lines), self.total());
        lines
    }

    /// Takes the units of a settled order out of the cart. Lines that were added or grown
    /// after the order was captured keep their extra units.
    pub fn take_ordered(&mut self, ordered: &[OrderLine]) {
        for item in ordered {
            if let Some(line) = self.line_mut(&item.product_id) {
                line.quantity = line.quantity.saturating_sub(item.quantity);
            }
        }
        let before = self.lines.len();
        self.lines.retain(|l| l.quantity > 0);
        info!(
            removed = before - self.lines.len(),
            remaining = self.lines.len(),
            "Ordered lines taken out of the cart"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: Decimal::new(price, 0),
            category: "Home".to_string(),
            images: vec![format!("{id}.jpg")],
            description: String::new(),
            rating: 0.0,
            reviews: 0,
            tags: vec![],
            upcoming: false,
            out_of_stock: false,
        }
    }

    #[test]
    fn add_merges_lines() {
        let mut cart = Cart::new();
        let p = product("p1", 10);
        cart.add(&p, 2);
        cart.add(&p, 3);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&p.id).unwrap().quantity, 5);
    }

    #[test]
    fn zero_count_is_clamped_to_one() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 10), 0);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn scenario_a_totals() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100);
        cart.add(&p1, 1);
        assert_eq!(cart.total(), Decimal::new(100, 0));
        cart.add(&p1, 2);
        assert_eq!(cart.line(&p1.id).unwrap().quantity, 3);
        assert_eq!(cart.total(), Decimal::new(300, 0));
    }

    #[test]
    fn scenario_b_quantity_floor() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100);
        cart.add(&p1, 3);
        cart.set_quantity(&p1.id, 0);
        assert_eq!(cart.line(&p1.id).unwrap().quantity, 3);
    }

    #[test]
    fn decrement_stops_at_one() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100);
        cart.add(&p1, 2);
        cart.decrement(&p1.id);
        cart.decrement(&p1.id);
        cart.decrement(&p1.id);
        assert_eq!(cart.line(&p1.id).unwrap().quantity, 1);
        cart.increment(&p1.id);
        assert_eq!(cart.line(&p1.id).unwrap().quantity, 2);
    }

    #[test]
    fn total_follows_every_quantity_change() {
        let mut cart = Cart::new();
        let a = product("a", 15);
        let b = product("b", 4);
        cart.add(&a, 1);
        cart.add(&b, 5);
        cart.set_quantity(&a.id, 4);
        assert_eq!(cart.total(), Decimal::new(15 * 4 + 4 * 5, 0));
        cart.remove(&b.id);
        assert_eq!(cart.total(), Decimal::new(60, 0));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut cart = Cart::new();
        cart.add(&product("a", 15), 1);
        cart.remove(&ProductId::from("zz"));
        cart.set_quantity(&ProductId::from("zz"), 9);
        cart.increment(&ProductId::from("zz"));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn summary_adds_estimated_tax() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000), 1);
        let summary = cart.summary(Decimal::new(8, 2));
        assert_eq!(summary.subtotal, Decimal::new(1000, 0));
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.estimated_tax, Decimal::new(80, 0));
        assert_eq!(summary.total, Decimal::new(1080, 0));
    }

    #[test]
    fn snapshot_captures_price_at_checkout() {
        let mut cart = Cart::new();
        cart.add(&product("a", 20), 2);
        let lines = cart.snapshot_lines();
        assert_eq!(lines[0].unit_price, Decimal::new(20, 0));
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].image.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn huge_counts_are_capped_and_never_overflow() {
        let mut cart = Cart::new();
        let a = product("a", 10);
        let b = product("b", 1);
        cart.add(&a, u32::MAX);
        cart.add(&a, u32::MAX);
        cart.add(&b, 1);
        assert_eq!(cart.line(&a.id).unwrap().quantity, MAX_LINE_QUANTITY);
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY + 1);
        assert_eq!(
            cart.total(),
            Decimal::from(MAX_LINE_QUANTITY) * Decimal::new(10, 0) + Decimal::ONE
        );

        cart.set_quantity(&b.id, u32::MAX);
        assert_eq!(cart.line(&b.id).unwrap().quantity, MAX_LINE_QUANTITY);
        cart.increment(&b.id);
        assert_eq!(cart.item_count(), 2 * MAX_LINE_QUANTITY);
    }

    #[test]
    fn take_ordered_keeps_units_added_later() {
        let mut cart = Cart::new();
        let a = product("a", 100);
        let b = product("b", 40);
        cart.add(&a, 1);
        let ordered = cart.snapshot_lines();
        cart.add(&a, 2);
        cart.add(&b, 2);

        cart.take_ordered(&ordered);
        assert_eq!(cart.line(&a.id).unwrap().quantity, 2);
        assert_eq!(cart.line(&b.id).unwrap().quantity, 2);

        let rest = cart.snapshot_lines();
        cart.take_ordered(&rest);
        assert!(cart.is_empty());
    }
}
