//! # Storefront Engine Demo
//!
//! Walks one storefront through a day of trade against the in-memory stores:
//! 1. An operator seeds categories and products.
//! 2. A customer fills a cart, wishlists a product and checks out.
//! 3. The operator ships the order and the customer sees it move.
//!
//! ```bash
//! RUST_LOG=info cargo run -p storefront-engine
//! ```

use actor_framework::tracing::setup_tracing;
use rust_decimal::Decimal;
use storefront_engine::engine::{CatalogQuery, CheckoutOutcome, PaymentMethod, SortOrder, Storefront};
use storefront_engine::lifecycle::{EngineConfig, StoreSystem};
use storefront_engine::model::{OrderStatus, ProductDraft, Registration, ShippingDetails, StatusFilter};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = EngineConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting storefront engine demo");

    let system = StoreSystem::new(&config);

    // Operator seeds the catalog
    let mut back_office = Storefront::new(config.clone(), system.collaborators());
    async {
        back_office
            .register(Registration {
                name: "Store Admin".to_string(),
                email: "admin@shop.example".to_string(),
                password: "admin-pass".to_string(),
            })
            .await
            .map_err(|e| e.to_string())?;
        for category in ["Electronics", "Home"] {
            back_office
                .create_category(category)
                .await
                .map_err(|e| e.to_string())?;
        }
        for (name, price, category, tags, upcoming) in [
            ("Noise Cancelling Headphones", 4999, "Electronics", "audio,wireless", false),
            ("Ceramic Table Lamp", 1299, "Home", "lighting,decor", false),
            ("Smart Watch Gen 2", 8999, "Electronics", "wearable,fitness", true),
        ] {
            back_office
                .create_product(ProductDraft {
                    name: name.to_string(),
                    price: Decimal::new(price, 0),
                    category: category.to_string(),
                    images: vec![format!("{}.jpg", name.to_lowercase().replace(' ', "-"))],
                    tags: tags.split(',').map(str::to_string).collect(),
                    upcoming,
                    ..ProductDraft::default()
                })
                .await
                .map_err(|e| e.to_string())?;
        }
        Ok::<_, String>(())
    }
    .instrument(tracing::info_span!("catalog_seeding"))
    .await?;

    // Customer shops and checks out
    let mut shop = Storefront::new(config.clone(), system.collaborators());
    shop.start().await;
    let placed = async {
        shop.register(Registration {
            name: "Asha Rao".to_string(),
            email: "asha@shop.example".to_string(),
            password: "asha-pass".to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;

        for product in shop.catalog().featured(4) {
            info!(product = %product.name, "Coming soon");
        }
        let audio: Vec<_> = shop
            .search(&CatalogQuery::new().text("wireless").sort(SortOrder::PriceAsc))
            .into_iter()
            .map(|p| p.id.clone())
            .collect();
        let lamp = shop
            .search(&CatalogQuery::new().category("Home"))
            .first()
            .map(|p| p.id.clone())
            .ok_or("no home products")?;

        for id in &audio {
            shop.add_to_cart(id, 1).map_err(|e| e.to_string())?;
        }
        shop.add_to_cart(&lamp, 2).map_err(|e| e.to_string())?;
        shop.toggle_wishlist(&lamp).await.map_err(|e| e.to_string())?;

        let summary = shop.cart_summary();
        info!(
            items = shop.cart().item_count(),
            subtotal = %shop.format_money(summary.subtotal),
            estimated_tax = %shop.format_money(summary.estimated_tax),
            "Cart ready"
        );

        let contact = shop.session().display_name().to_string();
        let checkout = shop.begin_cart_checkout().map_err(|e| e.to_string())?;
        checkout
            .select_payment(PaymentMethod::Card)
            .map_err(|e| e.to_string())?;
        checkout.confirm_payment().map_err(|e| e.to_string())?;
        checkout
            .update_shipping(ShippingDetails {
                full_name: contact,
                street: "221 MG Road".to_string(),
                city: "Pune".to_string(),
                state: Some("Maharashtra".to_string()),
                postal_code: "411001".to_string(),
                phone: "+91 98000 00000".to_string(),
            })
            .map_err(|e| e.to_string())?;

        match shop.submit_checkout().await.map_err(|e| e.to_string())? {
            CheckoutOutcome::Settled(order) => {
                info!(
                    reference = %order.reference(),
                    total = %shop.format_money(order.total),
                    summary = %order.summary,
                    "Order placed"
                );
                Ok(order.id)
            }
            other => Err(format!("checkout did not settle: {other:?}")),
        }
    }
    .instrument(tracing::info_span!("customer_checkout"))
    .await;

    let order_id = match placed {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Customer checkout failed");
            return Err(e);
        }
    };

    // Operator fulfils the order
    async {
        back_office
            .refresh_all_orders()
            .await
            .map_err(|e| e.to_string())?;
        back_office
            .update_order_status(&order_id, OrderStatus::Shipped)
            .await
            .map_err(|e| e.to_string())?;
        for order in back_office.tracker().orders(StatusFilter::Only(OrderStatus::Shipped)) {
            let badge = order.status.badge();
            info!(
                reference = %order.reference(),
                status = badge.label,
                icon = badge.icon,
                tracking = ?order.tracking_number(),
                "Shipped order"
            );
        }
        Ok::<_, String>(())
    }
    .instrument(tracing::info_span!("fulfilment"))
    .await?;

    shop.refresh_my_orders().await.map_err(|e| e.to_string())?;
    info!(
        active = shop.tracker().active().len(),
        past = shop.tracker().past().len(),
        "Customer order history"
    );

    drop(shop);
    drop(back_office);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
