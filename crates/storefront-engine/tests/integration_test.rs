use rust_decimal::Decimal;
use std::time::{Duration, Instant};
use storefront_engine::engine::{
    CatalogQuery, CheckoutError, CheckoutOutcome, CheckoutPhase, SortOrder, Storefront,
    StorefrontError,
};
use storefront_engine::lifecycle::{EngineConfig, StoreSystem};
use storefront_engine::model::{
    Credentials, OrderStatus, ProductDraft, ProductId, Registration, ShippingDetails, StatusFilter,
};

fn draft(name: &str, price: i64, category: &str, tags: &[&str]) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price: Decimal::new(price, 0),
        category: category.to_string(),
        images: vec![format!("{name}.jpg")],
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..ProductDraft::default()
    }
}

fn shipping(name: &str) -> ShippingDetails {
    ShippingDetails {
        full_name: name.to_string(),
        street: "12 Residency Road".to_string(),
        city: "Bengaluru".to_string(),
        state: None,
        postal_code: "560025".to_string(),
        phone: "+91 90000 00000".to_string(),
    }
}

fn registration(name: &str, email: &str) -> Registration {
    Registration {
        name: name.to_string(),
        email: email.to_string(),
        password: "pw".to_string(),
    }
}

/// Seeds three products through an operator storefront, then returns a fresh storefront for
/// shoppers.
async fn seeded(config: EngineConfig) -> (StoreSystem, Storefront, Storefront) {
    let system = StoreSystem::new(&config);
    let mut operator = Storefront::new(config.clone(), system.collaborators());
    operator
        .register(registration("Ops", "admin@shop.example"))
        .await
        .expect("Failed to register operator");
    operator
        .create_product(draft("Headphones", 100, "Electronics", &["audio", "wireless"]))
        .await
        .expect("Failed to create product");
    operator
        .create_product(draft("Lamp", 40, "Home", &["lighting"]))
        .await
        .expect("Failed to create product");
    operator
        .create_product(draft("Kettle", 65, "Home", &["kitchen"]))
        .await
        .expect("Failed to create product");

    let mut shop = Storefront::new(config, system.collaborators());
    shop.start().await;
    (system, operator, shop)
}

/// Customer cart checkout through operator fulfilment, all on real actors.
#[tokio::test]
async fn test_full_storefront_integration() {
    let (system, mut operator, mut shop) = seeded(EngineConfig::default()).await;
    shop.register(registration("Asha", "asha@shop.example"))
        .await
        .expect("Failed to register customer");

    // Scenario A
    let headphones = ProductId::from(1);
    shop.add_to_cart(&headphones, 1).unwrap();
    assert_eq!(shop.cart().total(), Decimal::new(100, 0));
    shop.add_to_cart(&headphones, 2).unwrap();
    assert_eq!(shop.cart().line(&headphones).unwrap().quantity, 3);
    assert_eq!(shop.cart().total(), Decimal::new(300, 0));

    // Scenario B
    shop.set_cart_quantity(&headphones, 0).unwrap();
    assert_eq!(shop.cart().line(&headphones).unwrap().quantity, 3);

    // Scenario D
    let checkout = shop.begin_cart_checkout().unwrap();
    assert_eq!(checkout.shipping().full_name, "Asha");
    checkout.confirm_payment().unwrap();
    checkout.update_shipping(shipping("Asha")).unwrap();
    let order = match shop.submit_checkout().await.unwrap() {
        CheckoutOutcome::Settled(order) => order,
        other => panic!("Expected settled checkout, got {other:?}"),
    };
    assert_eq!(shop.checkout().unwrap().phase(), CheckoutPhase::Settled);
    assert!(shop.cart().is_empty());
    assert_eq!(order.summary, "3x Headphones");

    shop.refresh_my_orders().await.unwrap();
    let mine = shop.tracker().orders(StatusFilter::All);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, order.id);
    assert_eq!(mine[0].status, OrderStatus::Processing);

    // Operator ships it
    operator.refresh_all_orders().await.unwrap();
    operator
        .update_order_status(&order.id, OrderStatus::Shipped)
        .await
        .unwrap();
    let shipped = operator.tracker().get(&order.id).unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert!(shipped.tracking_number().is_some());
    assert_eq!(shipped.total, order.total);
    assert_eq!(shipped.lines, order.lines);

    shop.refresh_my_orders().await.unwrap();
    assert_eq!(shop.tracker().active()[0].status, OrderStatus::Shipped);

    drop(shop);
    drop(operator);
    system.shutdown().await.expect("Shutdown failed");
}

/// Cart edits made while the checkout form is open are part of the order.
#[tokio::test]
async fn test_cart_edits_during_checkout_are_ordered() {
    let (system, operator, mut shop) = seeded(EngineConfig::default()).await;
    let headphones = ProductId::from(1);
    let lamp = ProductId::from(2);

    shop.add_to_cart(&headphones, 1).unwrap();
    shop.begin_cart_checkout().unwrap().confirm_payment().unwrap();
    shop.add_to_cart(&lamp, 2).unwrap();
    shop.set_cart_quantity(&headphones, 5).unwrap();
    assert_eq!(shop.cart().total(), Decimal::new(580, 0));

    shop.checkout_mut()
        .unwrap()
        .update_shipping(shipping("Asha"))
        .unwrap();
    let order = match shop.submit_checkout().await.unwrap() {
        CheckoutOutcome::Settled(order) => order,
        other => panic!("Expected settled checkout, got {other:?}"),
    };
    assert_eq!(order.total, Decimal::new(580, 0));
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.summary, "5x Headphones, 2x Lamp");
    assert!(shop.cart().is_empty());

    drop(shop);
    drop(operator);
    system.shutdown().await.unwrap();
}

/// Emptying the cart behind an open checkout leaves nothing to order.
#[tokio::test]
async fn test_emptied_cart_cannot_be_submitted() {
    let (system, operator, mut shop) = seeded(EngineConfig::default()).await;
    let headphones = ProductId::from(1);

    shop.add_to_cart(&headphones, 1).unwrap();
    let checkout = shop.begin_cart_checkout().unwrap();
    checkout.confirm_payment().unwrap();
    checkout.update_shipping(shipping("Asha")).unwrap();
    shop.remove_from_cart(&headphones).unwrap();

    assert!(matches!(
        shop.submit_checkout().await,
        Err(StorefrontError::Checkout(CheckoutError::EmptySelection))
    ));
    assert_eq!(shop.checkout().unwrap().phase(), CheckoutPhase::Address);
    assert!(shop.tracker().is_empty());

    drop(shop);
    drop(operator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_guest_checkout_uses_sentinel_email() {
    let config = EngineConfig {
        guest_email: "walk-in@shop.example".to_string(),
        ..EngineConfig::default()
    };
    let (system, operator, mut shop) = seeded(config).await;

    let checkout = shop.begin_buy_now(&ProductId::from(2), 2).unwrap();
    checkout.confirm_payment().unwrap();
    checkout.update_shipping(shipping("Walk In")).unwrap();
    let outcome = shop.submit_checkout().await.unwrap();
    assert!(matches!(
        outcome,
        CheckoutOutcome::Settled(ref order) if order.buyer_email == "walk-in@shop.example"
    ));

    // Guests have no order history view.
    assert!(matches!(
        shop.refresh_my_orders().await,
        Err(StorefrontError::NotPermitted(_))
    ));

    drop(shop);
    drop(operator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_browse_and_search() {
    let (system, operator, shop) = seeded(EngineConfig::default()).await;

    assert_eq!(shop.search(&CatalogQuery::new().category("All")).len(), 3);
    assert_eq!(shop.search(&CatalogQuery::new().category("Home")).len(), 2);
    assert_eq!(
        shop.search(&CatalogQuery::new().text("wireless"))[0].name,
        "Headphones"
    );

    let newest: Vec<String> = shop
        .search(&CatalogQuery::new().sort(SortOrder::Newest))
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(newest, vec!["prod_0000000003", "prod_0000000002", "prod_0000000001"]);

    // No categories were registered, so the built-in list applies.
    assert_eq!(
        shop.catalog().category_options(),
        vec!["All", "Electronics", "Fashion", "Home", "Accessories"]
    );

    drop(shop);
    drop(operator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wishlist_survives_logout_and_cart_does_not() {
    let (system, operator, mut shop) = seeded(EngineConfig::default()).await;
    shop.register(registration("Ravi", "ravi@shop.example"))
        .await
        .unwrap();

    // Scenario F
    let p9 = ProductId::from(3);
    assert!(shop.toggle_wishlist(&p9).await.unwrap());
    assert!(shop.wishlist().contains(&p9));
    assert!(!shop.toggle_wishlist(&p9).await.unwrap());
    assert!(!shop.wishlist().contains(&p9));
    shop.toggle_wishlist(&p9).await.unwrap();
    assert_eq!(shop.wishlist_products()[0].name, "Kettle");

    shop.add_to_cart(&ProductId::from(1), 1).unwrap();
    let gone = shop.logout().unwrap();
    assert_eq!(gone.email, "ravi@shop.example");
    assert!(shop.cart().is_empty());
    assert!(shop.wishlist().contains(&p9));

    // Signing back in keeps the same wishlist.
    shop.login(&Credentials {
        email: "ravi@shop.example".to_string(),
        password: "pw".to_string(),
    })
    .await
    .unwrap();
    assert!(shop.wishlist().contains(&p9));

    drop(shop);
    drop(operator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_logout_can_keep_the_cart() {
    let config = EngineConfig {
        clear_cart_on_logout: false,
        ..EngineConfig::default()
    };
    let (system, operator, mut shop) = seeded(config).await;
    shop.add_to_cart(&ProductId::from(1), 1).unwrap();
    shop.logout();
    assert_eq!(shop.cart().item_count(), 1);

    drop(shop);
    drop(operator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_settled_checkout_expires() {
    let config = EngineConfig {
        settle_window: Duration::from_millis(250),
        ..EngineConfig::default()
    };
    let (system, operator, mut shop) = seeded(config).await;

    let checkout = shop.begin_buy_now(&ProductId::from(1), 1).unwrap();
    checkout.confirm_payment().unwrap();
    checkout.update_shipping(shipping("Asha")).unwrap();
    shop.submit_checkout().await.unwrap();

    let settled_at = shop.checkout().unwrap().settled_at().unwrap();
    assert!(!shop.tick(settled_at + Duration::from_millis(249)));
    assert_eq!(shop.checkout().unwrap().phase(), CheckoutPhase::Settled);
    assert!(shop.tick(settled_at + Duration::from_millis(250)));
    assert_eq!(shop.checkout().unwrap().phase(), CheckoutPhase::Closed);
    assert!(!shop.tick(Instant::now() + Duration::from_secs(60)));

    drop(shop);
    drop(operator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_operator_catalog_edits_are_written_through() {
    let (system, mut operator, mut shop) = seeded(EngineConfig::default()).await;

    operator.create_category("Garden").await.unwrap();
    assert!(matches!(
        operator.create_category("garden").await,
        Err(StorefrontError::Category(_))
    ));

    operator
        .update_product(
            &ProductId::from(2),
            storefront_engine::model::ProductPatch {
                price: Some(Decimal::new(35, 0)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(operator.delete_product(&ProductId::from(3)).await.unwrap());

    shop.refresh_catalog().await.unwrap();
    assert_eq!(shop.catalog().len(), 2);
    assert_eq!(
        shop.catalog().get(&ProductId::from(2)).unwrap().price,
        Decimal::new(35, 0)
    );

    // Shoppers cannot edit the catalog.
    assert!(matches!(
        shop.delete_product(&ProductId::from(1)).await,
        Err(StorefrontError::NotPermitted(_))
    ));

    drop(shop);
    drop(operator);
    system.shutdown().await.unwrap();
}
