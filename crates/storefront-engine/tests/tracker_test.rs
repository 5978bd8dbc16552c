use actor_framework::mock::MockClient;
use actor_framework::FrameworkError;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use storefront_engine::clients::OrderClient;
use storefront_engine::engine::{OrderTracker, TrackerError, TransitionPolicy};
use storefront_engine::model::{
    lines_total, Order, OrderId, OrderLine, OrderStatus, ProductId, ShippingDetails, StatusFilter,
};
use storefront_engine::order_actor::OrderError;

fn order(seq: u32, status: OrderStatus, age_minutes: i64) -> Order {
    let lines = vec![OrderLine {
        product_id: ProductId::from(seq),
        name: format!("Item {seq}"),
        unit_price: Decimal::new(120, 0),
        quantity: 2,
        image: None,
    }];
    let created = Utc::now() - Duration::minutes(age_minutes);
    Order {
        id: OrderId::from(seq),
        buyer_email: "asha@shop.example".to_string(),
        shipping: ShippingDetails::default(),
        total: lines_total(&lines),
        summary: Order::summarize(&lines),
        lines,
        status,
        created_at: created,
        updated_at: created,
    }
}

fn with_status(order: &Order, status: OrderStatus) -> Order {
    Order {
        status,
        updated_at: Utc::now(),
        ..order.clone()
    }
}

/// Scenario E: the write fails, the new status stays on screen and the order is divergent
/// until the next refresh brings back what the store holds.
#[tokio::test]
async fn test_failed_status_write_diverges_until_refresh() {
    let mut mock = MockClient::<Order>::new();
    let client = OrderClient::new(mock.client());
    let o5 = order(5, OrderStatus::Processing, 5);

    mock.expect_list().return_ok(vec![o5.clone()]);
    let mut tracker = OrderTracker::new(TransitionPolicy::Permissive);
    assert_eq!(tracker.refresh_all(&client).await.unwrap(), 1);

    mock.expect_update(o5.id.clone())
        .return_err(FrameworkError::ActorClosed);
    let err = tracker
        .update_status(&client, &o5.id, OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::RemoteWriteFailed {
            source: OrderError::ActorCommunicationError(_),
            ..
        }
    ));
    assert_eq!(tracker.get(&o5.id).unwrap().status, OrderStatus::Delivered);
    assert!(tracker.is_divergent(&o5.id));

    mock.expect_list().return_ok(vec![o5.clone()]);
    tracker.refresh_all(&client).await.unwrap();
    assert_eq!(tracker.get(&o5.id).unwrap().status, OrderStatus::Processing);
    assert!(tracker.divergent().is_empty());

    mock.verify();
}

#[tokio::test]
async fn test_saved_status_keeps_lines_and_total() {
    let mut mock = MockClient::<Order>::new();
    let client = OrderClient::new(mock.client());
    let o1 = order(1, OrderStatus::Processing, 1);

    mock.expect_list().return_ok(vec![o1.clone()]);
    let mut tracker = OrderTracker::default();
    tracker.refresh_all(&client).await.unwrap();

    mock.expect_update(o1.id.clone())
        .return_ok(with_status(&o1, OrderStatus::Shipped));
    tracker
        .update_status(&client, &o1.id, OrderStatus::Shipped)
        .await
        .unwrap();

    let shipped = tracker.get(&o1.id).unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.total, Decimal::new(240, 0));
    assert_eq!(shipped.lines, o1.lines);
    assert_eq!(shipped.summary, o1.summary);
    assert_eq!(shipped.created_at, o1.created_at);
    assert!(!tracker.is_divergent(&o1.id));

    mock.verify();
}

#[tokio::test]
async fn test_forward_only_rejects_backwards_without_a_write() {
    let mut mock = MockClient::<Order>::new();
    let client = OrderClient::new(mock.client());
    let delivered = order(2, OrderStatus::Delivered, 3);

    mock.expect_list().return_ok(vec![delivered.clone()]);
    let mut tracker = OrderTracker::new(TransitionPolicy::ForwardOnly);
    tracker.refresh_all(&client).await.unwrap();

    let err = tracker
        .update_status(&client, &delivered.id, OrderStatus::Processing)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::TransitionRejected {
            from: OrderStatus::Delivered,
            to: OrderStatus::Processing
        }
    ));
    assert_eq!(tracker.get(&delivered.id).unwrap().status, OrderStatus::Delivered);

    // Same status is a no-op and sends nothing either.
    tracker
        .update_status(&client, &delivered.id, OrderStatus::Delivered)
        .await
        .unwrap();

    mock.verify();
}

#[tokio::test]
async fn test_unknown_order_and_refresh_failure() {
    let mut mock = MockClient::<Order>::new();
    let client = OrderClient::new(mock.client());

    mock.expect_list()
        .return_ok(vec![order(1, OrderStatus::Processing, 20), order(2, OrderStatus::Returned, 10)]);
    let mut tracker = OrderTracker::default();
    tracker.refresh_all(&client).await.unwrap();

    let missing = OrderId::from(9);
    assert!(matches!(
        tracker.update_status(&client, &missing, OrderStatus::Shipped).await,
        Err(TrackerError::UnknownOrder(ref id)) if id == &missing
    ));

    // A failed refresh keeps the cached orders.
    mock.expect_list().return_err(FrameworkError::ActorDropped);
    assert!(matches!(
        tracker.refresh_all(&client).await,
        Err(TrackerError::Refresh(_))
    ));
    assert_eq!(tracker.len(), 2);

    let ids: Vec<String> = tracker
        .orders(StatusFilter::All)
        .iter()
        .map(|o| o.id.to_string())
        .collect();
    assert_eq!(ids, vec!["ord_0000000002", "ord_0000000001"]);
    assert_eq!(tracker.active().len(), 1);
    assert_eq!(tracker.past().len(), 1);

    mock.verify();
}
