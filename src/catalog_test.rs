use super::*;

#[test]
fn demo_product_is_in_stock() {
    let p = demo_product();
    assert_eq!(p.id, "p123");
    assert!(p.stock > 0);
    assert!(p.price < p.original_price);
}

#[test]
fn demo_orders_carry_product_snapshots() {
    let orders = demo_orders();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].status, OrderStatus::Shipped);
    assert!(orders[0].tracking_number.is_some());
    assert_eq!(orders[1].status, OrderStatus::Delivered);
    assert!(orders[1].tracking_number.is_none());
    // Snapshots differ from the featured product.
    assert_ne!(orders[0].product.title, demo_product().title);
}

#[test]
fn order_status_serializes_customer_facing_labels() {
    let json = serde_json::to_value(OrderStatus::Shipped).unwrap();
    assert_eq!(json, "已发货");
    let parsed: OrderStatus = serde_json::from_value(serde_json::json!("待付款")).unwrap();
    assert_eq!(parsed, OrderStatus::PendingPayment);
    assert_eq!(OrderStatus::PendingShipment.label(), "待发货");
}

#[test]
fn order_omits_absent_tracking_number() {
    let order = demo_orders().remove(1);
    let json = serde_json::to_value(&order).unwrap();
    assert!(json.get("tracking_number").is_none());
}

#[test]
fn admin_stats_are_internally_consistent() {
    let stats = demo_admin_stats();
    assert_eq!(stats.weekly.len(), 7);
    assert_eq!(stats.sentiment.iter().map(|s| s.share).sum::<u32>(), 100);
    assert!(stats.handover_rate < 100.0);
}
