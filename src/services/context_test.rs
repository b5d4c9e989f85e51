use super::*;
use crate::catalog::{self, OrderStatus, Product};

fn tshirt() -> Product {
    Product {
        id: "p1".into(),
        title: "T-Shirt".into(),
        price: 9.99,
        original_price: 25.0,
        image: "https://example.test/t.png".into(),
        sold: 4500,
        stock: 120,
        tags: vec![],
    }
}

#[test]
fn general_context_appends_nothing() {
    let ctx = ChatContext::General;
    assert!(ctx.annotation().is_none());
    assert_eq!(ctx.inject("有货吗"), "有货吗");
}

#[test]
fn product_annotation_contains_title_price_stock() {
    let ctx = ChatContext::Product(tshirt());
    let injected = ctx.inject("有货吗");
    assert!(injected.starts_with("有货吗\n[系统上下文]"));
    assert!(injected.contains("T-Shirt"));
    assert!(injected.contains("9.99"));
    assert!(injected.contains("120"));
}

#[test]
fn order_annotation_contains_id_status_title() {
    let mut order = catalog::demo_orders().remove(0);
    order.status = OrderStatus::Shipped;
    let ctx = ChatContext::Order(order.clone());
    let injected = ctx.inject("到哪了");
    assert!(injected.contains(&order.id));
    assert!(injected.contains("已发货"));
    assert!(injected.contains(&order.product.title));
}

#[test]
fn annotation_is_deterministic() {
    let ctx = ChatContext::Product(tshirt());
    assert_eq!(ctx.annotation(), ctx.annotation());
    assert_eq!(ctx.inject("同一句话"), ctx.inject("同一句话"));
}
