//! Catalog — storefront domain types and demo data.
//!
//! DESIGN
//! ======
//! Products and orders are immutable snapshots: whichever screen fetched them
//! owns them, and nothing mutates them after load. The demo ships with a fixed
//! catalog (one product, two orders) and canned dashboard metrics — there is
//! no inventory or fulfillment system behind any of this.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// PRODUCT
// =============================================================================

/// A storefront product. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub original_price: f64,
    pub image: String,
    pub sold: u32,
    pub stock: u32,
    pub tags: Vec<String>,
}

// =============================================================================
// ORDER
// =============================================================================

/// Lifecycle status of an order. Serialized with the storefront's
/// customer-facing Chinese labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "已发货")]
    Shipped,
    #[serde(rename = "待付款")]
    PendingPayment,
    #[serde(rename = "已送达")]
    Delivered,
    #[serde(rename = "已退款")]
    Refunded,
    #[serde(rename = "待发货")]
    PendingShipment,
}

impl OrderStatus {
    /// Customer-facing label, matching the serialized form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Shipped => "已发货",
            Self::PendingPayment => "待付款",
            Self::Delivered => "已送达",
            Self::Refunded => "已退款",
            Self::PendingShipment => "待发货",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An order with an embedded product snapshot taken at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub product: Product,
    pub status: OrderStatus,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

// =============================================================================
// DEMO DATA
// =============================================================================

/// The featured demo product.
#[must_use]
pub fn demo_product() -> Product {
    Product {
        id: "p123".into(),
        title: "夏季纯棉T恤透气男女同款宽松版型 Ins潮牌".into(),
        price: 9.99,
        original_price: 25.00,
        image: "https://picsum.photos/400/400".into(),
        sold: 4500,
        stock: 120,
        tags: vec!["退货包运费".into(), "极速退款".into(), "全场包邮".into()],
    }
}

/// The demo order history.
#[must_use]
pub fn demo_orders() -> Vec<Order> {
    let base = demo_product();
    vec![
        Order {
            id: "ORD-998811".into(),
            status: OrderStatus::Shipped,
            date: "2023-10-25".into(),
            tracking_number: Some("SF1234567890".into()),
            product: Product {
                title: "无线蓝牙降噪耳机 超长续航".into(),
                image: "https://picsum.photos/400/401".into(),
                price: 29.99,
                ..base.clone()
            },
        },
        Order {
            id: "ORD-776655".into(),
            status: OrderStatus::Delivered,
            date: "2023-10-15".into(),
            tracking_number: None,
            product: Product {
                title: "北欧风陶瓷咖啡杯套装 精致礼盒".into(),
                image: "https://picsum.photos/400/402".into(),
                price: 15.50,
                ..base
            },
        },
    ]
}

// =============================================================================
// ADMIN DASHBOARD
// =============================================================================

/// One day of query volume on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayVolume {
    pub day: String,
    pub queries: u32,
    pub handover: u32,
}

/// One slice of the sentiment breakdown (shares sum to 100).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSlice {
    pub label: String,
    pub share: u32,
}

/// Support-bot metrics shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_queries: u32,
    pub handover_rate: f64,
    pub satisfaction: f64,
    pub avg_response_secs: f64,
    pub weekly: Vec<DayVolume>,
    pub sentiment: Vec<SentimentSlice>,
}

/// Canned dashboard metrics for the demo.
#[must_use]
pub fn demo_admin_stats() -> AdminStats {
    let day = |day: &str, queries, handover| DayVolume { day: day.into(), queries, handover };
    let slice = |label: &str, share| SentimentSlice { label: label.into(), share };
    AdminStats {
        total_queries: 24_592,
        handover_rate: 4.2,
        satisfaction: 4.8,
        avg_response_secs: 0.8,
        weekly: vec![
            day("周一", 4000, 240),
            day("周二", 3000, 139),
            day("周三", 2000, 980),
            day("周四", 2780, 390),
            day("周五", 1890, 480),
            day("周六", 2390, 380),
            day("周日", 3490, 430),
        ],
        sentiment: vec![slice("正面", 70), slice("中性", 20), slice("负面", 10)],
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
