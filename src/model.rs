//! Record types for the seeded e-commerce tables.
//!
//! Each record maps 1:1 onto a row of the target schema. Money amounts are
//! whole currency units; timestamps are naive local datetimes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Order lifecycle status as stored in `orders.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order item status as stored in `order_items.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemStatus {
    #[default]
    Normal,
    Canceled,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Normal => "NORMAL",
            ItemStatus::Canceled => "CANCELED",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock_quantity: i64,
    pub view_count: i64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub id: i64,
    pub product_id: i64,
    pub viewed_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub order_number: String,
    pub total_amount: i64,
    pub discount_amount: i64,
    pub final_amount: i64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub version: i64,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Snapshot of the product name at order time
    pub product_name: String,
    pub price: i64,
    pub quantity: i64,
    pub status: ItemStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity
    }
}

/// Everything produced by one generator run, in emission order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub views: Vec<ProductView>,
    pub orders: Vec<Order>,
}

impl Dataset {
    pub fn item_count(&self) -> usize {
        self.orders.iter().map(|o| o.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_yaml_names() {
        let status: OrderStatus = serde_yaml_ng::from_str("COMPLETED").unwrap();
        assert_eq!(status, OrderStatus::Completed);
        assert_eq!(status.to_string(), "COMPLETED");
    }
}
