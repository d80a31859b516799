use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ProductSummary;

// DB models

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub reference: String,
    pub status: String,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub shipping_fullname: String,
    pub shipping_email: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub discount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Shipping,
    Delivered,
    Canceled,
    Returned,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Returned => "returned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cod,
    Card,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cod" => Some(PaymentMethod::Cod),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Card => "card",
        }
    }
}

// Request types

#[derive(Debug, Deserialize)]
pub struct ShippingInfo {
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub shipping_info: ShippingInfo,
    pub payment_method: String,
}

/// Per-line snapshot taken at order time. Price and discount are copied from
/// the product so the order stays stable if catalog pricing changes later.
#[derive(Debug, Clone)]
pub struct OrderItemData {
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub discount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

// Response types

#[derive(Debug, Serialize)]
pub struct OrderLineView {
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub discount: Decimal,
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
    pub items: Vec<OrderLineView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_accepts_the_closed_set() {
        assert_eq!(PaymentMethod::parse("cod"), Some(PaymentMethod::Cod));
        assert_eq!(PaymentMethod::parse("card"), Some(PaymentMethod::Card));
    }

    #[test]
    fn payment_method_rejects_anything_else() {
        assert_eq!(PaymentMethod::parse("paypal"), None);
        assert_eq!(PaymentMethod::parse("CARD"), None);
        assert_eq!(PaymentMethod::parse(""), None);
    }

    #[test]
    fn order_status_round_trips_to_storage_form() {
        assert_eq!(OrderStatus::Pending.as_str(), "pending");
        assert_eq!(OrderStatus::Shipping.as_str(), "shipping");
        assert_eq!(OrderStatus::Delivered.as_str(), "delivered");
        assert_eq!(OrderStatus::Canceled.as_str(), "canceled");
        assert_eq!(OrderStatus::Returned.as_str(), "returned");
    }
}
