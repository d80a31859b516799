use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Order, OrderItem, OrderItemData, OrderStatus, OrderTotals, PaymentMethod, ShippingInfo},
};

/// Persists the order header and its line-item snapshots in one transaction,
/// so no partially written order is ever visible to readers.
pub async fn create_order_with_items(
    pool: &PgPool,
    user_id: i32,
    reference: &str,
    payment_method: PaymentMethod,
    shipping: &ShippingInfo,
    totals: &OrderTotals,
    items: &[OrderItemData],
) -> Result<Order> {
    let mut tx = pool.begin().await?;

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, reference, status, subtotal, discount, total,
         shipping_fullname, shipping_email, shipping_phone, shipping_address, payment_method)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING *",
    )
    .bind(user_id)
    .bind(reference)
    .bind(OrderStatus::Pending.as_str())
    .bind(totals.subtotal)
    .bind(totals.discount)
    .bind(totals.total)
    .bind(&shipping.fullname)
    .bind(&shipping.email)
    .bind(&shipping.phone)
    .bind(&shipping.address)
    .bind(payment_method.as_str())
    .fetch_one(&mut *tx)
    .await?;

    let product_ids: Vec<i32> = items.iter().map(|i| i.product_id).collect();
    let quantities: Vec<i32> = items.iter().map(|i| i.quantity).collect();
    let prices: Vec<Decimal> = items.iter().map(|i| i.price).collect();
    let discounts: Vec<Decimal> = items.iter().map(|i| i.discount).collect();

    sqlx::query(
        "INSERT INTO order_items (order_id, product_id, quantity, price, discount)
         SELECT $1, unnest($2::int[]), unnest($3::int[]), unnest($4::decimal[]), unnest($5::decimal[])",
    )
    .bind(order.id)
    .bind(&product_ids)
    .bind(&quantities)
    .bind(&prices)
    .bind(&discounts)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(order)
}

pub async fn get_user_orders(pool: &PgPool, user_id: i32) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn get_items_for_orders(pool: &PgPool, order_ids: &[i32]) -> Result<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id ASC",
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await?;

    Ok(items)
}
