use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CartItem, CartItemRequest},
};

pub async fn get_cart(pool: &PgPool, user_id: i32) -> Result<Vec<CartItem>> {
    let items = sqlx::query_as::<_, CartItem>(
        "SELECT * FROM cart_items WHERE user_id = $1 ORDER BY id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Replaces the user's cart wholesale. Delete + insert run in one
/// transaction so readers never observe a half-replaced cart.
pub async fn replace_cart(
    pool: &PgPool,
    user_id: i32,
    items: &[CartItemRequest],
) -> Result<Vec<CartItem>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let product_ids: Vec<i32> = items.iter().map(|i| i.product_id).collect();
    let quantities: Vec<i32> = items.iter().map(|i| i.quantity).collect();

    sqlx::query(
        "INSERT INTO cart_items (user_id, product_id, quantity)
         SELECT $1, unnest($2::int[]), unnest($3::int[])",
    )
    .bind(user_id)
    .bind(&product_ids)
    .bind(&quantities)
    .execute(&mut *tx)
    .await?;

    let cart = sqlx::query_as::<_, CartItem>(
        "SELECT * FROM cart_items WHERE user_id = $1 ORDER BY id ASC",
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(cart)
}

/// Idempotent by construction; safe to retry after a successful order write.
pub async fn clear_cart(pool: &PgPool, user_id: i32) -> Result<()> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}
