use std::collections::HashMap;

use axum::{Extension, Json, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        CurrentUser, Order, OrderItemData, OrderLineView, OrderResponse, PaymentMethod,
        PlaceOrderRequest, ProductSummary,
    },
    queries::{cart_queries, order_queries, product_queries},
    services::pricing,
};

pub async fn place_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let payment_method = validate_order(&payload)?;

    let requested_ids: Vec<i32> = payload.items.iter().map(|i| i.product_id).collect();
    let products = product_queries::find_by_ids(&state.db, &requested_ids).await?;

    let mut order_items = Vec::with_capacity(payload.items.len());

    for item in &payload.items {
        let product = products.get(&item.product_id).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown product {}", item.product_id))
        })?;

        if !product.in_stock {
            return Err(AppError::BadRequest(format!(
                "Product {} is out of stock",
                item.product_id
            )));
        }

        order_items.push(OrderItemData {
            product_id: item.product_id,
            quantity: item.quantity,
            price: product.price,
            discount: product.discount,
        });
    }

    let totals = pricing::compute_totals(&order_items);
    let reference = format!("ord_{}", Uuid::new_v4());

    let order = order_queries::create_order_with_items(
        &state.db,
        user.id,
        &reference,
        payment_method,
        &payload.shipping_info,
        &totals,
        &order_items,
    )
    .await?;

    // The order is committed at this point. Clearing the cart is a separate
    // step with no rollback path; a failure here leaves a stale cart, which
    // is logged rather than surfaced since the order itself succeeded.
    if let Err(e) = cart_queries::clear_cart(&state.db, user.id).await {
        tracing::error!(
            "Order {} persisted but cart clear failed for user {}: {:?}",
            order.reference,
            user.id,
            e
        );
    }

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_orders(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<OrderResponse>>> {
    let orders = order_queries::get_user_orders(&state.db, user.id).await?;

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let all_items = order_queries::get_items_for_orders(&state.db, &order_ids).await?;

    // Read-time join for display; a product deleted since ordering simply
    // has no summary, the stored line prices are unaffected.
    let product_ids: Vec<i32> = all_items.iter().map(|i| i.product_id).collect();
    let products = product_queries::find_by_ids(&state.db, &product_ids).await?;

    let mut items_map: HashMap<i32, Vec<_>> = HashMap::new();
    for item in all_items {
        items_map.entry(item.order_id).or_default().push(item);
    }

    let response = orders
        .into_iter()
        .map(|order| {
            let items = items_map
                .remove(&order.id)
                .unwrap_or_default()
                .into_iter()
                .map(|item| OrderLineView {
                    product: products.get(&item.product_id).map(ProductSummary::from),
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                    discount: item.discount,
                })
                .collect();
            OrderResponse { order, items }
        })
        .collect();

    Ok(Json(response))
}

fn validate_order(payload: &PlaceOrderRequest) -> Result<PaymentMethod> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest(
            "Order must contain at least one item".to_string(),
        ));
    }

    for item in &payload.items {
        if item.quantity < 1 {
            return Err(AppError::BadRequest(format!(
                "Invalid quantity for product {}",
                item.product_id
            )));
        }
    }

    let payment_method = PaymentMethod::parse(&payload.payment_method).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unsupported payment method '{}'",
            payload.payment_method
        ))
    })?;

    if payload.shipping_info.email.is_empty() || !payload.shipping_info.email.contains('@') {
        return Err(AppError::BadRequest("Invalid shipping email".to_string()));
    }

    if payload.shipping_info.address.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Shipping address is required".to_string(),
        ));
    }

    Ok(payment_method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItemRequest, ShippingInfo};

    fn request(items: Vec<OrderItemRequest>, payment_method: &str) -> PlaceOrderRequest {
        PlaceOrderRequest {
            items,
            shipping_info: ShippingInfo {
                fullname: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+995555123456".to_string(),
                address: "12 Analytical St".to_string(),
            },
            payment_method: payment_method.to_string(),
        }
    }

    fn item(product_id: i32, quantity: i32) -> OrderItemRequest {
        OrderItemRequest {
            product_id,
            quantity,
        }
    }

    #[test]
    fn valid_order_resolves_its_payment_method() {
        let payload = request(vec![item(1, 2)], "card");
        assert_eq!(validate_order(&payload).unwrap(), PaymentMethod::Card);
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let payload = request(vec![], "cod");
        assert!(matches!(
            validate_order(&payload),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let payload = request(vec![item(1, 0)], "cod");
        assert!(matches!(
            validate_order(&payload),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        let payload = request(vec![item(1, 1)], "wire");
        assert!(matches!(
            validate_order(&payload),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn missing_shipping_address_is_rejected() {
        let mut payload = request(vec![item(1, 1)], "cod");
        payload.shipping_info.address = "  ".to_string();
        assert!(matches!(
            validate_order(&payload),
            Err(AppError::BadRequest(_))
        ));
    }
}
