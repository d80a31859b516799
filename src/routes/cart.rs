use axum::{Extension, Json, extract::State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CartItem, CartUpdateRequest, CurrentUser},
    queries::{cart_queries, product_queries},
};

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<CartItem>>> {
    let items = cart_queries::get_cart(&state.db, user.id).await?;

    Ok(Json(items))
}

pub async fn update_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CartUpdateRequest>,
) -> Result<Json<Vec<CartItem>>> {
    for item in &payload.items {
        if item.quantity < 1 {
            return Err(AppError::BadRequest(format!(
                "Invalid quantity for product {}",
                item.product_id
            )));
        }
    }

    let requested_ids: Vec<i32> = payload.items.iter().map(|i| i.product_id).collect();
    let products = product_queries::find_by_ids(&state.db, &requested_ids).await?;

    for item in &payload.items {
        if !products.contains_key(&item.product_id) {
            return Err(AppError::BadRequest(format!(
                "Unknown product {}",
                item.product_id
            )));
        }
    }

    let items = cart_queries::replace_cart(&state.db, user.id, &payload.items).await?;

    Ok(Json(items))
}
