mod auth;
mod cart;
mod customers;
mod health;
mod orders;
mod products;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};

use crate::{AppState, middleware::auth_middleware};

pub fn create_router(state: AppState) -> Router {
    // Order placement, order history and cart mutation all need an owning
    // identity; everything else is public. The admin gate in front of the
    // customer routes is deployed as an external layer.
    let protected = Router::new()
        .route("/orders", post(orders::place_order).get(orders::get_orders))
        .route("/cart", get(cart::get_cart).put(cart::update_cart))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/customers", get(customers::list_customers))
        .route("/auth/customers/{id}", delete(customers::delete_customer))
        .route("/products", get(products::search_products))
        .route("/products/{id}", get(products::get_product))
        .merge(protected)
        .with_state(state)
}
