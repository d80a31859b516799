use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::{
    AppState,
    error::{AppError, Result},
    models::CustomerSummary,
    queries::user_queries,
};

pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<CustomerSummary>>> {
    let customers = user_queries::list_customers(&state.db).await?;

    Ok(Json(customers))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = user_queries::delete_user(&state.db, id).await?;

    if deleted == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
