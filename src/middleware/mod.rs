use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    AppState,
    error::AppError,
    models::CurrentUser,
    queries::user_queries,
    utils::extractors::extract_user_id,
};

/// Bearer-token gate for operations that need an owning identity. Verifies
/// the token, then resolves the user row; a token whose user no longer
/// exists is rejected the same way as a missing or invalid one.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))?;

    let claims = state.tokens.verify(token)?;
    let user_id = extract_user_id(&claims)?;

    let user = user_queries::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        fullname: user.fullname,
        email: user.email,
    });

    Ok(next.run(req).await)
}
