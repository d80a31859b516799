use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AuthResponse, LoginRequest, SignupRequest, UserSummary},
    queries::user_queries,
};

// Verified against when the email is unknown so login latency does not
// reveal whether an account exists.
const DUMMY_HASH: &str = "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    validate_signup(&payload)?;

    if user_queries::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already in use".to_string()));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let user =
        user_queries::create_user(&state.db, &payload.fullname, &payload.email, &password_hash)
            .await?;

    let token = state.tokens.issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserSummary::from(user),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = match user_queries::find_by_email(&state.db, &payload.email).await? {
        Some(user) => user,
        None => {
            let _ = bcrypt::verify(&payload.password, DUMMY_HASH);
            return Err(AppError::BadRequest("Invalid credentials".to_string()));
        }
    };

    let password_hash = user
        .password
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Invalid credentials".to_string()))?;

    let is_valid = bcrypt::verify(&payload.password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

    if !is_valid {
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    let token = state.tokens.issue(user.id)?;

    Ok(Json(AuthResponse {
        token,
        user: UserSummary::from(user),
    }))
}

fn validate_signup(payload: &SignupRequest) -> Result<()> {
    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if payload.fullname.trim().is_empty() {
        return Err(AppError::BadRequest("Fullname cannot be empty".to_string()));
    }

    if payload.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(fullname: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            fullname: fullname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn well_formed_signup_passes() {
        assert!(validate_signup(&request("Ada Lovelace", "ada@example.com", "correcthorse")).is_ok());
    }

    #[test]
    fn email_must_contain_an_at_sign() {
        let err = validate_signup(&request("Ada", "ada.example.com", "correcthorse")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn blank_fullname_is_rejected() {
        let err = validate_signup(&request("   ", "ada@example.com", "correcthorse")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn short_password_is_rejected() {
        let err = validate_signup(&request("Ada", "ada@example.com", "short")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn dummy_hash_is_a_parseable_bcrypt_string() {
        // If this ever fails to parse, the timing equalization in login
        // silently degrades.
        assert!(bcrypt::verify("anything", DUMMY_HASH).is_ok());
    }
}
