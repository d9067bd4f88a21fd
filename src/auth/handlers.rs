use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{LoginRequest, MeResponse, TokenResponse};
use super::jwt::JwtKeys;
use super::{AuthUser, Role};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

/// Session issue for a known identity: the configured coach email, or the
/// email of an existing client record. Real credential verification belongs
/// to the external identity provider; this endpoint is the correlation seam
/// between a verified email and a session token.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let role = if body.email == state.config.coach_email {
        Role::Coach
    } else {
        match state.store.find_by_email(&body.email).await? {
            Some(_) => Role::Client,
            None => {
                return Err(ApiError::Unauthorized(format!(
                    "no client found with email {}",
                    body.email
                )))
            }
        }
    };

    let token = JwtKeys::from_config(&state.config.jwt)
        .sign(&body.email)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(TokenResponse { token, role }))
}

pub async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        email: user.email,
        role: user.role,
    })
}
