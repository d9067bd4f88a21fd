use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::SubmitBloodworkRequest;
use super::services;
use crate::auth::AuthUser;
use crate::clients::services::fetch_client;
use crate::error::ApiError;
use crate::models::Client;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients/:id/bloodwork", post(submit))
        .route("/clients/:id/bloodwork/:index/analyze", post(analyze))
}

#[instrument(skip(state, user, body))]
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<SubmitBloodworkRequest>,
) -> Result<Json<Client>, ApiError> {
    let client = fetch_client(state.store.as_ref(), &id).await?;
    user.require_access(&client)?;
    let updated = services::submit(state.store.as_ref(), client, body.text).await?;
    Ok(Json(updated))
}

#[instrument(skip(state, user))]
pub async fn analyze(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<Client>, ApiError> {
    user.require_coach()?;
    let updated =
        services::analyze(state.store.as_ref(), state.generator.as_ref(), &id, index).await?;
    Ok(Json(updated))
}
