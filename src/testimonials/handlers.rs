use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{ModerateTestimonialRequest, SubmitTestimonialRequest};
use super::services;
use crate::auth::AuthUser;
use crate::clients::services::fetch_client;
use crate::error::ApiError;
use crate::models::Client;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients/:id/testimonials", post(submit))
        .route("/clients/:id/testimonials/:index/moderate", post(moderate))
}

#[instrument(skip(state, user, body))]
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<SubmitTestimonialRequest>,
) -> Result<Json<Client>, ApiError> {
    let client = fetch_client(state.store.as_ref(), &id).await?;
    user.require_access(&client)?;
    let updated = services::submit(state.store.as_ref(), client, body.rating, body.text).await?;
    Ok(Json(updated))
}

#[instrument(skip(state, user, body))]
pub async fn moderate(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, index)): Path<(String, usize)>,
    Json(body): Json<ModerateTestimonialRequest>,
) -> Result<Json<Client>, ApiError> {
    user.require_coach()?;
    let updated = services::moderate(state.store.as_ref(), &id, index, body.decision).await?;
    Ok(Json(updated))
}
