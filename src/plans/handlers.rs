use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    CheatMealRequest, DrugInteractionRequest, GenerateRequest, GroceryListRequest,
    SupplementRequest,
};
use super::{services, DraftPlan, PlanKind};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::generation::{CheatMeal, GroceryList};
use crate::models::{Client, SupplementStack};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clients/:id/plans/:kind/draft",
            post(generate_draft)
                .get(get_draft)
                .put(edit_draft)
                .delete(discard_draft),
        )
        .route("/clients/:id/plans/:kind/draft/approve", post(approve_draft))
        .route("/clients/:id/supplements", post(generate_supplements))
        .route("/clients/:id/briefing", post(generate_briefing))
        .route("/clients/:id/grocery-list", post(generate_grocery_list))
        .route("/tools/cheat-meal", post(generate_cheat_meal))
        .route("/tools/drug-interactions", post(analyze_interactions))
}

#[instrument(skip(state, user, body))]
pub async fn generate_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, kind)): Path<(String, PlanKind)>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<DraftPlan>, ApiError> {
    user.require_coach()?;
    let draft = services::generate_draft(
        state.store.as_ref(),
        &state.drafts,
        state.generator.as_ref(),
        &id,
        kind,
        body,
    )
    .await?;
    Ok(Json(draft))
}

#[instrument(skip(state, user))]
pub async fn get_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, kind)): Path<(String, PlanKind)>,
) -> Result<Json<DraftPlan>, ApiError> {
    user.require_coach()?;
    state
        .drafts
        .get(&id, kind)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound("draft"))
}

#[instrument(skip(state, user, body))]
pub async fn edit_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, kind)): Path<(String, PlanKind)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<DraftPlan>, ApiError> {
    user.require_coach()?;
    let draft = services::edit_draft(&state.drafts, &id, kind, body).await?;
    Ok(Json(draft))
}

#[instrument(skip(state, user))]
pub async fn approve_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, kind)): Path<(String, PlanKind)>,
) -> Result<Json<Client>, ApiError> {
    user.require_coach()?;
    let updated = services::approve_draft(state.store.as_ref(), &state.drafts, &id, kind).await?;
    Ok(Json(updated))
}

#[instrument(skip(state, user))]
pub async fn discard_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, kind)): Path<(String, PlanKind)>,
) -> Result<StatusCode, ApiError> {
    user.require_coach()?;
    services::discard_draft(&state.drafts, &id, kind).await;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, user))]
pub async fn generate_briefing(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    user.require_coach()?;
    services::generate_briefing(state.store.as_ref(), state.generator.as_ref(), &id).await
}

#[instrument(skip(state, user, body))]
pub async fn generate_grocery_list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<GroceryListRequest>,
) -> Result<Json<GroceryList>, ApiError> {
    user.require_coach()?;
    let list =
        services::generate_grocery_list(state.store.as_ref(), state.generator.as_ref(), &id, body)
            .await?;
    Ok(Json(list))
}

#[instrument(skip(state, user, body))]
pub async fn generate_cheat_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CheatMealRequest>,
) -> Result<Json<CheatMeal>, ApiError> {
    user.require_coach()?;
    let meal = services::generate_cheat_meal(state.generator.as_ref(), body).await?;
    Ok(Json(meal))
}

#[instrument(skip(state, user, body))]
pub async fn analyze_interactions(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<DrugInteractionRequest>,
) -> Result<String, ApiError> {
    user.require_coach()?;
    services::analyze_interactions(state.generator.as_ref(), body.compounds).await
}

#[instrument(skip(state, user, body))]
pub async fn generate_supplements(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<SupplementRequest>,
) -> Result<Json<SupplementStack>, ApiError> {
    user.require_coach()?;
    let stack =
        services::generate_supplements(state.store.as_ref(), state.generator.as_ref(), &id, body)
            .await?;
    Ok(Json(stack))
}
