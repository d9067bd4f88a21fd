use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use super::dto::{FinancialSummary, MessageRequest, ProgressEntryRequest};
use super::services::{fetch_client, summarize_payments, visible_clients};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{
    now_rfc3339, unix_millis, Client, Message, MessageSender, NewClient, ProgressLog,
};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients/:id", get(get_client))
        .route("/financials/summary", get(financial_summary))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", post(create_client))
        .route("/clients/:id", put(update_client))
        .route("/clients/:id/progress", post(add_progress))
        .route("/clients/:id/messages", post(add_message))
}

#[instrument(skip(state, user), fields(principal = %user.email))]
pub async fn list_clients(State(state): State<AppState>, user: AuthUser) -> Json<Vec<Client>> {
    Json(visible_clients(state.store.as_ref(), &user).await)
}

#[instrument(skip(state, user))]
pub async fn get_client(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    let client = fetch_client(state.store.as_ref(), &id).await?;
    user.require_access(&client)?;
    Ok(Json(client))
}

#[instrument(skip(state, user, body), fields(email = %body.email))]
pub async fn create_client(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<NewClient>,
) -> Result<(StatusCode, HeaderMap, Json<Client>), ApiError> {
    user.require_coach()?;
    let created = state.store.create_client(body).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/clients/{}", created.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(created)))
}

#[instrument(skip(state, user, body))]
pub async fn update_client(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(mut body): Json<Client>,
) -> Result<Json<Client>, ApiError> {
    let stored = fetch_client(state.store.as_ref(), &id).await?;
    user.require_access(&stored)?;
    // The path names the record; the body's identity fields are ignored by
    // the store either way.
    body.id = id;
    let updated = state.store.update_client(body).await?;
    Ok(Json(updated))
}

#[instrument(skip(state, user, body))]
pub async fn add_progress(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<ProgressEntryRequest>,
) -> Result<Json<Client>, ApiError> {
    let mut client = fetch_client(state.store.as_ref(), &id).await?;
    user.require_access(&client)?;
    client.progress.push(ProgressLog {
        date: body.date.unwrap_or_else(now_rfc3339),
        weight: body.weight,
        notes: body.notes,
    });
    Ok(Json(state.store.update_client(client).await?))
}

#[instrument(skip(state, user, body))]
pub async fn add_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<Client>, ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("message text is required".into()));
    }
    let mut client = fetch_client(state.store.as_ref(), &id).await?;
    user.require_access(&client)?;
    let sender = if user.is_coach() {
        MessageSender::Coach
    } else {
        MessageSender::Client
    };
    client.communication.messages.push(Message {
        id: format!("msg_{}", unix_millis()),
        sender,
        text: body.text,
        timestamp: now_rfc3339(),
    });
    Ok(Json(state.store.update_client(client).await?))
}

#[instrument(skip(state, user))]
pub async fn financial_summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<FinancialSummary>, ApiError> {
    user.require_coach()?;
    let clients = state.store.list_clients().await?;
    Ok(Json(summarize_payments(&clients)))
}
