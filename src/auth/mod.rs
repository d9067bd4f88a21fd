pub mod dto;
pub mod handlers;
pub mod jwt;

pub use jwt::AuthUser;

use axum::Router;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::Client;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}

/// The two principal types. A principal is the coach when their email equals
/// the configured coach identity; anyone else is treated as a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Coach,
    Client,
}

impl AuthUser {
    pub fn is_coach(&self) -> bool {
        self.role == Role::Coach
    }

    pub fn require_coach(&self) -> Result<(), ApiError> {
        if self.is_coach() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("coach access required".into()))
        }
    }

    /// Coach sees every record; a client principal only their own.
    pub fn can_access(&self, client: &Client) -> bool {
        self.is_coach() || self.email == client.email
    }

    pub fn require_access(&self, client: &Client) -> Result<(), ApiError> {
        if self.can_access(client) {
            Ok(())
        } else {
            Err(ApiError::Forbidden("not your record".into()))
        }
    }
}
