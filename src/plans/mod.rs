pub mod dto;
pub mod handlers;
pub mod services;

use std::collections::HashMap;

use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::{MealPlan, WorkoutPlan};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Meal,
    Workout,
}

/// The one in-progress draft a coach can hold per client per plan type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DraftPlan {
    Meal(MealPlan),
    Workout(WorkoutPlan),
}

impl DraftPlan {
    pub fn id(&self) -> &str {
        match self {
            Self::Meal(p) => &p.id,
            Self::Workout(p) => &p.id,
        }
    }

    pub fn kind(&self) -> PlanKind {
        match self {
            Self::Meal(_) => PlanKind::Meal,
            Self::Workout(_) => PlanKind::Workout,
        }
    }
}

/// Transient, process-local draft state. Nothing in here is ever persisted;
/// a draft either gets approved into the client record or disappears.
pub struct DraftStore {
    inner: RwLock<HashMap<(String, PlanKind), DraftPlan>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, client_id: &str, kind: PlanKind) -> Option<DraftPlan> {
        self.inner
            .read()
            .await
            .get(&(client_id.to_string(), kind))
            .cloned()
    }

    /// Replaces any previous undealt-with draft of the same type.
    pub async fn put(&self, client_id: &str, draft: DraftPlan) {
        self.inner
            .write()
            .await
            .insert((client_id.to_string(), draft.kind()), draft);
    }

    pub async fn remove(&self, client_id: &str, kind: PlanKind) -> Option<DraftPlan> {
        self.inner
            .write()
            .await
            .remove(&(client_id.to_string(), kind))
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
