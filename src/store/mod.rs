mod demo;
mod postgres;
pub mod seed;

pub use demo::DemoStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Client, NewClient};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("client not found")]
    NotFound,
    #[error("backend error: {0}")]
    Backend(#[from] sqlx::Error),
    #[error("stored record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Which backend the store was resolved to at startup. Fixed for the
/// lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Demo,
    Live,
}

impl StoreMode {
    pub const fn backend_info(self) -> &'static str {
        match self {
            Self::Demo => "demo (in-memory, non-persistent)",
            Self::Live => "live (PostgreSQL)",
        }
    }
}

/// Single source of truth for the set of client records.
///
/// Both backends present identical ordering and merge semantics so callers
/// never branch on the active mode:
/// - `list_clients` is ordered by creation timestamp descending, newest
///   first, and a freshly created client appears at the front.
/// - `update_client` is a full replace of the mutable fields keyed by id;
///   the stored id and creation timestamp always win over whatever the
///   payload carries.
/// - email lookup is an exact, case-sensitive match, and duplicate emails
///   are not rejected on create.
///
/// There is no optimistic-concurrency token: concurrent updates to the same
/// record are last-write-wins.
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError>;

    /// At most one record; callers acting as a client see only this.
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, StoreError>;

    /// Assigns id and creation timestamp; returns the stored record.
    async fn create_client(&self, new: NewClient) -> Result<Client, StoreError>;

    /// Full replace of mutable fields for the record with `client.id`.
    async fn update_client(&self, client: Client) -> Result<Client, StoreError>;
}

/// Replace mutable fields of `stored` with those of `supplied`, keeping the
/// identity fields. Shared by both backends so the merge semantics cannot
/// drift apart.
pub(crate) fn merge_immutable(stored_id: String, stored_created_at: String, supplied: Client) -> Client {
    Client {
        id: stored_id,
        created_at: stored_created_at,
        ..supplied
    }
}
