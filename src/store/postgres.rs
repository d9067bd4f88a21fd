use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use super::{ClientStore, StoreError};
use crate::models::{now_rfc3339, Client, NewClient};

/// Live backend. One `clients` table; the nested sub-records and collections
/// are JSONB columns deserialized into their typed form at this boundary, so
/// malformed stored data is rejected here rather than trusted opaquely.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: String,
    created_at: String,
    name: String,
    email: String,
    goal: String,
    status: String,
    payment_status: Option<String>,
    profile: Value,
    intake_data: Value,
    progress: Value,
    generated_plans: Value,
    payments: Value,
    communication: Value,
    bloodwork_history: Value,
    client_testimonials: Value,
    blood_donation_status: Value,
    holistic_health: Value,
}

fn text_enum<T: Serialize>(v: &T) -> Result<String, serde_json::Error> {
    match serde_json::to_value(v)? {
        Value::String(s) => Ok(s),
        other => Err(serde::ser::Error::custom(format!(
            "expected string-serialized enum, got {other}"
        ))),
    }
}

fn parse_enum<T: DeserializeOwned>(s: String) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::String(s))
}

impl TryFrom<ClientRow> for Client {
    type Error = StoreError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        Ok(Client {
            id: row.id,
            created_at: row.created_at,
            name: row.name,
            email: row.email,
            goal: row.goal,
            status: parse_enum(row.status)?,
            payment_status: row.payment_status.map(parse_enum).transpose()?,
            profile: serde_json::from_value(row.profile)?,
            intake_data: serde_json::from_value(row.intake_data)?,
            progress: serde_json::from_value(row.progress)?,
            generated_plans: serde_json::from_value(row.generated_plans)?,
            payments: serde_json::from_value(row.payments)?,
            communication: serde_json::from_value(row.communication)?,
            bloodwork_history: serde_json::from_value(row.bloodwork_history)?,
            client_testimonials: serde_json::from_value(row.client_testimonials)?,
            blood_donation_status: serde_json::from_value(row.blood_donation_status)?,
            holistic_health: serde_json::from_value(row.holistic_health)?,
        })
    }
}

const ALL_COLUMNS: &str = "id, created_at, name, email, goal, status, payment_status, \
     profile, intake_data, progress, generated_plans, payments, communication, \
     bloodwork_history, client_testimonials, blood_donation_status, holistic_health";

#[async_trait]
impl ClientStore for PostgresStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {ALL_COLUMNS} FROM clients ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Client::try_from).collect()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, StoreError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {ALL_COLUMNS} FROM clients WHERE email = $1 LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Client::try_from).transpose()
    }

    async fn create_client(&self, new: NewClient) -> Result<Client, StoreError> {
        let client = new.into_client(Uuid::new_v4().to_string(), now_rfc3339());
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r"
            INSERT INTO clients ({ALL_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {ALL_COLUMNS}
            "
        ))
        .bind(&client.id)
        .bind(&client.created_at)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.goal)
        .bind(text_enum(&client.status)?)
        .bind(client.payment_status.as_ref().map(text_enum).transpose()?)
        .bind(serde_json::to_value(&client.profile)?)
        .bind(serde_json::to_value(&client.intake_data)?)
        .bind(serde_json::to_value(&client.progress)?)
        .bind(serde_json::to_value(&client.generated_plans)?)
        .bind(serde_json::to_value(&client.payments)?)
        .bind(serde_json::to_value(&client.communication)?)
        .bind(serde_json::to_value(&client.bloodwork_history)?)
        .bind(serde_json::to_value(&client.client_testimonials)?)
        .bind(serde_json::to_value(&client.blood_donation_status)?)
        .bind(serde_json::to_value(&client.holistic_health)?)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = %row.id, "live store: client created");
        Client::try_from(row)
    }

    async fn update_client(&self, client: Client) -> Result<Client, StoreError> {
        // id and created_at are excluded from the write; whatever the payload
        // carries for them, the stored values remain.
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r"
            UPDATE clients SET
                name = $2, email = $3, goal = $4, status = $5, payment_status = $6,
                profile = $7, intake_data = $8, progress = $9, generated_plans = $10,
                payments = $11, communication = $12, bloodwork_history = $13,
                client_testimonials = $14, blood_donation_status = $15, holistic_health = $16
            WHERE id = $1
            RETURNING {ALL_COLUMNS}
            "
        ))
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.goal)
        .bind(text_enum(&client.status)?)
        .bind(client.payment_status.as_ref().map(text_enum).transpose()?)
        .bind(serde_json::to_value(&client.profile)?)
        .bind(serde_json::to_value(&client.intake_data)?)
        .bind(serde_json::to_value(&client.progress)?)
        .bind(serde_json::to_value(&client.generated_plans)?)
        .bind(serde_json::to_value(&client.payments)?)
        .bind(serde_json::to_value(&client.communication)?)
        .bind(serde_json::to_value(&client.bloodwork_history)?)
        .bind(serde_json::to_value(&client.client_testimonials)?)
        .bind(serde_json::to_value(&client.blood_donation_status)?)
        .bind(serde_json::to_value(&client.holistic_health)?)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        debug!(id = %row.id, "live store: client updated");
        Client::try_from(row)
    }
}
