use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{merge_immutable, ClientStore, StoreError};
use crate::models::{now_rfc3339, unix_millis, Client, NewClient};

/// Process-local, non-persistent substitute backend used when no database is
/// configured. Operations apply directly to memory and cannot fail due to
/// connectivity, but they keep the exact ordering and merge semantics of the
/// live backend.
pub struct DemoStore {
    // Invariant: most recently created first.
    clients: RwLock<Vec<Client>>,
}

impl DemoStore {
    /// Pre-seeded store, what a demo-mode process starts with.
    pub fn seeded() -> Self {
        Self {
            clients: RwLock::new(super::seed::demo_clients()),
        }
    }

    pub fn empty() -> Self {
        Self {
            clients: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ClientStore for DemoStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        Ok(self.clients.read().await.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, StoreError> {
        let clients = self.clients.read().await;
        Ok(clients.iter().find(|c| c.email == email).cloned())
    }

    async fn create_client(&self, new: NewClient) -> Result<Client, StoreError> {
        let client = new.into_client(format!("demo_{}", unix_millis()), now_rfc3339());
        debug!(id = %client.id, email = %client.email, "demo store: client created");
        self.clients.write().await.insert(0, client.clone());
        Ok(client)
    }

    async fn update_client(&self, client: Client) -> Result<Client, StoreError> {
        let mut clients = self.clients.write().await;
        let stored = clients
            .iter_mut()
            .find(|c| c.id == client.id)
            .ok_or(StoreError::NotFound)?;
        let merged = merge_immutable(stored.id.clone(), stored.created_at.clone(), client);
        *stored = merged.clone();
        debug!(id = %merged.id, "demo store: client updated");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;

    fn prospect(name: &str, email: &str) -> NewClient {
        NewClient {
            name: name.into(),
            email: email.into(),
            goal: "Not Set".into(),
            status: ClientStatus::Prospect,
            payment_status: Some(PaymentStatus::Unpaid),
            profile: PhysicalProfile {
                age: String::new(),
                gender: Gender::Female,
                weight: String::new(),
                height: String::new(),
                experience: ExperienceLevel::Beginner,
                activity_level: ActivityLevel::Sedentary,
                blood_type: None,
                status: EnhancementStatus::Natural,
                notification_preferences: NotificationPreferences {
                    email: true,
                    sms: false,
                    in_app: true,
                },
            },
            intake_data: IntakeData {
                injuries: String::new(),
                meds: String::new(),
                diet: String::new(),
                work_schedule: String::new(),
                health_conditions: String::new(),
                allergies: String::new(),
            },
            progress: vec![],
            generated_plans: GeneratedPlans::default(),
            payments: vec![],
            communication: Communication::default(),
            bloodwork_history: vec![],
            client_testimonials: vec![],
            blood_donation_status: BloodDonationInfo {
                status: DonationStatus::Unknown,
                last_checked: String::new(),
                notes: None,
            },
            holistic_health: HolisticHealth {
                sleep_quality: String::new(),
                stress_level: String::new(),
                energy_level: String::new(),
                herbal_log: String::new(),
            },
        }
    }

    #[tokio::test]
    async fn created_client_appears_first_in_the_list() {
        let store = DemoStore::seeded();
        let before = store.list_clients().await.expect("list");
        let created = store
            .create_client(prospect("New Person", "new.p@example.com"))
            .await
            .expect("create");

        let after = store.list_clients().await.expect("list");
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[0].id, created.id);
        assert_eq!(&after[1..], &before[..]);
    }

    #[tokio::test]
    async fn create_then_update_keeps_identity_fields() {
        // The worked demo-mode scenario: create a prospect, then flip payment
        // and status; id and created_at must survive the update untouched.
        let store = DemoStore::empty();
        let created = store
            .create_client(prospect("Brenda Miller", "brenda.m@example.com"))
            .await
            .expect("create");

        assert!(created.id.starts_with("demo_"));
        assert!(
            time::OffsetDateTime::parse(
                &created.created_at,
                &time::format_description::well_known::Rfc3339
            )
            .is_ok(),
            "created_at must be a valid RFC 3339 timestamp"
        );

        let mut update = created.clone();
        update.payment_status = Some(PaymentStatus::Paid);
        update.status = ClientStatus::Active;
        // Hostile identity fields in the payload must be ignored.
        update.id = "forged".into();
        update.created_at = "1999-01-01T00:00:00Z".into();

        let err = store.update_client(update.clone()).await;
        assert!(matches!(err, Err(StoreError::NotFound)), "forged id is unknown");

        update.id = created.id.clone();
        let updated = store.update_client(update).await.expect("update");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.payment_status, Some(PaymentStatus::Paid));
        assert_eq!(updated.status, ClientStatus::Active);

        let list = store.list_clients().await.expect("list");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], updated);
    }

    #[tokio::test]
    async fn email_lookup_is_exact_and_case_sensitive() {
        let store = DemoStore::seeded();
        let found = store
            .find_by_email("marcus.w@example.com")
            .await
            .expect("lookup");
        assert_eq!(found.expect("present").name, "Marcus Webb");

        let miss = store
            .find_by_email("Marcus.W@example.com")
            .await
            .expect("lookup");
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn duplicate_emails_are_not_rejected() {
        let store = DemoStore::empty();
        store
            .create_client(prospect("A", "shared@example.com"))
            .await
            .expect("first create");
        store
            .create_client(prospect("B", "shared@example.com"))
            .await
            .expect("second create");
        let list = store.list_clients().await.expect("list");
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn update_is_a_full_replace_of_mutable_fields() {
        let store = DemoStore::seeded();
        let list = store.list_clients().await.expect("list");
        let mut target = list.into_iter().find(|c| c.name == "Marcus Webb").expect("seeded");

        target.progress.clear();
        target.goal = "Maintenance".into();
        let updated = store.update_client(target.clone()).await.expect("update");
        assert!(updated.progress.is_empty(), "collections follow the payload wholesale");
        assert_eq!(updated.goal, "Maintenance");
    }
}
