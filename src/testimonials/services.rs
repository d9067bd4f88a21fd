use tracing::info;

use crate::clients::services::fetch_client;
use crate::error::ApiError;
use crate::models::{now_rfc3339, Client, ClientTestimonial, TestimonialStatus};
use crate::store::ClientStore;

/// Append a pending testimonial. Takes the record the handler already
/// fetched for its access check; no second lookup.
pub async fn submit(
    store: &dyn ClientStore,
    mut client: Client,
    rating: u8,
    text: String,
) -> Result<Client, ApiError> {
    if !(1..=5).contains(&rating) {
        return Err(ApiError::BadRequest("rating must be between 1 and 5".into()));
    }
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("testimonial text is required".into()));
    }
    client.client_testimonials.push(ClientTestimonial {
        date: now_rfc3339(),
        rating,
        text,
        status: TestimonialStatus::Pending,
    });
    Ok(store.update_client(client).await?)
}

/// Decide a pending testimonial. Both outcomes are terminal; a decided
/// testimonial cannot be re-moderated.
pub async fn moderate(
    store: &dyn ClientStore,
    client_id: &str,
    index: usize,
    decision: TestimonialStatus,
) -> Result<Client, ApiError> {
    if decision == TestimonialStatus::Pending {
        return Err(ApiError::BadRequest(
            "decision must be Approved or Rejected".into(),
        ));
    }
    let mut client = fetch_client(store, client_id).await?;
    let testimonial = client
        .client_testimonials
        .get_mut(index)
        .ok_or(ApiError::NotFound("testimonial"))?;
    if testimonial.status != TestimonialStatus::Pending {
        return Err(ApiError::Conflict(
            "testimonial has already been decided".into(),
        ));
    }
    testimonial.status = decision;
    info!(client_id, index, ?decision, "testimonial moderated");
    Ok(store.update_client(client).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DemoStore;

    #[tokio::test]
    async fn submitted_testimonials_wait_for_moderation() {
        let store = DemoStore::seeded();
        let client = fetch_client(&store, "demo-client-1").await.expect("fetch");
        let updated = submit(&store, client, 5, "Best coach around.".into())
            .await
            .expect("submit");
        let index = updated.client_testimonials.len() - 1;
        assert_eq!(
            updated.client_testimonials[index].status,
            TestimonialStatus::Pending
        );

        let decided = moderate(&store, "demo-client-1", index, TestimonialStatus::Approved)
            .await
            .expect("moderate");
        assert_eq!(
            decided.client_testimonials[index].status,
            TestimonialStatus::Approved
        );

        // Terminal either way: no second decision.
        let err = moderate(&store, "demo-client-1", index, TestimonialStatus::Rejected).await;
        assert!(matches!(err, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn rating_outside_one_to_five_is_rejected() {
        let store = DemoStore::seeded();
        let client = fetch_client(&store, "demo-client-1").await.expect("fetch");
        assert!(matches!(
            submit(&store, client.clone(), 0, "x".into()).await,
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            submit(&store, client, 6, "x".into()).await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn pending_is_not_a_valid_decision() {
        let store = DemoStore::seeded();
        let client = fetch_client(&store, "demo-client-1").await.expect("fetch");
        let updated = submit(&store, client, 4, "Solid programming.".into())
            .await
            .expect("submit");
        let index = updated.client_testimonials.len() - 1;
        let err = moderate(&store, "demo-client-1", index, TestimonialStatus::Pending).await;
        assert!(matches!(err, Err(ApiError::BadRequest(_))));
    }
}
