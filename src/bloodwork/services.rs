use tracing::info;

use crate::clients::services::fetch_client;
use crate::error::ApiError;
use crate::generation::PlanGenerator;
use crate::models::{now_rfc3339, BloodworkStatus, BloodworkSubmission, Client};
use crate::store::ClientStore;

/// Append a new submission in `Pending Review` state. Takes the record the
/// handler already fetched for its access check; no second lookup.
pub async fn submit(
    store: &dyn ClientStore,
    mut client: Client,
    text: String,
) -> Result<Client, ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("bloodwork text is required".into()));
    }
    client.bloodwork_history.push(BloodworkSubmission {
        date: now_rfc3339(),
        text,
        analysis: None,
        status: BloodworkStatus::PendingReview,
    });
    Ok(store.update_client(client).await?)
}

/// Coach-triggered review: runs the analysis and stamps the submission
/// `Reviewed` in the same update. The transition is one-way; a submission
/// already reviewed cannot be analyzed again.
pub async fn analyze(
    store: &dyn ClientStore,
    generator: &dyn PlanGenerator,
    client_id: &str,
    index: usize,
) -> Result<Client, ApiError> {
    let mut client = fetch_client(store, client_id).await?;
    let blood_type = client.profile.blood_type;
    let submission = client
        .bloodwork_history
        .get_mut(index)
        .ok_or(ApiError::NotFound("bloodwork submission"))?;
    if submission.status == BloodworkStatus::Reviewed {
        return Err(ApiError::Conflict(
            "submission has already been reviewed".into(),
        ));
    }

    let analysis = generator
        .analyze_bloodwork(&submission.text, blood_type)
        .await?;
    submission.analysis = Some(analysis);
    submission.status = BloodworkStatus::Reviewed;
    info!(client_id, index, "bloodwork submission reviewed");
    Ok(store.update_client(client).await?)
}
