use tracing::error;

use super::dto::FinancialSummary;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{Client, PaymentState};
use crate::store::ClientStore;

/// Look a client up by id through the store's list operation (the backend
/// contract exposes list / find-by-email / create / update only).
pub async fn fetch_client(store: &dyn ClientStore, id: &str) -> Result<Client, ApiError> {
    store
        .list_clients()
        .await?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or(ApiError::NotFound("client"))
}

/// Role-scoped visibility: the coach sees the whole roster, a client
/// principal at most their own record. A backend failure degrades to an
/// empty list with a logged diagnostic; it never fails the request.
pub async fn visible_clients(store: &dyn ClientStore, user: &AuthUser) -> Vec<Client> {
    if user.is_coach() {
        match store.list_clients().await {
            Ok(clients) => clients,
            Err(e) => {
                error!(error = %e, "listing clients failed; serving empty roster");
                Vec::new()
            }
        }
    } else {
        match store.find_by_email(&user.email).await {
            Ok(found) => found.into_iter().collect(),
            Err(e) => {
                error!(error = %e, email = %user.email, "client lookup failed");
                Vec::new()
            }
        }
    }
}

pub fn summarize_payments(clients: &[Client]) -> FinancialSummary {
    let mut summary = FinancialSummary {
        total_collected: 0.0,
        total_pending: 0.0,
        total_overdue: 0.0,
        payment_count: 0,
        client_count: clients.len(),
    };
    for payment in clients.iter().flat_map(|c| &c.payments) {
        summary.payment_count += 1;
        match payment.status {
            PaymentState::Paid => summary.total_collected += payment.amount,
            PaymentState::Pending => summary.total_pending += payment.amount,
            PaymentState::Overdue => summary.total_overdue += payment.amount,
        }
    }
    summary
}
