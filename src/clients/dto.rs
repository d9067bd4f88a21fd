use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ProgressEntryRequest {
    pub weight: f64,
    pub notes: String,
    /// Defaults to now when omitted.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Payment aggregation across the whole roster, coach-facing.
#[derive(Debug, Serialize, PartialEq)]
pub struct FinancialSummary {
    pub total_collected: f64,
    pub total_pending: f64,
    pub total_overdue: f64,
    pub payment_count: usize,
    pub client_count: usize,
}
