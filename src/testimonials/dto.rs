use serde::Deserialize;

use crate::models::TestimonialStatus;

#[derive(Debug, Deserialize)]
pub struct SubmitTestimonialRequest {
    pub rating: u8,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ModerateTestimonialRequest {
    /// `Approved` or `Rejected`; `Pending` is not a decision.
    pub decision: TestimonialStatus,
}
