use serde::Deserialize;

/// A new report as the client submits it: plain text, whether typed,
/// dictated, or extracted from an uploaded image upstream.
#[derive(Debug, Deserialize)]
pub struct SubmitBloodworkRequest {
    pub text: String,
}
