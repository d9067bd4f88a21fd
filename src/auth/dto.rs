use serde::{Deserialize, Serialize};

use super::Role;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub role: Role,
}
