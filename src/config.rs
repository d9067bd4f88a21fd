use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Absent means the process runs against the in-memory demo store for
    /// its whole lifetime. The choice is made once, at startup.
    pub database_url: Option<String>,
    pub coach_email: String,
    pub jwt: JwtConfig,
    pub generation: GenerationConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").ok();
        let coach_email =
            std::env::var("COACH_EMAIL").unwrap_or_else(|_| "coach@rippedcity.com".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| "coachdesk-dev-secret".into()),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "coachdesk".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "coachdesk-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 12),
        };
        let generation = GenerationConfig {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into()),
            endpoint: std::env::var("GEMINI_ENDPOINT")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
        };
        Ok(Self {
            database_url,
            coach_email,
            jwt,
            generation,
        })
    }

    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            coach_email: "coach@rippedcity.com".into(),
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test".into(),
                audience: "test".into(),
                ttl_minutes: 5,
            },
            generation: GenerationConfig {
                api_key: None,
                model: "test-model".into(),
                endpoint: "http://localhost:0".into(),
            },
        }
    }
}
