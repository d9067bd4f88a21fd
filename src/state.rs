use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::generation::{DisabledGenerator, GeminiGenerator, PlanGenerator};
use crate::plans::DraftStore;
use crate::store::{ClientStore, DemoStore, PostgresStore, StoreMode};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClientStore>,
    pub generator: Arc<dyn PlanGenerator>,
    pub drafts: Arc<DraftStore>,
    pub config: Arc<AppConfig>,
    pub mode: StoreMode,
}

impl AppState {
    /// Resolve the backend exactly once. The choice is fixed for the process:
    /// a configured database means live mode, anything else is demo mode.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let (store, mode): (Arc<dyn ClientStore>, StoreMode) = match &config.database_url {
            Some(url) => {
                let store = PostgresStore::connect(url).await?;
                if let Err(e) = sqlx::migrate!("./migrations").run(store.pool()).await {
                    warn!(error = %e, "migration failed or folder missing; continuing");
                }
                (Arc::new(store), StoreMode::Live)
            }
            None => {
                warn!("DATABASE_URL not set; running in demo mode with seeded in-memory data");
                (Arc::new(DemoStore::seeded()), StoreMode::Demo)
            }
        };
        info!(backend = mode.backend_info(), "client store ready");

        let generator: Arc<dyn PlanGenerator> = match &config.generation.api_key {
            Some(key) => Arc::new(GeminiGenerator::new(
                config.generation.endpoint.clone(),
                config.generation.model.clone(),
                key.clone(),
            )),
            None => {
                warn!("no generation API key configured; AI features are disabled");
                Arc::new(DisabledGenerator)
            }
        };

        Ok(Self::from_parts(store, generator, config, mode))
    }

    pub fn from_parts(
        store: Arc<dyn ClientStore>,
        generator: Arc<dyn PlanGenerator>,
        config: Arc<AppConfig>,
        mode: StoreMode,
    ) -> Self {
        Self {
            store,
            generator,
            drafts: Arc::new(DraftStore::new()),
            config,
            mode,
        }
    }

    /// Demo-backed state for tests: seeded store, generation disabled.
    pub fn demo() -> Self {
        Self::from_parts(
            Arc::new(DemoStore::seeded()),
            Arc::new(DisabledGenerator),
            Arc::new(AppConfig::for_tests()),
            StoreMode::Demo,
        )
    }
}
