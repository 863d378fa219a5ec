use std::sync::Arc;

use crate::{
    auth::repo::{PgUserRepo, UserRepo},
    clock::{Clock, SystemClock},
    config::AppConfig,
    db,
    expenses::repo::{ExpenseRepo, PgExpenseRepo},
    storage::MemoryStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub expenses: Arc<dyn ExpenseRepo>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let Some(database_url) = config.database_url.clone() else {
            tracing::warn!("DATABASE_URL not set; using in-memory storage, data is lost on exit");
            return Ok(Self::in_memory(config));
        };

        let db = db::connect(&config, &database_url).await?;
        Ok(Self {
            config: Arc::new(config),
            users: Arc::new(PgUserRepo::new(db.clone())),
            expenses: Arc::new(PgExpenseRepo::new(db)),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            config: Arc::new(config),
            users: store.clone(),
            expenses: store,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
