use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::accounts::AccountEngine;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::ledger::LedgerService;

/// 服务器状态 - 持有所有服务的引用
///
/// Cheap to clone: every field is a handle around the shared pool.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub accounts: AccountEngine,
    pub ledger: LedgerService,
}

impl ServerState {
    /// Open the database (running migrations) and wire the services
    pub async fn initialize(config: &Config) -> Result<Self> {
        if config.database_url.is_none() {
            std::fs::create_dir_all(config.database_dir())?;
        }
        let db = DbService::new(&config.database_url())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        Ok(Self::from_pool(config.clone(), db.pool))
    }

    /// Build state around an existing pool (tests, embedding)
    pub fn from_pool(config: Config, pool: SqlitePool) -> Self {
        let tz: Tz = config.timezone;
        Self {
            accounts: AccountEngine::new(pool.clone()),
            ledger: LedgerService::new(pool.clone(), tz),
            config,
            pool,
        }
    }
}
