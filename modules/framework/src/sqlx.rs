use tracing::info;

#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    executor: sqlx::PgPool,
}

impl DatabaseProcessor {
    pub fn new(executor: sqlx::PgPool) -> Self {
        Self { executor }
    }

    pub fn from_pool(pool: sqlx::PgPool) -> Self {
        Self::new(pool)
    }

    pub fn db(&self) -> &sqlx::PgPool {
        info!(monotonic_counter.sql = 1);
        &self.executor
    }

    /// Opens a transaction for commands that must commit together.
    pub async fn begin(&self) -> Result<sqlx::Transaction<'static, sqlx::Postgres>, sqlx::Error> {
        info!(monotonic_counter.sql_tx = 1);
        self.executor.begin().await
    }
}
