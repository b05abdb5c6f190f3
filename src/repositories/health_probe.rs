use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use super::HealthProbe;
use crate::db::AsyncDbPool;
use crate::error::AppError;

/// Checks database connectivity straight through the connection pool.
#[derive(Clone)]
pub struct DatabaseProbe {
    pool: AsyncDbPool,
}

impl DatabaseProbe {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for DatabaseProbe {
    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
