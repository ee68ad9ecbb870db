use super::IBatchLockRepo;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

pub struct PostgresBatchLockRepo {
    pool: PgPool,
}

impl PostgresBatchLockRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IBatchLockRepo for PostgresBatchLockRepo {
    async fn acquire(
        &self,
        lock_name: &str,
        now: DateTime<Utc>,
        ttl_secs: i64,
    ) -> anyhow::Result<bool> {
        let expires_at = now + Duration::seconds(ttl_secs);
        // The conditional upsert makes acquire atomic: either the row
        // is new, or it is only overwritten when already expired
        let res = sqlx::query(
            r#"
            INSERT INTO batch_locks(lock_name, acquired_at, expires_at)
            VALUES($1, $2, $3)
            ON CONFLICT (lock_name) DO UPDATE
            SET acquired_at = EXCLUDED.acquired_at,
                expires_at = EXCLUDED.expires_at
            WHERE batch_locks.expires_at <= $2
            "#,
        )
        .bind(lock_name)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn release(&self, lock_name: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM batch_locks
            WHERE lock_name = $1
            "#,
        )
        .bind(lock_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
