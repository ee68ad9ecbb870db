use super::IAuditRepo;
use chrono::{DateTime, Utc};
use practice_scheduler_domain::AuditEntry;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAuditRepo {
    pool: PgPool,
}

impl PostgresAuditRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditEntryRaw {
    entry_uid: Uuid,
    client_uid: Option<Uuid>,
    filing_type: Option<String>,
    message: String,
    created_at: DateTime<Utc>,
}

impl Into<AuditEntry> for AuditEntryRaw {
    fn into(self) -> AuditEntry {
        AuditEntry {
            id: self.entry_uid.into(),
            client_id: self.client_uid.map(Into::into),
            filing_type: self.filing_type.and_then(|f| f.parse().ok()),
            message: self.message,
            created_at: self.created_at,
        }
    }
}

#[async_trait::async_trait]
impl IAuditRepo for PostgresAuditRepo {
    async fn insert(&self, entry: &AuditEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log
            (entry_uid, client_uid, filing_type, message, created_at)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id.inner_ref())
        .bind(entry.client_id.as_ref().map(|id| id.inner_ref().clone()))
        .bind(entry.filing_type.map(|f| f.key()))
        .bind(&entry.message)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> Vec<AuditEntry> {
        let entries: Vec<AuditEntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM audit_log
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        entries.into_iter().map(|e| e.into()).collect()
    }
}
