use super::IDeadlineOverrideRepo;
use chrono::NaiveDate;
use practice_scheduler_domain::{ClientDeadlineOverride, FilingType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresDeadlineOverrideRepo {
    pool: PgPool,
}

impl PostgresDeadlineOverrideRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OverrideRaw {
    override_uid: Uuid,
    client_uid: Uuid,
    filing_type: String,
    override_date: NaiveDate,
    reason: Option<String>,
}

impl Into<ClientDeadlineOverride> for OverrideRaw {
    fn into(self) -> ClientDeadlineOverride {
        ClientDeadlineOverride {
            id: self.override_uid.into(),
            client_id: self.client_uid.into(),
            filing_type: self
                .filing_type
                .parse()
                .unwrap_or(FilingType::CorporationTaxPayment),
            override_date: self.override_date,
            reason: self.reason,
        }
    }
}

#[async_trait::async_trait]
impl IDeadlineOverrideRepo for PostgresDeadlineOverrideRepo {
    async fn upsert(&self, deadline_override: &ClientDeadlineOverride) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO client_deadline_overrides
            (override_uid, client_uid, filing_type, override_date, reason)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (client_uid, filing_type) DO UPDATE
            SET override_date = EXCLUDED.override_date,
                reason = EXCLUDED.reason
            "#,
        )
        .bind(deadline_override.id.inner_ref())
        .bind(deadline_override.client_id.inner_ref())
        .bind(deadline_override.filing_type.key())
        .bind(deadline_override.override_date)
        .bind(&deadline_override.reason)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(
        &self,
        client_id: &ID,
        filing_type: FilingType,
    ) -> Option<ClientDeadlineOverride> {
        let deadline_override: OverrideRaw = match sqlx::query_as(
            r#"
            SELECT * FROM client_deadline_overrides
            WHERE client_uid = $1 AND filing_type = $2
            "#,
        )
        .bind(client_id.inner_ref())
        .bind(filing_type.key())
        .fetch_one(&self.pool)
        .await
        {
            Ok(deadline_override) => deadline_override,
            Err(_) => return None,
        };
        Some(deadline_override.into())
    }

    async fn find_by_client(&self, client_id: &ID) -> Vec<ClientDeadlineOverride> {
        let overrides: Vec<OverrideRaw> = sqlx::query_as(
            r#"
            SELECT * FROM client_deadline_overrides
            WHERE client_uid = $1
            ORDER BY filing_type
            "#,
        )
        .bind(client_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        overrides.into_iter().map(|o| o.into()).collect()
    }

    async fn delete(
        &self,
        client_id: &ID,
        filing_type: FilingType,
    ) -> Option<ClientDeadlineOverride> {
        let deadline_override: OverrideRaw = match sqlx::query_as(
            r#"
            DELETE FROM client_deadline_overrides
            WHERE client_uid = $1 AND filing_type = $2
            RETURNING *
            "#,
        )
        .bind(client_id.inner_ref())
        .bind(filing_type.key())
        .fetch_one(&self.pool)
        .await
        {
            Ok(deadline_override) => deadline_override,
            Err(_) => return None,
        };
        Some(deadline_override.into())
    }
}
