use super::IScheduleExclusionRepo;
use practice_scheduler_domain::ID;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresScheduleExclusionRepo {
    pool: PgPool,
}

impl PostgresScheduleExclusionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ExclusionRaw {
    client_uid: Uuid,
}

#[async_trait::async_trait]
impl IScheduleExclusionRepo for PostgresScheduleExclusionRepo {
    async fn set_for_schedule(&self, schedule_id: &ID, client_ids: &[ID]) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM schedule_client_exclusions
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule_id.inner_ref())
        .execute(&self.pool)
        .await?;

        for client_id in client_ids {
            sqlx::query(
                r#"
                INSERT INTO schedule_client_exclusions(schedule_uid, client_uid)
                VALUES($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(schedule_id.inner_ref())
            .bind(client_id.inner_ref())
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn find_by_schedule(&self, schedule_id: &ID) -> Vec<ID> {
        let exclusions: Vec<ExclusionRaw> = sqlx::query_as(
            r#"
            SELECT client_uid FROM schedule_client_exclusions
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        exclusions
            .into_iter()
            .map(|exclusion| exclusion.client_uid.into())
            .collect()
    }
}
