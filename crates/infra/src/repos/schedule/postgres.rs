use super::IScheduleRepo;
use practice_scheduler_domain::{CustomTarget, FilingType, Schedule, ScheduleKind, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresScheduleRepo {
    pool: PgPool,
}

impl PostgresScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduleRaw {
    schedule_uid: Uuid,
    name: String,
    kind: serde_json::Value,
    steps: serde_json::Value,
    is_active: bool,
}

impl Into<Schedule> for ScheduleRaw {
    fn into(self) -> Schedule {
        Schedule {
            id: self.schedule_uid.into(),
            name: self.name,
            kind: serde_json::from_value(self.kind).unwrap_or(ScheduleKind::Custom {
                target: CustomTarget::Fixed {
                    date: Default::default(),
                },
                send_hour: None,
            }),
            steps: serde_json::from_value(self.steps).unwrap_or_default(),
            is_active: self.is_active,
        }
    }
}

#[async_trait::async_trait]
impl IScheduleRepo for PostgresScheduleRepo {
    async fn insert(&self, schedule: &Schedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules(schedule_uid, name, kind, steps, is_active)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(&schedule.name)
        .bind(Json(&schedule.kind))
        .bind(Json(&schedule.steps))
        .bind(schedule.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, schedule: &Schedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE schedules
            SET name = $2,
            kind = $3,
            steps = $4,
            is_active = $5
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(&schedule.name)
        .bind(Json(&schedule.kind))
        .bind(Json(&schedule.steps))
        .bind(schedule.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, schedule_id: &ID) -> Option<Schedule> {
        let schedule: ScheduleRaw = match sqlx::query_as(
            r#"
            SELECT * FROM schedules
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(schedule) => schedule,
            Err(_) => return None,
        };
        Some(schedule.into())
    }

    async fn find_many(&self, schedule_ids: &[ID]) -> Vec<Schedule> {
        let ids = schedule_ids
            .iter()
            .map(|id| id.inner_ref().clone())
            .collect::<Vec<_>>();
        sqlx::query_as::<_, ScheduleRaw>(
            r#"
            SELECT * FROM schedules
            WHERE schedule_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![])
        .into_iter()
        .map(|s| s.into())
        .collect()
    }

    async fn find_all(&self) -> Vec<Schedule> {
        let schedules: Vec<ScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM schedules
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        schedules.into_iter().map(|s| s.into()).collect()
    }

    async fn find_active_by_filing_type(&self, filing_type: FilingType) -> Option<Schedule> {
        let schedule: ScheduleRaw = match sqlx::query_as(
            r#"
            SELECT * FROM schedules
            WHERE is_active = TRUE
                AND kind->>'type' = 'filing'
                AND kind->>'filingType' = $1
            "#,
        )
        .bind(filing_type.key())
        .fetch_one(&self.pool)
        .await
        {
            Ok(schedule) => schedule,
            Err(_) => return None,
        };
        Some(schedule.into())
    }

    async fn find_active_custom(&self) -> Vec<Schedule> {
        let schedules: Vec<ScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM schedules
            WHERE is_active = TRUE AND kind->>'type' = 'custom'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        schedules.into_iter().map(|s| s.into()).collect()
    }
}
