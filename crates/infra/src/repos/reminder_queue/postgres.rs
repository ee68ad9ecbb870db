use super::IReminderQueueRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::{DateTime, NaiveDate, Utc};
use practice_scheduler_domain::{FilingType, ReminderQueueEntry, ReminderStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderQueueRepo {
    pool: PgPool,
}

impl PostgresReminderQueueRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct QueueEntryRaw {
    entry_uid: Uuid,
    client_uid: Uuid,
    filing_type: Option<String>,
    schedule_uid: Uuid,
    step_index: i32,
    deadline_date: NaiveDate,
    send_date: NaiveDate,
    status: String,
    resolved_subject: Option<String>,
    resolved_text: Option<String>,
    resolved_html: Option<String>,
    queued_at: Option<DateTime<Utc>>,
}

impl Into<ReminderQueueEntry> for QueueEntryRaw {
    fn into(self) -> ReminderQueueEntry {
        ReminderQueueEntry {
            id: self.entry_uid.into(),
            client_id: self.client_uid.into(),
            filing_type: self.filing_type.and_then(|f| f.parse().ok()),
            schedule_id: self.schedule_uid.into(),
            step_index: self.step_index,
            deadline_date: self.deadline_date,
            send_date: self.send_date,
            status: self.status.parse().unwrap_or(ReminderStatus::Scheduled),
            resolved_subject: self.resolved_subject,
            resolved_text: self.resolved_text,
            resolved_html: self.resolved_html,
            queued_at: self.queued_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderQueueRepo for PostgresReminderQueueRepo {
    async fn insert_if_absent(&self, entry: &ReminderQueueEntry) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO reminder_queue
            (entry_uid, client_uid, filing_type, schedule_uid, step_index, deadline_date, send_date, status, resolved_subject, resolved_text, resolved_html, queued_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(entry.id.inner_ref())
        .bind(entry.client_id.inner_ref())
        .bind(entry.filing_type.map(|f| f.key()))
        .bind(entry.schedule_id.inner_ref())
        .bind(entry.step_index)
        .bind(entry.deadline_date)
        .bind(entry.send_date)
        .bind(entry.status.to_string())
        .bind(&entry.resolved_subject)
        .bind(&entry.resolved_text)
        .bind(&entry.resolved_html)
        .bind(entry.queued_at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn save(&self, entry: &ReminderQueueEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_queue
            SET status = $2,
            resolved_subject = $3,
            resolved_text = $4,
            resolved_html = $5,
            queued_at = $6
            WHERE entry_uid = $1
            "#,
        )
        .bind(entry.id.inner_ref())
        .bind(entry.status.to_string())
        .bind(&entry.resolved_subject)
        .bind(&entry.resolved_text)
        .bind(&entry.resolved_html)
        .bind(entry.queued_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, entry_id: &ID) -> Option<ReminderQueueEntry> {
        let entry: QueueEntryRaw = match sqlx::query_as(
            r#"
            SELECT * FROM reminder_queue
            WHERE entry_uid = $1
            "#,
        )
        .bind(entry_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(entry) => entry,
            Err(_) => return None,
        };
        Some(entry.into())
    }

    async fn find_by_client(&self, client_id: &ID) -> Vec<ReminderQueueEntry> {
        let entries: Vec<QueueEntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_queue
            WHERE client_uid = $1
            ORDER BY send_date, step_index
            "#,
        )
        .bind(client_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        entries.into_iter().map(|e| e.into()).collect()
    }

    async fn find_scheduled_on(
        &self,
        send_date: NaiveDate,
    ) -> anyhow::Result<Vec<ReminderQueueEntry>> {
        let entries: Vec<QueueEntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_queue
            WHERE status = 'scheduled' AND send_date = $1
            "#,
        )
        .bind(send_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    async fn find_sent_filing_due_before(&self, before: NaiveDate) -> Vec<ReminderQueueEntry> {
        let entries: Vec<QueueEntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_queue
            WHERE status = 'sent' AND filing_type IS NOT NULL AND deadline_date < $1
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        entries.into_iter().map(|e| e.into()).collect()
    }

    async fn mark_pending(
        &self,
        entry_ids: &[ID],
        queued_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let ids = entry_ids
            .iter()
            .map(|id| id.inner_ref().clone())
            .collect::<Vec<_>>();
        sqlx::query(
            r#"
            UPDATE reminder_queue
            SET status = 'pending', queued_at = $2
            WHERE entry_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .bind(queued_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn cancel_scheduled_for_filing(
        &self,
        client_id: &ID,
        filing_type: FilingType,
    ) -> anyhow::Result<i64> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_queue
            SET status = 'cancelled'
            WHERE client_uid = $1 AND filing_type = $2 AND status = 'scheduled'
            "#,
        )
        .bind(client_id.inner_ref())
        .bind(filing_type.key())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() as i64)
    }

    async fn cancel_scheduled_before(
        &self,
        client_id: &ID,
        before: NaiveDate,
    ) -> anyhow::Result<i64> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_queue
            SET status = 'cancelled'
            WHERE client_uid = $1 AND status = 'scheduled' AND send_date < $2
            "#,
        )
        .bind(client_id.inner_ref())
        .bind(before)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() as i64)
    }

    async fn delete_scheduled_by_client(&self, client_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminder_queue
            WHERE client_uid = $1 AND status = 'scheduled'
            "#,
        )
        .bind(client_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
