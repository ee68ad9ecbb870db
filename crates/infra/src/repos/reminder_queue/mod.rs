mod inmemory;
mod postgres;

use chrono::{DateTime, NaiveDate, Utc};
pub use inmemory::InMemoryReminderQueueRepo;
pub use postgres::PostgresReminderQueueRepo;
use practice_scheduler_domain::{FilingType, ReminderQueueEntry, ID};

use crate::repos::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait IReminderQueueRepo: Send + Sync {
    /// Returns true when a new entry was inserted and false when an
    /// entry with the same idempotency key already existed
    async fn insert_if_absent(&self, entry: &ReminderQueueEntry) -> anyhow::Result<bool>;
    async fn save(&self, entry: &ReminderQueueEntry) -> anyhow::Result<()>;
    async fn find(&self, entry_id: &ID) -> Option<ReminderQueueEntry>;
    async fn find_by_client(&self, client_id: &ID) -> Vec<ReminderQueueEntry>;
    async fn find_scheduled_on(
        &self,
        send_date: NaiveDate,
    ) -> anyhow::Result<Vec<ReminderQueueEntry>>;
    /// Sent filing reminders whose deadline has passed, the input to
    /// the rollover sweep
    async fn find_sent_filing_due_before(&self, before: NaiveDate) -> Vec<ReminderQueueEntry>;
    async fn mark_pending(&self, entry_ids: &[ID], queued_at: DateTime<Utc>)
        -> anyhow::Result<()>;
    async fn cancel_scheduled_for_filing(
        &self,
        client_id: &ID,
        filing_type: FilingType,
    ) -> anyhow::Result<i64>;
    async fn cancel_scheduled_before(
        &self,
        client_id: &ID,
        before: NaiveDate,
    ) -> anyhow::Result<i64>;
    async fn delete_scheduled_by_client(&self, client_id: &ID) -> anyhow::Result<DeleteResult>;
}
