use super::IReminderQueueRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use chrono::{DateTime, NaiveDate, Utc};
use practice_scheduler_domain::{FilingType, ReminderQueueEntry, ReminderStatus, ID};

pub struct InMemoryReminderQueueRepo {
    entries: std::sync::Mutex<Vec<ReminderQueueEntry>>,
}

impl InMemoryReminderQueueRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn same_idempotency_key(existing: &ReminderQueueEntry, entry: &ReminderQueueEntry) -> bool {
    if existing.client_id != entry.client_id
        || existing.step_index != entry.step_index
        || existing.deadline_date != entry.deadline_date
    {
        return false;
    }
    match entry.filing_type {
        // Filing reminders are keyed by filing type
        Some(filing_type) => existing.filing_type == Some(filing_type),
        // Custom reminders are keyed by their schedule instead
        None => existing.filing_type.is_none() && existing.schedule_id == entry.schedule_id,
    }
}

#[async_trait::async_trait]
impl IReminderQueueRepo for InMemoryReminderQueueRepo {
    async fn insert_if_absent(&self, entry: &ReminderQueueEntry) -> anyhow::Result<bool> {
        let duplicates = find_by(&self.entries, |existing| {
            same_idempotency_key(existing, entry)
        });
        if !duplicates.is_empty() {
            return Ok(false);
        }
        insert(entry, &self.entries);
        Ok(true)
    }

    async fn save(&self, entry: &ReminderQueueEntry) -> anyhow::Result<()> {
        save(entry, &self.entries);
        Ok(())
    }

    async fn find(&self, entry_id: &ID) -> Option<ReminderQueueEntry> {
        find(entry_id, &self.entries)
    }

    async fn find_by_client(&self, client_id: &ID) -> Vec<ReminderQueueEntry> {
        let mut entries = find_by(&self.entries, |entry| entry.client_id == *client_id);
        entries.sort_by_key(|entry| (entry.send_date, entry.step_index));
        entries
    }

    async fn find_scheduled_on(
        &self,
        send_date: NaiveDate,
    ) -> anyhow::Result<Vec<ReminderQueueEntry>> {
        Ok(find_by(&self.entries, |entry| {
            entry.status == ReminderStatus::Scheduled && entry.send_date == send_date
        }))
    }

    async fn find_sent_filing_due_before(&self, before: NaiveDate) -> Vec<ReminderQueueEntry> {
        find_by(&self.entries, |entry| {
            entry.status == ReminderStatus::Sent
                && entry.filing_type.is_some()
                && entry.deadline_date < before
        })
    }

    async fn mark_pending(
        &self,
        entry_ids: &[ID],
        queued_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        update_many(
            &self.entries,
            |entry| entry_ids.contains(&entry.id),
            |entry| {
                entry.status = ReminderStatus::Pending;
                entry.queued_at = Some(queued_at);
            },
        );
        Ok(())
    }

    async fn cancel_scheduled_for_filing(
        &self,
        client_id: &ID,
        filing_type: FilingType,
    ) -> anyhow::Result<i64> {
        let cancelled = update_many(
            &self.entries,
            |entry| {
                entry.client_id == *client_id
                    && entry.filing_type == Some(filing_type)
                    && entry.status == ReminderStatus::Scheduled
            },
            |entry| entry.status = ReminderStatus::Cancelled,
        );
        Ok(cancelled as i64)
    }

    async fn cancel_scheduled_before(
        &self,
        client_id: &ID,
        before: NaiveDate,
    ) -> anyhow::Result<i64> {
        let cancelled = update_many(
            &self.entries,
            |entry| {
                entry.client_id == *client_id
                    && entry.status == ReminderStatus::Scheduled
                    && entry.send_date < before
            },
            |entry| entry.status = ReminderStatus::Cancelled,
        );
        Ok(cancelled as i64)
    }

    async fn delete_scheduled_by_client(&self, client_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.entries, |entry| {
            entry.client_id == *client_id && entry.status == ReminderStatus::Scheduled
        });
        Ok(res)
    }
}
