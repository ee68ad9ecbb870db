use chrono::{DateTime, NaiveDate, Utc};
use practice_scheduler_domain::{FilingType, ReminderQueueEntry, ReminderStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderQueueEntryDTO {
    pub id: ID,
    pub client_id: ID,
    pub filing_type: Option<FilingType>,
    pub schedule_id: ID,
    pub step_index: i32,
    pub deadline_date: NaiveDate,
    pub send_date: NaiveDate,
    pub status: ReminderStatus,
    pub resolved_subject: Option<String>,
    pub resolved_text: Option<String>,
    pub resolved_html: Option<String>,
    pub queued_at: Option<DateTime<Utc>>,
}

impl ReminderQueueEntryDTO {
    pub fn new(entry: ReminderQueueEntry) -> Self {
        Self {
            id: entry.id,
            client_id: entry.client_id,
            filing_type: entry.filing_type,
            schedule_id: entry.schedule_id,
            step_index: entry.step_index,
            deadline_date: entry.deadline_date,
            send_date: entry.send_date,
            status: entry.status,
            resolved_subject: entry.resolved_subject,
            resolved_text: entry.resolved_text,
            resolved_html: entry.resolved_html,
            queued_at: entry.queued_at,
        }
    }
}
