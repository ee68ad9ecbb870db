use crate::filing::FilingType;
use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    /// Created by the queue builder, waiting for its send date.
    Scheduled,
    /// Selected by the batch and handed over to the email sender.
    Pending,
    /// The sender reported delivery.
    Sent,
    /// Withdrawn: records received, unpause past the send date, or edit.
    Cancelled,
    /// The sender reported a delivery failure.
    Failed,
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ReminderStatus::Scheduled => "scheduled",
            ReminderStatus::Pending => "pending",
            ReminderStatus::Sent => "sent",
            ReminderStatus::Cancelled => "cancelled",
            ReminderStatus::Failed => "failed",
        };
        write!(f, "{}", status)
    }
}

#[derive(Error, Debug)]
#[error("Invalid reminder status: {0}")]
pub struct InvalidReminderStatusError(pub String);

impl FromStr for ReminderStatus {
    type Err = InvalidReminderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(ReminderStatus::Scheduled),
            "pending" => Ok(ReminderStatus::Pending),
            "sent" => Ok(ReminderStatus::Sent),
            "cancelled" => Ok(ReminderStatus::Cancelled),
            "failed" => Ok(ReminderStatus::Failed),
            _ => Err(InvalidReminderStatusError(s.to_string())),
        }
    }
}

/// One concrete dated reminder, the central mutable record of the system.
///
/// At most one entry exists per (client, filing type or null, step, deadline
/// date). The queue builder relies on that key to stay idempotent, so the
/// store enforces it and inserts are check then insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderQueueEntry {
    pub id: ID,
    pub client_id: ID,
    /// `None` for reminders produced by a custom schedule.
    pub filing_type: Option<FilingType>,
    /// The schedule whose step produced this entry.
    pub schedule_id: ID,
    pub step_index: i32,
    /// The deadline or custom target the reminder counts down to.
    pub deadline_date: NaiveDate,
    /// The day the reminder should go out, already snapped to a working day.
    pub send_date: NaiveDate,
    pub status: ReminderStatus,
    /// Filled in when the batch marks the entry pending.
    pub resolved_subject: Option<String>,
    pub resolved_text: Option<String>,
    pub resolved_html: Option<String>,
    pub queued_at: Option<DateTime<Utc>>,
}

impl ReminderQueueEntry {
    pub fn new(
        client_id: ID,
        filing_type: Option<FilingType>,
        schedule_id: ID,
        step_index: i32,
        deadline_date: NaiveDate,
        send_date: NaiveDate,
    ) -> Self {
        Self {
            id: Default::default(),
            client_id,
            filing_type,
            schedule_id,
            step_index,
            deadline_date,
            send_date,
            status: ReminderStatus::Scheduled,
            resolved_subject: None,
            resolved_text: None,
            resolved_html: None,
            queued_at: None,
        }
    }
}

impl Entity for ReminderQueueEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
