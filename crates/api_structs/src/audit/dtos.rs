use chrono::{DateTime, Utc};
use practice_scheduler_domain::{AuditEntry, FilingType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntryDTO {
    pub id: ID,
    pub client_id: Option<ID>,
    pub filing_type: Option<FilingType>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl AuditEntryDTO {
    pub fn new(entry: AuditEntry) -> Self {
        Self {
            id: entry.id,
            client_id: entry.client_id,
            filing_type: entry.filing_type,
            message: entry.message,
            created_at: entry.created_at,
        }
    }
}
