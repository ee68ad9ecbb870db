use crate::filing::FilingType;
use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};

/// Append only diagnostic record surfaced to operators: skipped expansions,
/// missing templates, render failures, lock contention and the like.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: ID,
    pub client_id: Option<ID>,
    pub filing_type: Option<FilingType>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        client_id: Option<ID>,
        filing_type: Option<FilingType>,
        message: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            client_id,
            filing_type,
            message,
            created_at,
        }
    }
}

impl Entity for AuditEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
