use crate::dtos::AuditEntryDTO;
use practice_scheduler_domain::AuditEntry;
use serde::{Deserialize, Serialize};

pub mod get_audit_log {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub limit: Option<usize>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entries: Vec<AuditEntryDTO>,
    }

    impl APIResponse {
        pub fn new(entries: Vec<AuditEntry>) -> Self {
            Self {
                entries: entries.into_iter().map(AuditEntryDTO::new).collect(),
            }
        }
    }
}
