use crate::dtos::ReminderQueueEntryDTO;
use practice_scheduler_domain::{QueueBuildReport, ID};
use serde::{Deserialize, Serialize};

pub mod build_queue {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub report: QueueBuildReport,
    }
}

pub mod set_send_result {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub entry_id: ID,
    }

    /// What the external email sender reports back for a pending entry.
    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SendOutcome {
        Sent,
        Failed,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub outcome: SendOutcome,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entry: ReminderQueueEntryDTO,
    }
}
