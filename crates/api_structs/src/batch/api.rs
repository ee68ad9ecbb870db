use practice_scheduler_domain::BatchRunReport;
use serde::{Deserialize, Serialize};

pub mod run_batch {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub report: BatchRunReport,
    }
}
