use crate::dtos::ScheduleDTO;
use practice_scheduler_domain::{Schedule, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub schedule: ScheduleDTO,
}

impl ScheduleResponse {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule: ScheduleDTO::new(schedule),
        }
    }
}

pub mod create_schedule {
    use practice_scheduler_domain::{ScheduleKind, ScheduleStep};

    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub kind: ScheduleKind,
        pub steps: Vec<ScheduleStep>,
        /// Custom schedules only: restricts the schedule to these clients.
        /// Stored as the complement, an exclusion list, so clients added
        /// later are excluded too.
        pub selected_client_ids: Option<Vec<ID>>,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod get_schedule {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub schedule_id: ID,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod get_schedules {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub schedules: Vec<ScheduleDTO>,
    }

    impl APIResponse {
        pub fn new(schedules: Vec<Schedule>) -> Self {
            Self {
                schedules: schedules.into_iter().map(ScheduleDTO::new).collect(),
            }
        }
    }
}

pub mod update_schedule {
    use practice_scheduler_domain::{ScheduleKind, ScheduleStep};

    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub schedule_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: Option<String>,
        pub kind: Option<ScheduleKind>,
        pub steps: Option<Vec<ScheduleStep>>,
        pub is_active: Option<bool>,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod set_schedule_exclusions {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub schedule_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub client_ids: Vec<ID>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub excluded_client_ids: Vec<ID>,
    }
}
