use practice_scheduler_domain::{Schedule, ScheduleKind, ScheduleStep, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDTO {
    pub id: ID,
    pub name: String,
    pub kind: ScheduleKind,
    pub steps: Vec<ScheduleStep>,
    pub is_active: bool,
}

impl ScheduleDTO {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            id: schedule.id.clone(),
            name: schedule.name,
            kind: schedule.kind,
            steps: schedule.steps,
            is_active: schedule.is_active,
        }
    }
}
