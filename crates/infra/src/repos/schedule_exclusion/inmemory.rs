use super::IScheduleExclusionRepo;
use crate::repos::shared::inmemory_repo::*;
use practice_scheduler_domain::ID;

pub struct InMemoryScheduleExclusionRepo {
    exclusions: std::sync::Mutex<Vec<(ID, ID)>>,
}

impl InMemoryScheduleExclusionRepo {
    pub fn new() -> Self {
        Self {
            exclusions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduleExclusionRepo for InMemoryScheduleExclusionRepo {
    async fn set_for_schedule(&self, schedule_id: &ID, client_ids: &[ID]) -> anyhow::Result<()> {
        delete_by(&self.exclusions, |(schedule, _)| schedule == schedule_id);
        for client_id in client_ids {
            insert(&(schedule_id.clone(), client_id.clone()), &self.exclusions);
        }
        Ok(())
    }

    async fn find_by_schedule(&self, schedule_id: &ID) -> Vec<ID> {
        find_by(&self.exclusions, |(schedule, _)| schedule == schedule_id)
            .into_iter()
            .map(|(_, client_id)| client_id)
            .collect()
    }
}
