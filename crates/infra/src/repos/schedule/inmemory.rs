use super::IScheduleRepo;
use crate::repos::shared::inmemory_repo::*;
use practice_scheduler_domain::{FilingType, Schedule, ID};

pub struct InMemoryScheduleRepo {
    schedules: std::sync::Mutex<Vec<Schedule>>,
}

impl InMemoryScheduleRepo {
    pub fn new() -> Self {
        Self {
            schedules: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduleRepo for InMemoryScheduleRepo {
    async fn insert(&self, schedule: &Schedule) -> anyhow::Result<()> {
        insert(schedule, &self.schedules);
        Ok(())
    }

    async fn save(&self, schedule: &Schedule) -> anyhow::Result<()> {
        save(schedule, &self.schedules);
        Ok(())
    }

    async fn find(&self, schedule_id: &ID) -> Option<Schedule> {
        find(schedule_id, &self.schedules)
    }

    async fn find_many(&self, schedule_ids: &[ID]) -> Vec<Schedule> {
        find_by(&self.schedules, |schedule| {
            schedule_ids.contains(&schedule.id)
        })
    }

    async fn find_all(&self) -> Vec<Schedule> {
        find_by(&self.schedules, |_| true)
    }

    async fn find_active_by_filing_type(&self, filing_type: FilingType) -> Option<Schedule> {
        let mut schedules = find_by(&self.schedules, |schedule| {
            schedule.is_active && schedule.filing_type() == Some(filing_type)
        });
        if schedules.is_empty() {
            return None;
        }
        Some(schedules.remove(0))
    }

    async fn find_active_custom(&self) -> Vec<Schedule> {
        find_by(&self.schedules, |schedule| {
            schedule.is_active && schedule.is_custom()
        })
    }
}
