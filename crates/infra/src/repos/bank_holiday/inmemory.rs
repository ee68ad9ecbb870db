use super::IBankHolidayRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDate;
use practice_scheduler_domain::BankHoliday;
use std::collections::HashSet;

pub struct InMemoryBankHolidayRepo {
    holidays: std::sync::Mutex<Vec<BankHoliday>>,
}

impl InMemoryBankHolidayRepo {
    pub fn new() -> Self {
        Self {
            holidays: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IBankHolidayRepo for InMemoryBankHolidayRepo {
    async fn insert_many(&self, holidays: &[BankHoliday]) -> anyhow::Result<()> {
        for holiday in holidays {
            delete_by(&self.holidays, |existing| existing.date == holiday.date);
            insert(holiday, &self.holidays);
        }
        Ok(())
    }

    async fn all_dates(&self) -> HashSet<NaiveDate> {
        find_by(&self.holidays, |_| true)
            .into_iter()
            .map(|holiday| holiday.date)
            .collect()
    }
}
