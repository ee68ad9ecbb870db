mod inmemory;
mod postgres;

use chrono::NaiveDate;
pub use inmemory::InMemoryBankHolidayRepo;
pub use postgres::PostgresBankHolidayRepo;
use practice_scheduler_domain::BankHoliday;
use std::collections::HashSet;

/// Cache of UK bank holiday dates used to snap send dates onto
/// working days
#[async_trait::async_trait]
pub trait IBankHolidayRepo: Send + Sync {
    async fn insert_many(&self, holidays: &[BankHoliday]) -> anyhow::Result<()>;
    async fn all_dates(&self) -> HashSet<NaiveDate>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use chrono::NaiveDate;
    use practice_scheduler_domain::BankHoliday;

    #[tokio::test]
    async fn test_insert_many_is_reentrant() {
        let ctx = setup_context().await;
        let holidays = vec![
            BankHoliday::new(
                NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
                "Christmas Day",
            ),
            BankHoliday::new(
                NaiveDate::from_ymd_opt(2025, 12, 26).unwrap(),
                "Boxing Day",
            ),
        ];

        ctx.repos
            .bank_holidays
            .insert_many(&holidays)
            .await
            .expect("To insert holidays");
        // The refresh job reinserts the same dates every run
        ctx.repos
            .bank_holidays
            .insert_many(&holidays)
            .await
            .expect("To insert holidays");

        let dates = ctx.repos.bank_holidays.all_dates().await;
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
    }
}
