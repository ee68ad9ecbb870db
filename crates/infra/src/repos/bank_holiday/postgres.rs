use super::IBankHolidayRepo;
use chrono::NaiveDate;
use practice_scheduler_domain::BankHoliday;
use sqlx::{FromRow, PgPool};
use std::collections::HashSet;

pub struct PostgresBankHolidayRepo {
    pool: PgPool,
}

impl PostgresBankHolidayRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BankHolidayRaw {
    holiday_date: NaiveDate,
}

#[async_trait::async_trait]
impl IBankHolidayRepo for PostgresBankHolidayRepo {
    async fn insert_many(&self, holidays: &[BankHoliday]) -> anyhow::Result<()> {
        for holiday in holidays {
            sqlx::query(
                r#"
                INSERT INTO bank_holidays(holiday_date, title)
                VALUES($1, $2)
                ON CONFLICT (holiday_date) DO UPDATE
                SET title = EXCLUDED.title
                "#,
            )
            .bind(holiday.date)
            .bind(&holiday.title)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn all_dates(&self) -> HashSet<NaiveDate> {
        let holidays: Vec<BankHolidayRaw> = sqlx::query_as(
            r#"
            SELECT holiday_date FROM bank_holidays
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        holidays
            .into_iter()
            .map(|holiday| holiday.holiday_date)
            .collect()
    }
}
