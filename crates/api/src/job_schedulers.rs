use crate::batch::run_batch::{BatchConfig, RunBatchUseCase};
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use chrono::Datelike;
use practice_scheduler_domain::date::uk_today;
use practice_scheduler_infra::{fetch_bank_holidays, PracticeContext};
use std::time::Duration;
use tracing::error;

pub fn secs_until_next_hour(now_ts: usize) -> usize {
    3600 - (now_ts / 1000) % 3600
}

/// Runs the reminder batch at the top of every hour. Which hours actually
/// send is decided inside the run itself, so the job stays ignorant of
/// send hours and daylight saving.
pub fn start_batch_job(ctx: PracticeContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.now().timestamp_millis();
        let secs_to_next_run = secs_until_next_hour(now as usize);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut hourly_interval = interval(Duration::from_secs(60 * 60));
        loop {
            hourly_interval.tick().await;

            let usecase = RunBatchUseCase {
                config: BatchConfig::from_context(&ctx),
            };
            if let Err(e) = execute(usecase, &ctx).await {
                error!("Hourly reminder batch failed: {:?}", e);
            }
        }
    });
}

/// Refreshes the stored GOV.UK bank holidays daily, starting at boot so a
/// fresh deployment has them before the first batch.
pub fn start_bank_holiday_refresh_job(ctx: PracticeContext) {
    actix_web::rt::spawn(async move {
        let mut daily_interval = interval(Duration::from_secs(60 * 60 * 24));
        loop {
            daily_interval.tick().await;

            let current_year = uk_today(ctx.sys.now()).year();
            let holidays = fetch_bank_holidays(current_year).await;
            if let Err(e) = ctx.repos.bank_holidays.insert_many(&holidays).await {
                error!("Could not store the refreshed bank holidays: {:?}", e);
            }
        }
    });
}
