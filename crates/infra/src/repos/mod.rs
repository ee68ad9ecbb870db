mod audit;
mod bank_holiday;
mod batch_lock;
mod client;
mod deadline_override;
mod filing_assignment;
mod reminder_queue;
mod schedule;
mod schedule_exclusion;
mod shared;
mod template;

pub use audit::{IAuditRepo, InMemoryAuditRepo, PostgresAuditRepo};
pub use bank_holiday::{IBankHolidayRepo, InMemoryBankHolidayRepo, PostgresBankHolidayRepo};
pub use batch_lock::{IBatchLockRepo, InMemoryBatchLockRepo, PostgresBatchLockRepo};
pub use client::{IClientRepo, InMemoryClientRepo, PostgresClientRepo};
pub use deadline_override::{
    IDeadlineOverrideRepo, InMemoryDeadlineOverrideRepo, PostgresDeadlineOverrideRepo,
};
pub use filing_assignment::{
    IFilingAssignmentRepo, InMemoryFilingAssignmentRepo, PostgresFilingAssignmentRepo,
};
pub use reminder_queue::{
    IReminderQueueRepo, InMemoryReminderQueueRepo, PostgresReminderQueueRepo,
};
pub use schedule::{IScheduleRepo, InMemoryScheduleRepo, PostgresScheduleRepo};
pub use schedule_exclusion::{
    IScheduleExclusionRepo, InMemoryScheduleExclusionRepo, PostgresScheduleExclusionRepo,
};
pub use shared::repo::DeleteResult;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use template::{ITemplateRepo, InMemoryTemplateRepo, PostgresTemplateRepo};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub clients: Arc<dyn IClientRepo>,
    pub filing_assignments: Arc<dyn IFilingAssignmentRepo>,
    pub deadline_overrides: Arc<dyn IDeadlineOverrideRepo>,
    pub schedules: Arc<dyn IScheduleRepo>,
    pub schedule_exclusions: Arc<dyn IScheduleExclusionRepo>,
    pub templates: Arc<dyn ITemplateRepo>,
    pub reminder_queue: Arc<dyn IReminderQueueRepo>,
    pub batch_locks: Arc<dyn IBatchLockRepo>,
    pub audit: Arc<dyn IAuditRepo>,
    pub bank_holidays: Arc<dyn IBankHolidayRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            clients: Arc::new(PostgresClientRepo::new(pool.clone())),
            filing_assignments: Arc::new(PostgresFilingAssignmentRepo::new(pool.clone())),
            deadline_overrides: Arc::new(PostgresDeadlineOverrideRepo::new(pool.clone())),
            schedules: Arc::new(PostgresScheduleRepo::new(pool.clone())),
            schedule_exclusions: Arc::new(PostgresScheduleExclusionRepo::new(pool.clone())),
            templates: Arc::new(PostgresTemplateRepo::new(pool.clone())),
            reminder_queue: Arc::new(PostgresReminderQueueRepo::new(pool.clone())),
            batch_locks: Arc::new(PostgresBatchLockRepo::new(pool.clone())),
            audit: Arc::new(PostgresAuditRepo::new(pool.clone())),
            bank_holidays: Arc::new(PostgresBankHolidayRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            clients: Arc::new(InMemoryClientRepo::new()),
            filing_assignments: Arc::new(InMemoryFilingAssignmentRepo::new()),
            deadline_overrides: Arc::new(InMemoryDeadlineOverrideRepo::new()),
            schedules: Arc::new(InMemoryScheduleRepo::new()),
            schedule_exclusions: Arc::new(InMemoryScheduleExclusionRepo::new()),
            templates: Arc::new(InMemoryTemplateRepo::new()),
            reminder_queue: Arc::new(InMemoryReminderQueueRepo::new()),
            batch_locks: Arc::new(InMemoryBatchLockRepo::new()),
            audit: Arc::new(InMemoryAuditRepo::new()),
            bank_holidays: Arc::new(InMemoryBankHolidayRepo::new()),
        }
    }
}
