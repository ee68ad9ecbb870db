mod inmemory;
mod postgres;

pub use inmemory::InMemoryScheduleRepo;
pub use postgres::PostgresScheduleRepo;
use practice_scheduler_domain::{FilingType, Schedule, ID};

#[async_trait::async_trait]
pub trait IScheduleRepo: Send + Sync {
    async fn insert(&self, schedule: &Schedule) -> anyhow::Result<()>;
    async fn save(&self, schedule: &Schedule) -> anyhow::Result<()>;
    async fn find(&self, schedule_id: &ID) -> Option<Schedule>;
    async fn find_many(&self, schedule_ids: &[ID]) -> Vec<Schedule>;
    async fn find_all(&self) -> Vec<Schedule>;
    /// At most one active schedule exists per filing type
    async fn find_active_by_filing_type(&self, filing_type: FilingType) -> Option<Schedule>;
    async fn find_active_custom(&self) -> Vec<Schedule>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use chrono::NaiveDate;
    use practice_scheduler_domain::{
        CustomTarget, FilingType, Schedule, ScheduleKind, ScheduleStep, ID,
    };

    fn steps() -> Vec<ScheduleStep> {
        vec![
            ScheduleStep {
                step_number: 1,
                email_template_id: ID::default(),
                delay_days: 30,
            },
            ScheduleStep {
                step_number: 2,
                email_template_id: ID::default(),
                delay_days: 7,
            },
        ]
    }

    #[tokio::test]
    async fn create_and_update() {
        let ctx = setup_context().await;

        let mut schedule = Schedule::new(
            "VAT chase".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            },
            steps(),
        );

        // Insert
        assert!(ctx.repos.schedules.insert(&schedule).await.is_ok());

        // Different find methods
        let found = ctx
            .repos
            .schedules
            .find(&schedule.id)
            .await
            .expect("To find schedule");
        assert_eq!(found.steps.len(), 2);
        assert_eq!(found.filing_type(), Some(FilingType::VatReturn));
        let found = ctx
            .repos
            .schedules
            .find_many(&vec![schedule.id.clone()])
            .await;
        assert_eq!(found.len(), 1);

        // Save
        schedule.is_active = false;
        assert!(ctx.repos.schedules.save(&schedule).await.is_ok());
        let found = ctx
            .repos
            .schedules
            .find(&schedule.id)
            .await
            .expect("To find schedule");
        assert!(!found.is_active);
    }

    #[tokio::test]
    async fn finds_active_by_kind() {
        let ctx = setup_context().await;

        let filing = Schedule::new(
            "Accounts chase".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CompaniesHouseAccounts,
            },
            steps(),
        );
        let custom = Schedule::new(
            "January newsletter".into(),
            ScheduleKind::Custom {
                target: CustomTarget::Fixed {
                    date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                },
                send_hour: Some(14),
            },
            steps(),
        );
        let mut inactive = Schedule::new(
            "Old VAT chase".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            },
            steps(),
        );
        inactive.is_active = false;

        for schedule in [&filing, &custom, &inactive] {
            ctx.repos
                .schedules
                .insert(schedule)
                .await
                .expect("To insert schedule");
        }

        let found = ctx
            .repos
            .schedules
            .find_active_by_filing_type(FilingType::CompaniesHouseAccounts)
            .await
            .expect("To find active schedule");
        assert_eq!(found.id, filing.id);
        assert!(ctx
            .repos
            .schedules
            .find_active_by_filing_type(FilingType::VatReturn)
            .await
            .is_none());

        let customs = ctx.repos.schedules.find_active_custom().await;
        assert_eq!(customs.len(), 1);
        assert_eq!(customs[0].id, custom.id);
    }
}
