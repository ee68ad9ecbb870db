mod inmemory;
mod postgres;

pub use inmemory::InMemoryScheduleExclusionRepo;
pub use postgres::PostgresScheduleExclusionRepo;
use practice_scheduler_domain::ID;

/// Clients listed here are skipped when the schedule's reminders are
/// queued. Storing the complement of the selected clients keeps newly
/// onboarded clients covered without editing every schedule.
#[async_trait::async_trait]
pub trait IScheduleExclusionRepo: Send + Sync {
    async fn set_for_schedule(&self, schedule_id: &ID, client_ids: &[ID]) -> anyhow::Result<()>;
    async fn find_by_schedule(&self, schedule_id: &ID) -> Vec<ID>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use practice_scheduler_domain::{Client, FilingType, Schedule, ScheduleKind};

    #[tokio::test]
    async fn test_set_replaces_exclusions() {
        let ctx = setup_context().await;
        let schedule = Schedule::new(
            "CT chase".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CorporationTaxPayment,
            },
            Vec::new(),
        );
        ctx.repos
            .schedules
            .insert(&schedule)
            .await
            .expect("To insert schedule");
        let first = Client::new("Foxglove Media Ltd".into());
        let second = Client::new("Granary Bakehouse Ltd".into());
        for client in [&first, &second] {
            ctx.repos
                .clients
                .insert(client)
                .await
                .expect("To insert client");
        }

        ctx.repos
            .schedule_exclusions
            .set_for_schedule(&schedule.id, &[first.id.clone(), second.id.clone()])
            .await
            .expect("To set exclusions");
        let excluded = ctx
            .repos
            .schedule_exclusions
            .find_by_schedule(&schedule.id)
            .await;
        assert_eq!(excluded.len(), 2);

        ctx.repos
            .schedule_exclusions
            .set_for_schedule(&schedule.id, &[second.id.clone()])
            .await
            .expect("To set exclusions");
        let excluded = ctx
            .repos
            .schedule_exclusions
            .find_by_schedule(&schedule.id)
            .await;
        assert_eq!(excluded, vec![second.id.clone()]);
    }
}
