mod inmemory;
mod postgres;

pub use inmemory::InMemoryDeadlineOverrideRepo;
pub use postgres::PostgresDeadlineOverrideRepo;
use practice_scheduler_domain::{ClientDeadlineOverride, FilingType, ID};

#[async_trait::async_trait]
pub trait IDeadlineOverrideRepo: Send + Sync {
    /// Inserts the override, replacing any previous override for the
    /// same client and filing type
    async fn upsert(&self, deadline_override: &ClientDeadlineOverride) -> anyhow::Result<()>;
    async fn find(&self, client_id: &ID, filing_type: FilingType)
        -> Option<ClientDeadlineOverride>;
    async fn find_by_client(&self, client_id: &ID) -> Vec<ClientDeadlineOverride>;
    async fn delete(
        &self,
        client_id: &ID,
        filing_type: FilingType,
    ) -> Option<ClientDeadlineOverride>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use chrono::NaiveDate;
    use practice_scheduler_domain::{Client, ClientDeadlineOverride, FilingType};

    #[tokio::test]
    async fn test_deadline_override_upsert_and_delete() {
        let ctx = setup_context().await;
        let client = Client::new("Fenwick Optics Ltd".into());
        ctx.repos
            .clients
            .insert(&client)
            .await
            .expect("To insert client");

        let first = ClientDeadlineOverride::new(
            client.id.clone(),
            FilingType::Ct600Filing,
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            Some("Agreed extension".into()),
        );
        ctx.repos
            .deadline_overrides
            .upsert(&first)
            .await
            .expect("To upsert override");

        // Upserting again for the same filing type replaces the date
        let second = ClientDeadlineOverride::new(
            client.id.clone(),
            FilingType::Ct600Filing,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            None,
        );
        ctx.repos
            .deadline_overrides
            .upsert(&second)
            .await
            .expect("To upsert override");

        let found = ctx
            .repos
            .deadline_overrides
            .find(&client.id, FilingType::Ct600Filing)
            .await
            .expect("To find override");
        assert_eq!(found.override_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(
            ctx.repos
                .deadline_overrides
                .find_by_client(&client.id)
                .await
                .len(),
            1
        );

        let removed = ctx
            .repos
            .deadline_overrides
            .delete(&client.id, FilingType::Ct600Filing)
            .await;
        assert!(removed.is_some());
        assert!(ctx
            .repos
            .deadline_overrides
            .find(&client.id, FilingType::Ct600Filing)
            .await
            .is_none());
    }
}
