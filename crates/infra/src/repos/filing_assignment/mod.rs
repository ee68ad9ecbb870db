mod inmemory;
mod postgres;

pub use inmemory::InMemoryFilingAssignmentRepo;
pub use postgres::PostgresFilingAssignmentRepo;
use practice_scheduler_domain::{ClientFilingAssignment, ID};

#[async_trait::async_trait]
pub trait IFilingAssignmentRepo: Send + Sync {
    /// Replaces the full assignment list for a client
    async fn save_for_client(
        &self,
        client_id: &ID,
        assignments: &[ClientFilingAssignment],
    ) -> anyhow::Result<()>;
    async fn find_by_client(&self, client_id: &ID) -> Vec<ClientFilingAssignment>;
    async fn find_active_by_client(&self, client_id: &ID) -> Vec<ClientFilingAssignment>;
}
