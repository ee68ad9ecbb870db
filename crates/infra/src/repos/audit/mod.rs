mod inmemory;
mod postgres;

pub use inmemory::InMemoryAuditRepo;
pub use postgres::PostgresAuditRepo;
use practice_scheduler_domain::AuditEntry;

#[async_trait::async_trait]
pub trait IAuditRepo: Send + Sync {
    async fn insert(&self, entry: &AuditEntry) -> anyhow::Result<()>;
    async fn find_recent(&self, limit: usize) -> Vec<AuditEntry>;
}
