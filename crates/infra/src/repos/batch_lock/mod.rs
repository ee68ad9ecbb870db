mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryBatchLockRepo;
pub use postgres::PostgresBatchLockRepo;

/// Single-row lock guarding the batch run. The expiry exists so that a
/// crashed run cannot wedge the batch forever, it is not a heartbeat.
#[async_trait::async_trait]
pub trait IBatchLockRepo: Send + Sync {
    /// Returns true when the lock was acquired. A held lock whose
    /// expiry has passed can be taken over.
    async fn acquire(
        &self,
        lock_name: &str,
        now: DateTime<Utc>,
        ttl_secs: i64,
    ) -> anyhow::Result<bool>;
    async fn release(&self, lock_name: &str) -> anyhow::Result<()>;
}
