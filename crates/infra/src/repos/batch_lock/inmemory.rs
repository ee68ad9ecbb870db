use super::IBatchLockRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Duration, Utc};

pub struct InMemoryBatchLockRepo {
    locks: std::sync::Mutex<Vec<(String, DateTime<Utc>)>>,
}

impl InMemoryBatchLockRepo {
    pub fn new() -> Self {
        Self {
            locks: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IBatchLockRepo for InMemoryBatchLockRepo {
    async fn acquire(
        &self,
        lock_name: &str,
        now: DateTime<Utc>,
        ttl_secs: i64,
    ) -> anyhow::Result<bool> {
        let held = find_by(&self.locks, |(name, expires_at)| {
            name == lock_name && *expires_at > now
        });
        if !held.is_empty() {
            return Ok(false);
        }
        delete_by(&self.locks, |(name, _)| name == lock_name);
        insert(
            &(lock_name.to_string(), now + Duration::seconds(ttl_secs)),
            &self.locks,
        );
        Ok(true)
    }

    async fn release(&self, lock_name: &str) -> anyhow::Result<()> {
        delete_by(&self.locks, |(name, _)| name == lock_name);
        Ok(())
    }
}
