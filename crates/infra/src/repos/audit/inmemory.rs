use super::IAuditRepo;
use crate::repos::shared::inmemory_repo::*;
use practice_scheduler_domain::AuditEntry;

pub struct InMemoryAuditRepo {
    entries: std::sync::Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAuditRepo for InMemoryAuditRepo {
    async fn insert(&self, entry: &AuditEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> Vec<AuditEntry> {
        let mut entries = find_by(&self.entries, |_| true);
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);
        entries
    }
}
