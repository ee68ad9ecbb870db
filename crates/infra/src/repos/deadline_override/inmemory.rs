use super::IDeadlineOverrideRepo;
use crate::repos::shared::inmemory_repo::*;
use practice_scheduler_domain::{ClientDeadlineOverride, FilingType, ID};

pub struct InMemoryDeadlineOverrideRepo {
    overrides: std::sync::Mutex<Vec<ClientDeadlineOverride>>,
}

impl InMemoryDeadlineOverrideRepo {
    pub fn new() -> Self {
        Self {
            overrides: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDeadlineOverrideRepo for InMemoryDeadlineOverrideRepo {
    async fn upsert(&self, deadline_override: &ClientDeadlineOverride) -> anyhow::Result<()> {
        delete_by(&self.overrides, |existing| {
            existing.client_id == deadline_override.client_id
                && existing.filing_type == deadline_override.filing_type
        });
        insert(deadline_override, &self.overrides);
        Ok(())
    }

    async fn find(
        &self,
        client_id: &ID,
        filing_type: FilingType,
    ) -> Option<ClientDeadlineOverride> {
        let mut overrides = find_by(&self.overrides, |deadline_override| {
            deadline_override.client_id == *client_id
                && deadline_override.filing_type == filing_type
        });
        if overrides.is_empty() {
            return None;
        }
        Some(overrides.remove(0))
    }

    async fn find_by_client(&self, client_id: &ID) -> Vec<ClientDeadlineOverride> {
        find_by(&self.overrides, |deadline_override| {
            deadline_override.client_id == *client_id
        })
    }

    async fn delete(
        &self,
        client_id: &ID,
        filing_type: FilingType,
    ) -> Option<ClientDeadlineOverride> {
        let mut deleted = find_and_delete_by(&self.overrides, |deadline_override| {
            deadline_override.client_id == *client_id
                && deadline_override.filing_type == filing_type
        });
        if deleted.is_empty() {
            return None;
        }
        Some(deleted.remove(0))
    }
}
