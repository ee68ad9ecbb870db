use super::IFilingAssignmentRepo;
use crate::repos::shared::inmemory_repo::*;
use practice_scheduler_domain::{ClientFilingAssignment, ID};

pub struct InMemoryFilingAssignmentRepo {
    assignments: std::sync::Mutex<Vec<ClientFilingAssignment>>,
}

impl InMemoryFilingAssignmentRepo {
    pub fn new() -> Self {
        Self {
            assignments: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IFilingAssignmentRepo for InMemoryFilingAssignmentRepo {
    async fn save_for_client(
        &self,
        client_id: &ID,
        assignments: &[ClientFilingAssignment],
    ) -> anyhow::Result<()> {
        delete_by(&self.assignments, |assignment| {
            assignment.client_id == *client_id
        });
        for assignment in assignments {
            insert(assignment, &self.assignments);
        }
        Ok(())
    }

    async fn find_by_client(&self, client_id: &ID) -> Vec<ClientFilingAssignment> {
        find_by(&self.assignments, |assignment| {
            assignment.client_id == *client_id
        })
    }

    async fn find_active_by_client(&self, client_id: &ID) -> Vec<ClientFilingAssignment> {
        find_by(&self.assignments, |assignment| {
            assignment.client_id == *client_id && assignment.is_active
        })
    }
}
