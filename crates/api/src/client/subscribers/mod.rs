use super::{
    create_client::{CreateClientUseCase, UseCaseRes as CreateClientRes},
    remove_deadline_override::{RemoveDeadlineOverrideUseCase, UseCaseRes as RemoveOverrideRes},
    set_client_pause::{SetClientPauseUseCase, UseCaseRes as SetClientPauseRes},
    set_deadline_override::{SetDeadlineOverrideUseCase, UseCaseRes as SetOverrideRes},
    set_filing_assignments::{SetFilingAssignmentsUseCase, UseCaseRes as SetAssignmentsRes},
    set_records_received::{SetRecordsReceivedUseCase, UseCaseRes as SetRecordsRes},
    update_client::{UpdateClientUseCase, UseCaseRes as UpdateClientRes},
};
use crate::queue::build_queue::BuildQueueUseCase;
use crate::shared::usecase::{execute, Subscriber};

pub struct RebuildQueueOnClientCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateClientUseCase> for RebuildQueueOnClientCreated {
    async fn notify(&self, e: &CreateClientRes, ctx: &practice_scheduler_infra::PracticeContext) {
        let build_queue = BuildQueueUseCase {
            client_id: Some(e.client.id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(build_queue, ctx).await;
    }
}

pub struct RebuildQueueOnClientUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateClientUseCase> for RebuildQueueOnClientUpdated {
    async fn notify(&self, e: &UpdateClientRes, ctx: &practice_scheduler_infra::PracticeContext) {
        // Renaming a client does not move any deadline
        if !e.metadata_changed {
            return;
        }
        let build_queue = BuildQueueUseCase {
            client_id: Some(e.client.id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(build_queue, ctx).await;
    }
}

pub struct RebuildQueueOnClientResumed;

#[async_trait::async_trait(?Send)]
impl Subscriber<SetClientPauseUseCase> for RebuildQueueOnClientResumed {
    async fn notify(&self, e: &SetClientPauseRes, ctx: &practice_scheduler_infra::PracticeContext) {
        if !e.resumed {
            return;
        }
        let build_queue = BuildQueueUseCase {
            client_id: Some(e.client.id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(build_queue, ctx).await;
    }
}

pub struct RebuildQueueOnAssignmentsChanged;

#[async_trait::async_trait(?Send)]
impl Subscriber<SetFilingAssignmentsUseCase> for RebuildQueueOnAssignmentsChanged {
    async fn notify(&self, e: &SetAssignmentsRes, ctx: &practice_scheduler_infra::PracticeContext) {
        let build_queue = BuildQueueUseCase {
            client_id: Some(e.client_id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(build_queue, ctx).await;
    }
}

pub struct RebuildQueueOnOverrideChanged;

#[async_trait::async_trait(?Send)]
impl Subscriber<SetDeadlineOverrideUseCase> for RebuildQueueOnOverrideChanged {
    async fn notify(&self, e: &SetOverrideRes, ctx: &practice_scheduler_infra::PracticeContext) {
        let build_queue = BuildQueueUseCase {
            client_id: Some(e.deadline_override.client_id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(build_queue, ctx).await;
    }
}

pub struct RebuildQueueOnOverrideRemoved;

#[async_trait::async_trait(?Send)]
impl Subscriber<RemoveDeadlineOverrideUseCase> for RebuildQueueOnOverrideRemoved {
    async fn notify(&self, e: &RemoveOverrideRes, ctx: &practice_scheduler_infra::PracticeContext) {
        let build_queue = BuildQueueUseCase {
            client_id: Some(e.deadline_override.client_id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(build_queue, ctx).await;
    }
}

pub struct RebuildQueueOnRecordsCleared;

#[async_trait::async_trait(?Send)]
impl Subscriber<SetRecordsReceivedUseCase> for RebuildQueueOnRecordsCleared {
    async fn notify(&self, e: &SetRecordsRes, ctx: &practice_scheduler_infra::PracticeContext) {
        // Marking records as received cancels entries inside the use case
        // itself. Only the reverse needs the queue regenerated.
        if e.received {
            return;
        }
        let build_queue = BuildQueueUseCase {
            client_id: Some(e.client.id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(build_queue, ctx).await;
    }
}
