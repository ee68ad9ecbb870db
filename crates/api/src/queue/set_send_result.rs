use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::dtos::ReminderQueueEntryDTO;
use practice_scheduler_api_structs::set_send_result::*;
use practice_scheduler_domain::{AuditEntry, ReminderQueueEntry, ReminderStatus, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn set_send_result_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = SetSendResultUseCase {
        entry_id: path_params.into_inner().entry_id,
        outcome: body_params.0.outcome,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                entry: ReminderQueueEntryDTO::new(res.entry),
            })
        })
        .map_err(PracticeError::from)
}

/// Records what the email sender did with a pending entry.
#[derive(Debug)]
pub struct SetSendResultUseCase {
    pub entry_id: ID,
    pub outcome: SendOutcome,
}

#[derive(Debug)]
pub enum UseCaseError {
    EntryNotFound(ID),
    NotPending(ID, ReminderStatus),
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EntryNotFound(entry_id) => Self::NotFound(format!(
                "The queue entry with id: {}, was not found.",
                entry_id
            )),
            UseCaseError::NotPending(entry_id, status) => Self::Conflict(format!(
                "The queue entry with id: {} is {:?}, only pending entries take a send result.",
                entry_id, status
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub entry: ReminderQueueEntry,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetSendResultUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SetSendResult";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let mut entry = match ctx.repos.reminder_queue.find(&self.entry_id).await {
            Some(entry) => entry,
            None => return Err(UseCaseError::EntryNotFound(self.entry_id.clone())),
        };
        if entry.status != ReminderStatus::Pending {
            return Err(UseCaseError::NotPending(entry.id.clone(), entry.status));
        }

        entry.status = match self.outcome {
            SendOutcome::Sent => ReminderStatus::Sent,
            SendOutcome::Failed => ReminderStatus::Failed,
        };
        if ctx.repos.reminder_queue.save(&entry).await.is_err() {
            return Err(UseCaseError::Storage);
        }

        if entry.status == ReminderStatus::Failed {
            let audit = AuditEntry::new(
                Some(entry.client_id.clone()),
                entry.filing_type,
                format!("Send failed for queue entry {}", entry.id),
                ctx.sys.now(),
            );

            // Sideeffect, ignore result
            let _ = ctx.repos.audit.insert(&audit).await;
        }

        Ok(UseCaseRes { entry })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use practice_scheduler_domain::{Client, FilingType, Schedule, ScheduleKind, ScheduleStep};
    use practice_scheduler_infra::setup_context;

    async fn pending_entry(ctx: &PracticeContext) -> ReminderQueueEntry {
        let client = Client::new("Fenwick Plumbing Ltd".into());
        ctx.repos.clients.insert(&client).await.unwrap();
        let schedule = Schedule::new(
            "VAT chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            },
            vec![ScheduleStep {
                step_number: 1,
                email_template_id: Default::default(),
                delay_days: 7,
            }],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let entry = ReminderQueueEntry::new(
            client.id.clone(),
            Some(FilingType::VatReturn),
            schedule.id.clone(),
            1,
            NaiveDate::from_ymd_opt(2026, 2, 7).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        ctx.repos.reminder_queue.insert_if_absent(&entry).await.unwrap();
        ctx.repos
            .reminder_queue
            .mark_pending(&[entry.id.clone()], Utc::now())
            .await
            .unwrap();
        ctx.repos.reminder_queue.find(&entry.id).await.unwrap()
    }

    #[actix_web::test]
    async fn records_a_delivery() {
        let ctx = setup_context().await;
        let entry = pending_entry(&ctx).await;

        let mut usecase = SetSendResultUseCase {
            entry_id: entry.id.clone(),
            outcome: SendOutcome::Sent,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.entry.status, ReminderStatus::Sent);
    }

    #[actix_web::test]
    async fn a_failure_is_recorded_and_audited() {
        let ctx = setup_context().await;
        let entry = pending_entry(&ctx).await;

        let mut usecase = SetSendResultUseCase {
            entry_id: entry.id.clone(),
            outcome: SendOutcome::Failed,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.entry.status, ReminderStatus::Failed);

        let audit_log = ctx.repos.audit.find_recent(5).await;
        assert!(audit_log
            .iter()
            .any(|e| e.message.contains("Send failed")));
    }

    #[actix_web::test]
    async fn only_pending_entries_take_a_result() {
        let ctx = setup_context().await;
        let entry = pending_entry(&ctx).await;

        let mut usecase = SetSendResultUseCase {
            entry_id: entry.id.clone(),
            outcome: SendOutcome::Sent,
        };
        usecase.execute(&ctx).await.unwrap();

        // The sender reporting twice must not flip a sent entry again
        let mut repeat = SetSendResultUseCase {
            entry_id: entry.id.clone(),
            outcome: SendOutcome::Failed,
        };
        assert!(repeat.execute(&ctx).await.is_err());
    }
}
