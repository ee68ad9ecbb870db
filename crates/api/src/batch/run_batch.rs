use crate::error::PracticeError;
use crate::queue::build_queue::BuildQueueUseCase;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use practice_scheduler_api_structs::run_batch::*;
use practice_scheduler_domain::{
    date::{uk_hour, uk_today},
    render, resolve_deadline, roll_forward, AuditEntry, BatchOutcome, BatchRunReport,
    EmailTemplate, FilingType, ReminderQueueEntry, RenderContext, RenderedEmail, Schedule, ID,
};
use practice_scheduler_infra::PracticeContext;
use std::collections::{HashMap, HashSet};
use tracing::error;

const BATCH_LOCK_NAME: &str = "reminder_batch";

pub async fn run_batch_controller(
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = RunBatchUseCase {
        config: BatchConfig::from_context(&ctx),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse { report: res.report }))
        .map_err(PracticeError::from)
}

/// The knobs a batch run depends on, passed in explicitly so a triggered run
/// and the hourly job cannot diverge silently.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// UK local hour at which filing reminders go out.
    pub send_hour: u32,
    pub sender_name: String,
    pub lock_ttl_secs: i64,
}

impl BatchConfig {
    pub fn from_context(ctx: &PracticeContext) -> Self {
        Self {
            send_hour: ctx.config.send_hour,
            sender_name: ctx.config.sender_name.clone(),
            lock_ttl_secs: ctx.config.batch_lock_ttl_secs,
        }
    }
}

/// One pass of the reminder pipeline: refresh the queue, hand today's due
/// entries to the sender with rendered content, and roll lapsed filing
/// deadlines into their next cycle.
///
/// The pass runs under a storage lock, so overlapping invocations (two
/// replicas, or a manual trigger racing the hourly job) cannot double-send.
#[derive(Debug)]
pub struct RunBatchUseCase {
    pub config: BatchConfig,
}

#[derive(Debug)]
pub enum UseCaseError {
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub report: BatchRunReport,
}

async fn audit(
    ctx: &PracticeContext,
    client_id: Option<ID>,
    filing_type: Option<FilingType>,
    message: String,
) {
    let entry = AuditEntry::new(client_id, filing_type, message, ctx.sys.now());

    // Sideeffect, ignore result
    let _ = ctx.repos.audit.insert(&entry).await;
}

fn resolve_content(
    entry: &ReminderQueueEntry,
    company_name: &str,
    sender_name: &str,
    schedules_by_id: &HashMap<ID, Schedule>,
    templates_by_id: &HashMap<ID, EmailTemplate>,
) -> Result<RenderedEmail, String> {
    let schedule = schedules_by_id
        .get(&entry.schedule_id)
        .ok_or_else(|| format!("schedule {} no longer exists", entry.schedule_id))?;
    let step = schedule
        .steps
        .iter()
        .find(|step| step.step_number == entry.step_index)
        .ok_or_else(|| {
            format!(
                "schedule '{}' no longer has a step {}",
                schedule.name, entry.step_index
            )
        })?;
    let template = templates_by_id
        .get(&step.email_template_id)
        .ok_or_else(|| format!("template {} no longer exists", step.email_template_id))?;

    let context = RenderContext {
        company_name: company_name.into(),
        deadline: entry.deadline_date,
        filing_type: entry
            .filing_type
            .map(|ft| ft.display_name().to_string())
            .unwrap_or_else(|| schedule.name.clone()),
        accountant_name: sender_name.into(),
    };
    render(template, &context).map_err(|e| e.to_string())
}

async fn run_guarded(
    config: &BatchConfig,
    now: DateTime<Utc>,
    today: NaiveDate,
    hour: u32,
    ctx: &PracticeContext,
) -> Result<BatchRunReport, UseCaseError> {
    let custom_schedules = ctx.repos.schedules.find_active_custom().await;
    let global_hour_matches = hour == config.send_hour;
    let custom_hour_matches = custom_schedules
        .iter()
        .any(|s| s.custom_send_hour() == Some(hour));
    if !global_hour_matches && !custom_hour_matches {
        return Ok(BatchRunReport::skipped_wrong_hour());
    }

    let mut report = BatchRunReport::new(BatchOutcome::Completed);

    // Refresh the queue first so entries falling due today exist before
    // they are selected.
    match execute(BuildQueueUseCase { client_id: None }, ctx).await {
        Ok(res) => report.queue.absorb(res.report),
        Err(e) => report
            .errors
            .push(format!("The queue refresh failed: {:?}", e)),
    }

    let due = match ctx.repos.reminder_queue.find_scheduled_on(today).await {
        Ok(due) => due,
        Err(_) => return Err(UseCaseError::Storage),
    };

    let schedule_ids = due.iter().map(|e| e.schedule_id.clone()).collect::<Vec<_>>();
    let schedules_by_id = ctx
        .repos
        .schedules
        .find_many(&schedule_ids)
        .await
        .into_iter()
        .map(|s| (s.id.clone(), s))
        .collect::<HashMap<_, _>>();

    // Filing reminders go out at the practice wide hour. Custom schedules
    // may carry their own hour and fire in that slot instead.
    let due = due
        .into_iter()
        .filter(|entry| {
            let custom_hour = schedules_by_id
                .get(&entry.schedule_id)
                .and_then(|s| s.custom_send_hour());
            match custom_hour {
                Some(custom_hour) => custom_hour == hour,
                None => global_hour_matches,
            }
        })
        .collect::<Vec<_>>();

    let client_ids = due.iter().map(|e| e.client_id.clone()).collect::<Vec<_>>();
    let clients_by_id = ctx
        .repos
        .clients
        .find_many(&client_ids)
        .await
        .into_iter()
        .map(|c| (c.id.clone(), c))
        .collect::<HashMap<_, _>>();
    let due = due
        .into_iter()
        .filter(|entry| {
            clients_by_id
                .get(&entry.client_id)
                .map(|c| !c.reminders_paused)
                .unwrap_or(false)
        })
        .collect::<Vec<_>>();
    report.due = due.len();

    if !due.is_empty() {
        let ids = due.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        match ctx.repos.reminder_queue.mark_pending(&ids, now).await {
            Ok(_) => report.marked_pending = ids.len(),
            Err(e) => report
                .errors
                .push(format!("Could not mark the due entries pending: {}", e)),
        }

        if report.marked_pending > 0 {
            let template_ids = schedules_by_id
                .values()
                .flat_map(|s| s.steps.iter().map(|step| step.email_template_id.clone()))
                .collect::<Vec<_>>();
            let templates_by_id = ctx
                .repos
                .templates
                .find_many(&template_ids)
                .await
                .into_iter()
                .map(|t| (t.id.clone(), t))
                .collect::<HashMap<_, _>>();

            for entry in due {
                let mut entry = match ctx.repos.reminder_queue.find(&entry.id).await {
                    Some(entry) => entry,
                    None => continue,
                };
                let company_name = clients_by_id
                    .get(&entry.client_id)
                    .map(|c| c.company_name.as_str())
                    .unwrap_or_default();
                match resolve_content(
                    &entry,
                    company_name,
                    &config.sender_name,
                    &schedules_by_id,
                    &templates_by_id,
                ) {
                    Ok(rendered) => {
                        entry.resolved_subject = Some(rendered.subject);
                        entry.resolved_text = Some(rendered.text);
                        entry.resolved_html = Some(rendered.html);
                        match ctx.repos.reminder_queue.save(&entry).await {
                            Ok(_) => report.rendered += 1,
                            Err(e) => report.errors.push(format!(
                                "Could not store rendered content for entry {}: {}",
                                entry.id, e
                            )),
                        }
                    }
                    Err(reason) => {
                        // The entry stays pending with no content, visible to
                        // staff instead of silently dropped.
                        report.render_failures += 1;
                        audit(
                            ctx,
                            Some(entry.client_id.clone()),
                            entry.filing_type,
                            format!("Queue entry {} could not be rendered: {}", entry.id, reason),
                        )
                        .await;
                    }
                }
            }
        }
    }

    sweep_rollovers(today, ctx, &mut report).await;

    Ok(report)
}

/// Rolls every lapsed, chased filing deadline into its next cycle. A roll
/// happens at most once per cycle: it only fires while the stored metadata
/// still resolves to the lapsed deadline.
async fn sweep_rollovers(today: NaiveDate, ctx: &PracticeContext, report: &mut BatchRunReport) {
    let lapsed = ctx
        .repos
        .reminder_queue
        .find_sent_filing_due_before(today)
        .await;

    let mut groups: HashMap<(ID, FilingType), HashSet<NaiveDate>> = HashMap::new();
    for entry in lapsed {
        if let Some(filing_type) = entry.filing_type {
            groups
                .entry((entry.client_id.clone(), filing_type))
                .or_default()
                .insert(entry.deadline_date);
        }
    }

    for ((client_id, filing_type), deadlines) in groups {
        let lapsed_deadline = match deadlines.iter().max() {
            Some(deadline) => *deadline,
            None => continue,
        };
        if deadlines.len() > 1 {
            audit(
                ctx,
                Some(client_id.clone()),
                Some(filing_type),
                format!(
                    "Reminders were sent for {} distinct lapsed {} deadlines, rolling from the most recent",
                    deadlines.len(),
                    filing_type
                ),
            )
            .await;
        }

        let mut client = match ctx.repos.clients.find(&client_id).await {
            Some(client) => client,
            None => continue,
        };

        let deadline_override = ctx
            .repos
            .deadline_overrides
            .find(&client_id, filing_type)
            .await;
        let current_resolution = deadline_override
            .as_ref()
            .map(|o| o.override_date)
            .or_else(|| {
                resolve_deadline(
                    filing_type,
                    client.year_end_date,
                    client.vat_stagger_group,
                    today,
                )
            });
        if current_resolution != Some(lapsed_deadline) {
            // Already rolled, or the resolver moved past the lapsed cycle on
            // its own. Nothing to advance.
            continue;
        }

        let outcome = match roll_forward(
            filing_type,
            client.year_end_date,
            client.vat_stagger_group,
            lapsed_deadline,
        ) {
            Some(outcome) => outcome,
            None => {
                audit(
                    ctx,
                    Some(client_id.clone()),
                    Some(filing_type),
                    format!(
                        "Cannot roll {} forward, the client is missing filing metadata",
                        filing_type
                    ),
                )
                .await;
                // A spent override would otherwise match this lapsed
                // deadline again every night.
                if deadline_override.is_some() {
                    let _ = ctx
                        .repos
                        .deadline_overrides
                        .delete(&client_id, filing_type)
                        .await;
                }
                continue;
            }
        };

        if let Some(next_year_end) = outcome.next_year_end {
            client.year_end_date = Some(next_year_end);
            if ctx.repos.clients.save(&client).await.is_err() {
                report.errors.push(format!(
                    "Could not advance the year end for client {}",
                    client_id
                ));
                continue;
            }
        }
        if deadline_override.is_some() {
            // A one-off agreed date does not carry into the next cycle.
            let _ = ctx
                .repos
                .deadline_overrides
                .delete(&client_id, filing_type)
                .await;
        }

        audit(
            ctx,
            Some(client_id.clone()),
            Some(filing_type),
            format!("Rolled {} forward to {}", filing_type, outcome.next_deadline),
        )
        .await;
        report.rollovers += 1;
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunBatchUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "RunBatch";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let today = uk_today(now);
        let hour = uk_hour(now);

        let acquired = match ctx
            .repos
            .batch_locks
            .acquire(BATCH_LOCK_NAME, now, self.config.lock_ttl_secs)
            .await
        {
            Ok(acquired) => acquired,
            Err(_) => return Err(UseCaseError::Storage),
        };
        if !acquired {
            audit(ctx, None, None, "Batch lock held, skipping run".into()).await;
            return Ok(UseCaseRes {
                report: BatchRunReport::lock_held(),
            });
        }

        let result = run_guarded(&self.config, now, today, hour, ctx).await;

        // The lock comes off even when the run failed halfway.
        if let Err(e) = ctx.repos.batch_locks.release(BATCH_LOCK_NAME).await {
            error!("Could not release the batch lock: {:?}", e);
        }

        result.map(|report| UseCaseRes { report })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use practice_scheduler_domain::{
        Client, ClientDeadlineOverride, ClientFilingAssignment, CustomTarget, EmailTemplate,
        ReminderStatus, Schedule, ScheduleKind, ScheduleStep,
    };
    use practice_scheduler_infra::{setup_context, ISys};
    use std::sync::Arc;

    struct DummySys(DateTime<Utc>);

    impl ISys for DummySys {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn config() -> BatchConfig {
        BatchConfig {
            send_hour: 9,
            sender_name: "Harris & Co".into(),
            lock_ttl_secs: 300,
        }
    }

    /// Thursday 2025-11-20 at the given UK hour. November is GMT, so the
    /// UTC hour is the UK hour.
    async fn setup_at_hour(hour: u32) -> PracticeContext {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(DummySys(
            Utc.with_ymd_and_hms(2025, 11, 20, hour, 0, 0).unwrap(),
        ));
        ctx
    }

    async fn insert_template(ctx: &PracticeContext) -> EmailTemplate {
        let template = EmailTemplate::new(
            "First chase".into(),
            "{{filing_type}} due {{deadline}}".into(),
            "Dear {{company_name}}, regards {{accountant_name}}".into(),
            "<p>Dear {{company_name}}</p>".into(),
        );
        ctx.repos.templates.insert(&template).await.unwrap();
        template
    }

    fn step(step_number: i32, delay_days: i64, template: &EmailTemplate) -> ScheduleStep {
        ScheduleStep {
            step_number,
            email_template_id: template.id.clone(),
            delay_days,
        }
    }

    #[actix_web::test]
    async fn a_held_lock_short_circuits_the_run() {
        let ctx = setup_at_hour(9).await;
        assert!(ctx
            .repos
            .batch_locks
            .acquire(BATCH_LOCK_NAME, ctx.sys.now(), 300)
            .await
            .unwrap());

        let mut usecase = RunBatchUseCase { config: config() };
        let report = usecase.execute(&ctx).await.unwrap().report;
        assert_eq!(report.outcome, BatchOutcome::LockHeld);
    }

    #[actix_web::test]
    async fn the_wrong_hour_skips_and_releases_the_lock() {
        let ctx = setup_at_hour(13).await;

        let mut usecase = RunBatchUseCase { config: config() };
        let report = usecase.execute(&ctx).await.unwrap().report;
        assert_eq!(report.outcome, BatchOutcome::SkippedWrongHour);

        // The lock must not stay behind after the skip
        assert!(ctx
            .repos
            .batch_locks
            .acquire(BATCH_LOCK_NAME, ctx.sys.now(), 300)
            .await
            .unwrap());
    }

    #[actix_web::test]
    async fn due_entries_are_marked_pending_with_rendered_content() {
        let ctx = setup_at_hour(9).await;
        let template = insert_template(&ctx).await;
        let client = Client::new("Oakfield Joinery Ltd".into());
        ctx.repos.clients.insert(&client).await.unwrap();

        // Seven days before the target lands exactly on the run day
        let schedule = Schedule::new(
            "Planning day".into(),
            ScheduleKind::Custom {
                target: CustomTarget::Fixed {
                    date: date(2025, 11, 27),
                },
                send_hour: None,
            },
            vec![step(1, 7, &template)],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let mut usecase = RunBatchUseCase { config: config() };
        let report = usecase.execute(&ctx).await.unwrap().report;

        assert_eq!(report.outcome, BatchOutcome::Completed);
        assert_eq!(report.queue.created, 1);
        assert_eq!(report.due, 1);
        assert_eq!(report.marked_pending, 1);
        assert_eq!(report.rendered, 1);
        assert_eq!(report.render_failures, 0);

        let entries = ctx.repos.reminder_queue.find_by_client(&client.id).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, ReminderStatus::Pending);
        assert_eq!(
            entries[0].resolved_subject.as_deref(),
            Some("Planning day due 27 November 2025")
        );
        assert!(entries[0].queued_at.is_some());
    }

    #[actix_web::test]
    async fn a_custom_send_hour_partitions_the_due_entries() {
        let ctx = setup_at_hour(14).await;
        let template = insert_template(&ctx).await;
        let client = Client::new("Oakfield Joinery Ltd".into());
        let mut filing_client = Client::new("Fenwick Plumbing Ltd".into());
        filing_client.year_end_date = Some(date(2025, 3, 31));
        ctx.repos.clients.insert(&client).await.unwrap();
        ctx.repos.clients.insert(&filing_client).await.unwrap();

        let afternoon = Schedule::new(
            "Afternoon campaign".into(),
            ScheduleKind::Custom {
                target: CustomTarget::Fixed {
                    date: date(2025, 11, 27),
                },
                send_hour: Some(14),
            },
            vec![step(1, 7, &template)],
        );
        ctx.repos.schedules.insert(&afternoon).await.unwrap();
        ctx.repos
            .schedule_exclusions
            .set_for_schedule(&afternoon.id, &[filing_client.id.clone()])
            .await
            .unwrap();

        // A filing entry also due today, kept for the global nine o'clock
        ctx.repos
            .filing_assignments
            .save_for_client(
                &filing_client.id,
                &[ClientFilingAssignment::new(
                    filing_client.id.clone(),
                    FilingType::CorporationTaxPayment,
                )],
            )
            .await
            .unwrap();
        ctx.repos
            .deadline_overrides
            .upsert(&ClientDeadlineOverride::new(
                filing_client.id.clone(),
                FilingType::CorporationTaxPayment,
                date(2025, 11, 27),
                None,
            ))
            .await
            .unwrap();
        let chasing = Schedule::new(
            "CT chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CorporationTaxPayment,
            },
            vec![step(1, 7, &template)],
        );
        ctx.repos.schedules.insert(&chasing).await.unwrap();

        let mut usecase = RunBatchUseCase { config: config() };
        let report = usecase.execute(&ctx).await.unwrap().report;

        assert_eq!(report.outcome, BatchOutcome::Completed);
        assert_eq!(report.due, 1);

        let custom_entries = ctx.repos.reminder_queue.find_by_client(&client.id).await;
        assert_eq!(custom_entries[0].status, ReminderStatus::Pending);
        let filing_entries = ctx
            .repos
            .reminder_queue
            .find_by_client(&filing_client.id)
            .await;
        assert_eq!(filing_entries[0].status, ReminderStatus::Scheduled);
    }

    #[actix_web::test]
    async fn a_lapsed_chased_deadline_rolls_forward_once() {
        let ctx = setup_at_hour(9).await;
        let template = insert_template(&ctx).await;
        let mut client = Client::new("Oakfield Joinery Ltd".into());
        client.year_end_date = Some(date(2025, 1, 31));
        ctx.repos.clients.insert(&client).await.unwrap();
        ctx.repos
            .filing_assignments
            .save_for_client(
                &client.id,
                &[ClientFilingAssignment::new(
                    client.id.clone(),
                    FilingType::CorporationTaxPayment,
                )],
            )
            .await
            .unwrap();

        let schedule = Schedule::new(
            "CT chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CorporationTaxPayment,
            },
            vec![step(1, 7, &template)],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        // The chase for the 2025-11-01 deadline went out and the deadline
        // has now passed.
        let mut sent = ReminderQueueEntry::new(
            client.id.clone(),
            Some(FilingType::CorporationTaxPayment),
            schedule.id.clone(),
            1,
            date(2025, 11, 1),
            date(2025, 10, 24),
        );
        sent.status = ReminderStatus::Sent;
        ctx.repos.reminder_queue.insert_if_absent(&sent).await.unwrap();

        let report = RunBatchUseCase { config: config() }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(report.rollovers, 1);

        let client = ctx.repos.clients.find(&client.id).await.unwrap();
        assert_eq!(client.year_end_date, Some(date(2026, 1, 31)));

        // The next night must not advance the year end a second time
        let report = RunBatchUseCase { config: config() }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(report.rollovers, 0);
        let client = ctx.repos.clients.find(&client.id).await.unwrap();
        assert_eq!(client.year_end_date, Some(date(2026, 1, 31)));
    }

    #[actix_web::test]
    async fn rolling_forward_consumes_the_deadline_override() {
        let ctx = setup_at_hour(9).await;
        let template = insert_template(&ctx).await;
        let mut client = Client::new("Oakfield Joinery Ltd".into());
        client.year_end_date = Some(date(2025, 1, 31));
        ctx.repos.clients.insert(&client).await.unwrap();
        ctx.repos
            .filing_assignments
            .save_for_client(
                &client.id,
                &[ClientFilingAssignment::new(
                    client.id.clone(),
                    FilingType::CorporationTaxPayment,
                )],
            )
            .await
            .unwrap();
        ctx.repos
            .deadline_overrides
            .upsert(&ClientDeadlineOverride::new(
                client.id.clone(),
                FilingType::CorporationTaxPayment,
                date(2025, 11, 10),
                Some("Agreed extension".into()),
            ))
            .await
            .unwrap();

        let schedule = Schedule::new(
            "CT chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CorporationTaxPayment,
            },
            vec![step(1, 7, &template)],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let mut sent = ReminderQueueEntry::new(
            client.id.clone(),
            Some(FilingType::CorporationTaxPayment),
            schedule.id.clone(),
            1,
            date(2025, 11, 10),
            date(2025, 11, 3),
        );
        sent.status = ReminderStatus::Sent;
        ctx.repos.reminder_queue.insert_if_absent(&sent).await.unwrap();

        let report = RunBatchUseCase { config: config() }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(report.rollovers, 1);

        assert!(ctx
            .repos
            .deadline_overrides
            .find(&client.id, FilingType::CorporationTaxPayment)
            .await
            .is_none());
        let client = ctx.repos.clients.find(&client.id).await.unwrap();
        assert_eq!(client.year_end_date, Some(date(2026, 1, 31)));
    }
}
