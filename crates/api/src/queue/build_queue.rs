use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDate};
use practice_scheduler_api_structs::build_queue::*;
use practice_scheduler_domain::{
    date::uk_today, next_working_day, resolve_deadline, AuditEntry, Client, FilingType,
    QueueBuildReport, ReminderQueueEntry, Schedule, ID,
};
use practice_scheduler_infra::PracticeContext;
use std::collections::{HashMap, HashSet};

pub async fn build_queue_controller(
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = BuildQueueUseCase { client_id: None };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse { report: res.report }))
        .map_err(PracticeError::from)
}

/// Materializes reminder queue entries for every active schedule. Inserts go
/// through the idempotency key, so running the pass twice never duplicates an
/// entry and never resurrects one that was cancelled or already sent.
///
/// With a `client_id` the pass is scoped to that client and their scheduled
/// entries are wiped first, so edited deadlines do not leave stale dates
/// behind.
#[derive(Debug)]
pub struct BuildQueueUseCase {
    pub client_id: Option<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {
    ClientNotFound(ID),
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ClientNotFound(client_id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", client_id))
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub report: QueueBuildReport,
}

struct CustomExpansion {
    schedule: Schedule,
    target_date: NaiveDate,
    excluded: HashSet<ID>,
}

/// Everything a pass resolves up front: the active schedules, the known
/// templates and the bank holiday table.
struct BuildPlan {
    today: NaiveDate,
    bank_holidays: HashSet<NaiveDate>,
    filing_schedules: HashMap<FilingType, Schedule>,
    custom_schedules: Vec<CustomExpansion>,
    known_templates: HashSet<ID>,
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

async fn prepare_pass(today: NaiveDate, ctx: &PracticeContext) -> BuildPlan {
    let bank_holidays = ctx.repos.bank_holidays.all_dates().await;

    let mut filing_schedules = HashMap::new();
    for filing_type in FilingType::all() {
        if let Some(schedule) = ctx
            .repos
            .schedules
            .find_active_by_filing_type(filing_type)
            .await
        {
            if schedule.steps.is_empty() {
                audit(
                    ctx,
                    None,
                    Some(filing_type),
                    format!("Schedule '{}' has no steps", schedule.name),
                )
                .await;
            }
            filing_schedules.insert(filing_type, schedule);
        }
    }

    let mut custom_schedules = Vec::new();
    for schedule in ctx.repos.schedules.find_active_custom().await {
        if schedule.steps.is_empty() {
            audit(
                ctx,
                None,
                None,
                format!("Schedule '{}' has no steps", schedule.name),
            )
            .await;
            continue;
        }
        // Fixed targets in the past have nothing left to count down to.
        let target_date = match schedule.next_target_date(today) {
            Some(target) if target > today => target,
            _ => {
                audit(
                    ctx,
                    None,
                    None,
                    format!("Schedule '{}' only targets past dates", schedule.name),
                )
                .await;
                continue;
            }
        };
        let excluded = ctx
            .repos
            .schedule_exclusions
            .find_by_schedule(&schedule.id)
            .await
            .into_iter()
            .collect::<HashSet<_>>();
        custom_schedules.push(CustomExpansion {
            schedule,
            target_date,
            excluded,
        });
    }

    let template_ids = filing_schedules
        .values()
        .chain(custom_schedules.iter().map(|c| &c.schedule))
        .flat_map(|s| s.steps.iter().map(|step| step.email_template_id.clone()))
        .collect::<Vec<_>>();
    let known_templates = ctx
        .repos
        .templates
        .find_many(&template_ids)
        .await
        .into_iter()
        .map(|t| t.id)
        .collect::<HashSet<_>>();
    for schedule in filing_schedules
        .values()
        .chain(custom_schedules.iter().map(|c| &c.schedule))
    {
        let mut audited = HashSet::new();
        for step in &schedule.steps {
            if !known_templates.contains(&step.email_template_id)
                && audited.insert(step.email_template_id.clone())
            {
                audit(
                    ctx,
                    None,
                    None,
                    format!(
                        "Template {} referenced by schedule '{}' does not exist",
                        step.email_template_id, schedule.name
                    ),
                )
                .await;
            }
        }
    }

    BuildPlan {
        today,
        bank_holidays,
        filing_schedules,
        custom_schedules,
        known_templates,
    }
}

async fn insert_step_entries(
    client: &Client,
    schedule: &Schedule,
    filing_type: Option<FilingType>,
    target: NaiveDate,
    plan: &BuildPlan,
    ctx: &PracticeContext,
    report: &mut QueueBuildReport,
) {
    for step in &schedule.steps {
        if !plan.known_templates.contains(&step.email_template_id) {
            report.skipped += 1;
            continue;
        }
        let send_date = next_working_day(
            target - Duration::days(step.delay_days),
            &plan.bank_holidays,
        );
        let entry = ReminderQueueEntry::new(
            client.id.clone(),
            filing_type,
            schedule.id.clone(),
            step.step_number,
            target,
            send_date,
        );
        match ctx.repos.reminder_queue.insert_if_absent(&entry).await {
            Ok(true) => report.created += 1,
            Ok(false) => report.skipped += 1,
            Err(e) => report.errors.push(format!(
                "Could not insert a queue entry for client {}: {}",
                client.id, e
            )),
        }
    }
}

async fn expand_client(
    client: &Client,
    plan: &BuildPlan,
    missing_schedule_audited: &mut HashSet<FilingType>,
    ctx: &PracticeContext,
    report: &mut QueueBuildReport,
) {
    if client.reminders_paused {
        return;
    }

    let assignments = ctx
        .repos
        .filing_assignments
        .find_active_by_client(&client.id)
        .await;
    let overrides = ctx
        .repos
        .deadline_overrides
        .find_by_client(&client.id)
        .await
        .into_iter()
        .map(|o| (o.filing_type, o.override_date))
        .collect::<HashMap<_, _>>();

    for assignment in assignments {
        let filing_type = assignment.filing_type;
        if client.records_received_for.contains(&filing_type) {
            continue;
        }

        let deadline = overrides.get(&filing_type).copied().or_else(|| {
            resolve_deadline(
                filing_type,
                client.year_end_date,
                client.vat_stagger_group,
                plan.today,
            )
        });
        let deadline = match deadline {
            Some(deadline) => deadline,
            None => {
                report.skipped += 1;
                audit(
                    ctx,
                    Some(client.id.clone()),
                    Some(filing_type),
                    format!(
                        "Cannot resolve the {} deadline, the client is missing filing metadata",
                        filing_type
                    ),
                )
                .await;
                continue;
            }
        };

        let schedule = match plan.filing_schedules.get(&filing_type) {
            Some(schedule) => schedule,
            None => {
                report.skipped += 1;
                if missing_schedule_audited.insert(filing_type) {
                    audit(
                        ctx,
                        None,
                        Some(filing_type),
                        format!("No active schedule for {}", filing_type),
                    )
                    .await;
                }
                continue;
            }
        };
        insert_step_entries(client, schedule, Some(filing_type), deadline, plan, ctx, report)
            .await;
    }

    for expansion in &plan.custom_schedules {
        if expansion.excluded.contains(&client.id) {
            continue;
        }
        insert_step_entries(
            client,
            &expansion.schedule,
            None,
            expansion.target_date,
            plan,
            ctx,
            report,
        )
        .await;
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for BuildQueueUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "BuildQueue";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let today = uk_today(ctx.sys.now());

        let clients = match &self.client_id {
            Some(client_id) => {
                let client = match ctx.repos.clients.find(client_id).await {
                    Some(client) => client,
                    None => return Err(UseCaseError::ClientNotFound(client_id.clone())),
                };
                if ctx
                    .repos
                    .reminder_queue
                    .delete_scheduled_by_client(client_id)
                    .await
                    .is_err()
                {
                    return Err(UseCaseError::Storage);
                }
                vec![client]
            }
            None => ctx.repos.clients.find_all().await,
        };

        let plan = prepare_pass(today, ctx).await;
        let mut missing_schedule_audited = HashSet::new();

        let mut report = QueueBuildReport::default();
        for client in &clients {
            expand_client(client, &plan, &mut missing_schedule_audited, ctx, &mut report).await;
        }

        Ok(UseCaseRes { report })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use practice_scheduler_domain::{
        BankHoliday, ClientDeadlineOverride, ClientFilingAssignment, CustomTarget, EmailTemplate,
        ReminderStatus, ScheduleKind, ScheduleStep,
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

    fn step(step_number: i32, delay_days: i64, template: &EmailTemplate) -> ScheduleStep {
        ScheduleStep {
            step_number,
            email_template_id: template.id.clone(),
            delay_days,
        }
    }

    async fn setup() -> PracticeContext {
        let mut ctx = setup_context().await;
        // A Thursday in GMT, well before the january deadlines
        ctx.sys = Arc::new(DummySys(Utc.with_ymd_and_hms(2025, 11, 20, 9, 0, 0).unwrap()));
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

    /// A march year end client assigned to corporation tax payment with a
    /// thirty, fourteen and seven day chasing sequence.
    async fn chasing_setup(ctx: &PracticeContext) -> (Client, Schedule) {
        let template = insert_template(ctx).await;

        let mut client = Client::new("Oakfield Joinery Ltd".into());
        client.year_end_date = Some(date(2025, 3, 31));
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
            "CT payment chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CorporationTaxPayment,
            },
            vec![
                step(1, 30, &template),
                step(2, 14, &template),
                step(3, 7, &template),
            ],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        (client, schedule)
    }

    #[actix_web::test]
    async fn expands_a_filing_schedule_into_dated_entries() {
        let ctx = setup().await;
        let (client, _) = chasing_setup(&ctx).await;

        let mut usecase = BuildQueueUseCase { client_id: None };
        let report = usecase.execute(&ctx).await.unwrap().report;
        assert_eq!(report.created, 3);
        assert_eq!(report.skipped, 0);
        assert!(report.errors.is_empty());

        let mut entries = ctx.repos.reminder_queue.find_by_client(&client.id).await;
        entries.sort_by_key(|e| e.send_date);
        let send_dates = entries.iter().map(|e| e.send_date).collect::<Vec<_>>();
        assert_eq!(
            send_dates,
            vec![date(2025, 12, 2), date(2025, 12, 18), date(2025, 12, 25)]
        );
        assert!(entries.iter().all(|e| e.deadline_date == date(2026, 1, 1)));
        assert!(entries
            .iter()
            .all(|e| e.status == ReminderStatus::Scheduled));
    }

    #[actix_web::test]
    async fn a_second_pass_creates_nothing_new() {
        let ctx = setup().await;
        chasing_setup(&ctx).await;

        let first = BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(first.created, 3);

        let second = BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 3);
    }

    #[actix_web::test]
    async fn override_wins_and_send_dates_avoid_weekends_and_holidays() {
        let ctx = setup().await;
        let (client, _) = chasing_setup(&ctx).await;
        ctx.repos
            .bank_holidays
            .insert_many(&[BankHoliday::new(date(2026, 1, 5), "Substitute day")])
            .await
            .unwrap();
        ctx.repos
            .deadline_overrides
            .upsert(&ClientDeadlineOverride::new(
                client.id.clone(),
                FilingType::CorporationTaxPayment,
                date(2026, 1, 12),
                Some("Agreed extension".into()),
            ))
            .await
            .unwrap();

        BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap();

        let mut entries = ctx.repos.reminder_queue.find_by_client(&client.id).await;
        entries.sort_by_key(|e| e.send_date);
        assert!(entries.iter().all(|e| e.deadline_date == date(2026, 1, 12)));
        let send_dates = entries.iter().map(|e| e.send_date).collect::<Vec<_>>();
        // 30 days before lands on a saturday, 7 days before on the holiday
        assert_eq!(
            send_dates,
            vec![date(2025, 12, 15), date(2025, 12, 29), date(2026, 1, 6)]
        );
    }

    #[actix_web::test]
    async fn paused_or_records_received_clients_get_no_entries() {
        let ctx = setup().await;
        let (mut client, _) = chasing_setup(&ctx).await;

        client
            .records_received_for
            .insert(FilingType::CorporationTaxPayment);
        ctx.repos.clients.save(&client).await.unwrap();
        let report = BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(report.created, 0);

        client.records_received_for.clear();
        client.reminders_paused = true;
        ctx.repos.clients.save(&client).await.unwrap();
        let report = BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(report.created, 0);
    }

    #[actix_web::test]
    async fn a_scoped_rebuild_keeps_sent_entries() {
        let ctx = setup().await;
        let (client, _) = chasing_setup(&ctx).await;
        BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap();

        let mut entries = ctx.repos.reminder_queue.find_by_client(&client.id).await;
        entries.sort_by_key(|e| e.send_date);
        let mut first = entries[0].clone();
        first.status = ReminderStatus::Sent;
        ctx.repos.reminder_queue.save(&first).await.unwrap();

        let report = BuildQueueUseCase {
            client_id: Some(client.id.clone()),
        }
        .execute(&ctx)
        .await
        .unwrap()
        .report;
        assert_eq!(report.created, 2);
        assert_eq!(report.skipped, 1);

        let entries = ctx.repos.reminder_queue.find_by_client(&client.id).await;
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries
                .iter()
                .filter(|e| e.status == ReminderStatus::Sent)
                .count(),
            1
        );
    }

    #[actix_web::test]
    async fn custom_schedules_respect_the_exclusion_list() {
        let ctx = setup().await;
        let template = insert_template(&ctx).await;
        let included = Client::new("Included Ltd".into());
        let excluded = Client::new("Excluded Ltd".into());
        ctx.repos.clients.insert(&included).await.unwrap();
        ctx.repos.clients.insert(&excluded).await.unwrap();

        let schedule = Schedule::new(
            "Spring tax planning".into(),
            ScheduleKind::Custom {
                target: CustomTarget::Fixed {
                    date: date(2026, 3, 31),
                },
                send_hour: None,
            },
            vec![step(1, 21, &template)],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();
        ctx.repos
            .schedule_exclusions
            .set_for_schedule(&schedule.id, &[excluded.id.clone()])
            .await
            .unwrap();

        let report = BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(report.created, 1);

        let entries = ctx.repos.reminder_queue.find_by_client(&included.id).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filing_type, None);
        assert_eq!(entries[0].deadline_date, date(2026, 3, 31));
        assert_eq!(entries[0].send_date, date(2026, 3, 10));
        assert!(ctx
            .repos
            .reminder_queue
            .find_by_client(&excluded.id)
            .await
            .is_empty());
    }

    #[actix_web::test]
    async fn steps_with_a_missing_template_are_skipped_and_audited() {
        let ctx = setup().await;
        let template = insert_template(&ctx).await;

        let mut client = Client::new("Oakfield Joinery Ltd".into());
        client.year_end_date = Some(date(2025, 3, 31));
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
            "CT payment chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CorporationTaxPayment,
            },
            vec![
                step(1, 14, &template),
                ScheduleStep {
                    step_number: 2,
                    email_template_id: Default::default(),
                    delay_days: 7,
                },
            ],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let report = BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, 1);

        let audit_log = ctx.repos.audit.find_recent(10).await;
        assert!(audit_log
            .iter()
            .any(|entry| entry.message.contains("does not exist")));
    }

    #[actix_web::test]
    async fn a_custom_schedule_whose_date_has_passed_is_skipped() {
        let ctx = setup().await;
        let template = insert_template(&ctx).await;
        let client = Client::new("Included Ltd".into());
        ctx.repos.clients.insert(&client).await.unwrap();

        let schedule = Schedule::new(
            "Last year's campaign".into(),
            ScheduleKind::Custom {
                target: CustomTarget::Fixed {
                    date: date(2025, 1, 31),
                },
                send_hour: None,
            },
            vec![step(1, 14, &template)],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let report = BuildQueueUseCase { client_id: None }
            .execute(&ctx)
            .await
            .unwrap()
            .report;
        assert_eq!(report.created, 0);

        let audit_log = ctx.repos.audit.find_recent(10).await;
        assert!(audit_log
            .iter()
            .any(|entry| entry.message.contains("past dates")));
    }
}
