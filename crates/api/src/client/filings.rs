use chrono::NaiveDate;
use practice_scheduler_domain::{resolve_deadline, Client, FilingSnapshot, ReminderStatus};
use practice_scheduler_infra::PracticeContext;

/// Resolves the client's active filings into the snapshots the classifier
/// consumes: the currently effective deadline (override first) and whether a
/// reminder for that cycle has already gone out. Filings whose metadata is
/// missing resolve to no deadline and are left out.
pub async fn filing_snapshots(
    client: &Client,
    today: NaiveDate,
    ctx: &PracticeContext,
) -> Vec<FilingSnapshot> {
    let assignments = ctx
        .repos
        .filing_assignments
        .find_active_by_client(&client.id)
        .await;
    let overrides = ctx.repos.deadline_overrides.find_by_client(&client.id).await;
    let queue = ctx.repos.reminder_queue.find_by_client(&client.id).await;

    let mut snapshots = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let filing_type = assignment.filing_type;
        let override_date = overrides
            .iter()
            .find(|o| o.filing_type == filing_type)
            .map(|o| o.override_date);
        let deadline_date = match override_date.or_else(|| {
            resolve_deadline(
                filing_type,
                client.year_end_date,
                client.vat_stagger_group,
                today,
            )
        }) {
            Some(deadline) => deadline,
            None => continue,
        };
        let reminder_sent = queue.iter().any(|entry| {
            entry.filing_type == Some(filing_type)
                && entry.deadline_date == deadline_date
                && entry.status == ReminderStatus::Sent
        });
        snapshots.push(FilingSnapshot {
            filing_type,
            deadline_date,
            reminder_sent,
        });
    }
    snapshots
}
