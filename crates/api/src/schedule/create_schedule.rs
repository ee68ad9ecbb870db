use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::create_schedule::*;
use practice_scheduler_domain::{FilingType, Schedule, ScheduleKind, ScheduleStep, ID};
use practice_scheduler_infra::PracticeContext;
use std::collections::HashSet;

pub async fn create_schedule_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let body = body_params.0;
    let usecase = CreateScheduleUseCase {
        name: body.name,
        kind: body.kind,
        steps: body.steps,
        selected_client_ids: body.selected_client_ids,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.schedule)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
pub struct CreateScheduleUseCase {
    pub name: String,
    pub kind: ScheduleKind,
    pub steps: Vec<ScheduleStep>,
    /// Custom schedules only: restricts the schedule to these clients. All
    /// other clients are written to the exclusion list.
    pub selected_client_ids: Option<Vec<ID>>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidSteps(String),
    SelectionOnFilingKind,
    FilingScheduleExists(FilingType),
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidSteps(msg) => {
                Self::BadClientData(format!("Invalid schedule steps: {}", msg))
            }
            UseCaseError::SelectionOnFilingKind => Self::BadClientData(
                "A client selection can only be given for custom schedules.".into(),
            ),
            UseCaseError::FilingScheduleExists(filing_type) => Self::Conflict(format!(
                "There is already an active schedule for {}.",
                filing_type.display_name()
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

pub fn validate_steps(steps: &[ScheduleStep]) -> Result<(), String> {
    if steps.is_empty() {
        return Err("a schedule needs at least one step".into());
    }
    let mut step_numbers = HashSet::new();
    for step in steps {
        if !step_numbers.insert(step.step_number) {
            return Err(format!("step number {} appears twice", step.step_number));
        }
        if step.delay_days < 0 {
            return Err(format!(
                "step number {} has a negative day offset",
                step.step_number
            ));
        }
    }
    Ok(())
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub schedule: Schedule,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateScheduleUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSchedule";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        if let Err(msg) = validate_steps(&self.steps) {
            return Err(UseCaseError::InvalidSteps(msg));
        }
        if self.selected_client_ids.is_some() && !matches!(self.kind, ScheduleKind::Custom { .. })
        {
            return Err(UseCaseError::SelectionOnFilingKind);
        }

        if let ScheduleKind::Filing { filing_type } = self.kind {
            // One active chasing sequence per statutory filing
            if ctx
                .repos
                .schedules
                .find_active_by_filing_type(filing_type)
                .await
                .is_some()
            {
                return Err(UseCaseError::FilingScheduleExists(filing_type));
            }
        }

        let schedule = Schedule::new(self.name.clone(), self.kind.clone(), self.steps.clone());
        if ctx.repos.schedules.insert(&schedule).await.is_err() {
            return Err(UseCaseError::Storage);
        }

        if let Some(selected) = &self.selected_client_ids {
            let selected = selected.iter().collect::<HashSet<_>>();
            let excluded = ctx
                .repos
                .clients
                .find_all()
                .await
                .into_iter()
                .map(|c| c.id)
                .filter(|id| !selected.contains(id))
                .collect::<Vec<_>>();
            if ctx
                .repos
                .schedule_exclusions
                .set_for_schedule(&schedule.id, &excluded)
                .await
                .is_err()
            {
                return Err(UseCaseError::Storage);
            }
        }

        Ok(UseCaseRes { schedule })
    }
}
