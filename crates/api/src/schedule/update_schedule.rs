use crate::error::PracticeError;
use crate::schedule::create_schedule::validate_steps;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::update_schedule::*;
use practice_scheduler_domain::{FilingType, Schedule, ScheduleKind, ScheduleStep, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn update_schedule_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let body = body_params.0;
    let usecase = UpdateScheduleUseCase {
        schedule_id: path_params.into_inner().schedule_id,
        name: body.name,
        kind: body.kind,
        steps: body.steps,
        is_active: body.is_active,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.schedule)))
        .map_err(PracticeError::from)
}

/// Fields left as `None` are kept unchanged.
#[derive(Debug)]
struct UpdateScheduleUseCase {
    pub schedule_id: ID,
    pub name: Option<String>,
    pub kind: Option<ScheduleKind>,
    pub steps: Option<Vec<ScheduleStep>>,
    pub is_active: Option<bool>,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    InvalidSteps(String),
    FilingScheduleExists(FilingType),
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(schedule_id) => Self::NotFound(format!(
                "The schedule with id: {}, was not found.",
                schedule_id
            )),
            UseCaseError::InvalidSteps(msg) => {
                Self::BadClientData(format!("Invalid schedule steps: {}", msg))
            }
            UseCaseError::FilingScheduleExists(filing_type) => Self::Conflict(format!(
                "There is already an active schedule for {}.",
                filing_type.display_name()
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub schedule: Schedule,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateScheduleUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSchedule";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let mut schedule = match ctx.repos.schedules.find(&self.schedule_id).await {
            Some(schedule) => schedule,
            None => return Err(UseCaseError::NotFound(self.schedule_id.clone())),
        };

        if let Some(steps) = &self.steps {
            if let Err(msg) = validate_steps(steps) {
                return Err(UseCaseError::InvalidSteps(msg));
            }
        }

        let kind = self.kind.clone().unwrap_or_else(|| schedule.kind.clone());
        let is_active = self.is_active.unwrap_or(schedule.is_active);
        if is_active {
            if let ScheduleKind::Filing { filing_type } = kind {
                let existing = ctx
                    .repos
                    .schedules
                    .find_active_by_filing_type(filing_type)
                    .await;
                if let Some(existing) = existing {
                    if existing.id != schedule.id {
                        return Err(UseCaseError::FilingScheduleExists(filing_type));
                    }
                }
            }
        }

        if let Some(name) = &self.name {
            schedule.name = name.clone();
        }
        schedule.kind = kind;
        schedule.is_active = is_active;
        if let Some(steps) = &self.steps {
            schedule.set_steps(steps.clone());
        }

        let res = ctx.repos.schedules.save(&schedule).await;
        match res {
            Ok(_) => Ok(UseCaseRes { schedule }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use practice_scheduler_infra::setup_context;

    fn step(step_number: i32, delay_days: i64) -> ScheduleStep {
        ScheduleStep {
            step_number,
            email_template_id: Default::default(),
            delay_days,
        }
    }

    #[actix_web::test]
    async fn reactivating_checks_other_schedules_not_itself() {
        let ctx = setup_context().await;
        let schedule = Schedule::new(
            "VAT chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            },
            vec![step(1, 14)],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        // A no-op update of an active filing schedule must not conflict
        // with its own registration.
        let mut usecase = UpdateScheduleUseCase {
            schedule_id: schedule.id.clone(),
            name: Some("VAT chasing v2".into()),
            kind: None,
            steps: None,
            is_active: Some(true),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.schedule.name, "VAT chasing v2");
    }

    #[actix_web::test]
    async fn switching_filing_type_onto_a_taken_one_conflicts() {
        let ctx = setup_context().await;
        let vat = Schedule::new(
            "VAT chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            },
            vec![step(1, 14)],
        );
        let accounts = Schedule::new(
            "Accounts chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CompaniesHouseAccounts,
            },
            vec![step(1, 30)],
        );
        ctx.repos.schedules.insert(&vat).await.unwrap();
        ctx.repos.schedules.insert(&accounts).await.unwrap();

        let mut usecase = UpdateScheduleUseCase {
            schedule_id: accounts.id.clone(),
            name: None,
            kind: Some(ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            }),
            steps: None,
            is_active: None,
        };
        assert!(usecase.execute(&ctx).await.is_err());
    }

    #[actix_web::test]
    async fn steps_are_stored_in_step_number_order() {
        let ctx = setup_context().await;
        let schedule = Schedule::new(
            "VAT chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            },
            vec![step(1, 14)],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let mut usecase = UpdateScheduleUseCase {
            schedule_id: schedule.id.clone(),
            name: None,
            kind: None,
            steps: Some(vec![step(3, 7), step(1, 30), step(2, 14)]),
            is_active: None,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        let step_numbers = res
            .schedule
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect::<Vec<_>>();
        assert_eq!(step_numbers, vec![1, 2, 3]);
    }
}
