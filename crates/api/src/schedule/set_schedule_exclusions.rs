use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::set_schedule_exclusions::*;
use practice_scheduler_domain::ID;
use practice_scheduler_infra::PracticeContext;

pub async fn set_schedule_exclusions_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = SetScheduleExclusionsUseCase {
        schedule_id: path_params.into_inner().schedule_id,
        client_ids: body_params.0.client_ids,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                excluded_client_ids: res.excluded_client_ids,
            })
        })
        .map_err(PracticeError::from)
}

/// Replaces the exclusion list of a custom schedule. Excluded clients get no
/// reminder entries from it.
#[derive(Debug)]
struct SetScheduleExclusionsUseCase {
    pub schedule_id: ID,
    pub client_ids: Vec<ID>,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    NotACustomSchedule,
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(schedule_id) => Self::NotFound(format!(
                "The schedule with id: {}, was not found.",
                schedule_id
            )),
            UseCaseError::NotACustomSchedule => Self::BadClientData(
                "Only custom schedules have an exclusion list.".into(),
            ),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub excluded_client_ids: Vec<ID>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetScheduleExclusionsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SetScheduleExclusions";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let schedule = match ctx.repos.schedules.find(&self.schedule_id).await {
            Some(schedule) => schedule,
            None => return Err(UseCaseError::NotFound(self.schedule_id.clone())),
        };
        if !schedule.is_custom() {
            return Err(UseCaseError::NotACustomSchedule);
        }

        if ctx
            .repos
            .schedule_exclusions
            .set_for_schedule(&schedule.id, &self.client_ids)
            .await
            .is_err()
        {
            return Err(UseCaseError::Storage);
        }
        let excluded_client_ids = ctx
            .repos
            .schedule_exclusions
            .find_by_schedule(&schedule.id)
            .await;

        Ok(UseCaseRes {
            excluded_client_ids,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use practice_scheduler_domain::{FilingType, Schedule, ScheduleKind, ScheduleStep};
    use practice_scheduler_infra::setup_context;

    #[actix_web::test]
    async fn filing_schedules_cannot_take_exclusions() {
        let ctx = setup_context().await;
        let schedule = Schedule::new(
            "VAT chasing".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            },
            vec![ScheduleStep {
                step_number: 1,
                email_template_id: Default::default(),
                delay_days: 14,
            }],
        );
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let mut usecase = SetScheduleExclusionsUseCase {
            schedule_id: schedule.id.clone(),
            client_ids: vec![Default::default()],
        };
        assert!(usecase.execute(&ctx).await.is_err());
    }
}
