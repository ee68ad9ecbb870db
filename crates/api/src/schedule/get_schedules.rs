use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::get_schedules::*;
use practice_scheduler_domain::Schedule;
use practice_scheduler_infra::PracticeContext;

pub async fn get_schedules_controller(
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = GetSchedulesUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.schedules)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
struct GetSchedulesUseCase {}

#[derive(Debug)]
struct UseCaseRes {
    pub schedules: Vec<Schedule>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSchedulesUseCase {
    type Response = UseCaseRes;

    type Error = PracticeError;

    const NAME: &'static str = "GetSchedules";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let schedules = ctx.repos.schedules.find_all().await;

        Ok(UseCaseRes { schedules })
    }
}
