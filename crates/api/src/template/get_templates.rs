use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::get_templates::*;
use practice_scheduler_domain::EmailTemplate;
use practice_scheduler_infra::PracticeContext;

pub async fn get_templates_controller(
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = GetTemplatesUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.templates)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
struct GetTemplatesUseCase {}

#[derive(Debug)]
struct UseCaseRes {
    pub templates: Vec<EmailTemplate>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTemplatesUseCase {
    type Response = UseCaseRes;

    type Error = PracticeError;

    const NAME: &'static str = "GetTemplates";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let templates = ctx.repos.templates.find_all().await;

        Ok(UseCaseRes { templates })
    }
}
