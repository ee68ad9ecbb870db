use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::get_template::*;
use practice_scheduler_domain::{EmailTemplate, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn get_template_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = GetTemplateUseCase {
        template_id: path_params.into_inner().template_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.template)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
struct GetTemplateUseCase {
    pub template_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(template_id) => Self::NotFound(format!(
                "The template with id: {}, was not found.",
                template_id
            )),
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub template: EmailTemplate,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTemplateUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTemplate";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.templates.find(&self.template_id).await {
            Some(template) => Ok(UseCaseRes { template }),
            None => Err(UseCaseError::NotFound(self.template_id.clone())),
        }
    }
}
