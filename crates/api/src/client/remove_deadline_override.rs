use crate::client::subscribers::RebuildQueueOnOverrideRemoved;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::dtos::DeadlineOverrideDTO;
use practice_scheduler_api_structs::remove_deadline_override::*;
use practice_scheduler_domain::{ClientDeadlineOverride, FilingType, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn remove_deadline_override_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let path_params = path_params.into_inner();
    let usecase = RemoveDeadlineOverrideUseCase {
        client_id: path_params.client_id,
        filing_type: path_params.filing_type,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                deadline_override: DeadlineOverrideDTO::new(res.deadline_override),
            })
        })
        .map_err(PracticeError::from)
}

#[derive(Debug)]
pub struct RemoveDeadlineOverrideUseCase {
    pub client_id: ID,
    pub filing_type: FilingType,
}

#[derive(Debug)]
pub enum UseCaseError {
    OverrideNotFound(ID, FilingType),
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OverrideNotFound(client_id, filing_type) => Self::NotFound(format!(
                "The client with id: {}, has no deadline override for {}.",
                client_id,
                filing_type.display_name()
            )),
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub deadline_override: ClientDeadlineOverride,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RemoveDeadlineOverrideUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "RemoveDeadlineOverride";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        match ctx
            .repos
            .deadline_overrides
            .delete(&self.client_id, self.filing_type)
            .await
        {
            Some(deadline_override) => Ok(UseCaseRes { deadline_override }),
            None => Err(UseCaseError::OverrideNotFound(
                self.client_id.clone(),
                self.filing_type,
            )),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RebuildQueueOnOverrideRemoved)]
    }
}
