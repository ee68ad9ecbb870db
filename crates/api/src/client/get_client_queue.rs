use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::dtos::ReminderQueueEntryDTO;
use practice_scheduler_api_structs::get_client_queue::*;
use practice_scheduler_domain::{ReminderQueueEntry, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn get_client_queue_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = GetClientQueueUseCase {
        client_id: path_params.into_inner().client_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                entries: res
                    .entries
                    .into_iter()
                    .map(ReminderQueueEntryDTO::new)
                    .collect(),
            })
        })
        .map_err(PracticeError::from)
}

#[derive(Debug)]
pub struct GetClientQueueUseCase {
    pub client_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    ClientNotFound(ID),
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ClientNotFound(client_id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", client_id))
            }
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub entries: Vec<ReminderQueueEntry>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetClientQueueUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetClientQueue";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.clients.find(&self.client_id).await.is_none() {
            return Err(UseCaseError::ClientNotFound(self.client_id.clone()));
        }

        let entries = ctx.repos.reminder_queue.find_by_client(&self.client_id).await;

        Ok(UseCaseRes { entries })
    }
}
