use crate::client::subscribers::RebuildQueueOnRecordsCleared;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::set_records_received::*;
use practice_scheduler_domain::{Client, FilingType, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn set_records_received_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = SetRecordsReceivedUseCase {
        client_id: path_params.into_inner().client_id,
        filing_type: body_params.0.filing_type,
        received: body_params.0.received,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.client)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
pub struct SetRecordsReceivedUseCase {
    pub client_id: ID,
    pub filing_type: FilingType,
    pub received: bool,
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
    pub client: Client,
    pub received: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetRecordsReceivedUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SetRecordsReceived";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let mut client = match ctx.repos.clients.find(&self.client_id).await {
            Some(client) => client,
            None => return Err(UseCaseError::ClientNotFound(self.client_id.clone())),
        };

        if self.received {
            client.records_received_for.insert(self.filing_type);
        } else {
            client.records_received_for.remove(&self.filing_type);
        }
        if ctx.repos.clients.save(&client).await.is_err() {
            return Err(UseCaseError::Storage);
        }

        if self.received {
            // The client's books are in, stop chasing this filing. Entries
            // already sent or in flight stay as they are.
            if ctx
                .repos
                .reminder_queue
                .cancel_scheduled_for_filing(&client.id, self.filing_type)
                .await
                .is_err()
            {
                return Err(UseCaseError::Storage);
            }
        }

        Ok(UseCaseRes {
            client,
            received: self.received,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RebuildQueueOnRecordsCleared)]
    }
}
