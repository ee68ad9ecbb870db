use crate::client::subscribers::RebuildQueueOnClientResumed;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::set_client_pause::*;
use practice_scheduler_domain::{date::uk_today, Client, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn set_client_pause_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = SetClientPauseUseCase {
        client_id: path_params.into_inner().client_id,
        paused: body_params.0.paused,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.client)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
pub struct SetClientPauseUseCase {
    pub client_id: ID,
    pub paused: bool,
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
    pub resumed: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetClientPauseUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SetClientPause";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let mut client = match ctx.repos.clients.find(&self.client_id).await {
            Some(client) => client,
            None => return Err(UseCaseError::ClientNotFound(self.client_id.clone())),
        };

        let resumed = client.reminders_paused && !self.paused;
        client.reminders_paused = self.paused;
        if ctx.repos.clients.save(&client).await.is_err() {
            return Err(UseCaseError::Storage);
        }

        if resumed {
            // Reminders that should have gone out while paused are skipped,
            // never sent late.
            let today = uk_today(ctx.sys.now());
            if ctx
                .repos
                .reminder_queue
                .cancel_scheduled_before(&client.id, today)
                .await
                .is_err()
            {
                return Err(UseCaseError::Storage);
            }
        }

        Ok(UseCaseRes { client, resumed })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RebuildQueueOnClientResumed)]
    }
}
