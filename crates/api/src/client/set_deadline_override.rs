use crate::client::subscribers::RebuildQueueOnOverrideChanged;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use practice_scheduler_api_structs::dtos::DeadlineOverrideDTO;
use practice_scheduler_api_structs::set_deadline_override::*;
use practice_scheduler_domain::{ClientDeadlineOverride, FilingType, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn set_deadline_override_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let path_params = path_params.into_inner();
    let usecase = SetDeadlineOverrideUseCase {
        client_id: path_params.client_id,
        filing_type: path_params.filing_type,
        override_date: body_params.0.override_date,
        reason: body_params.0.reason,
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
pub struct SetDeadlineOverrideUseCase {
    pub client_id: ID,
    pub filing_type: FilingType,
    pub override_date: NaiveDate,
    pub reason: Option<String>,
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
    pub deadline_override: ClientDeadlineOverride,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetDeadlineOverrideUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SetDeadlineOverride";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.clients.find(&self.client_id).await.is_none() {
            return Err(UseCaseError::ClientNotFound(self.client_id.clone()));
        }

        let deadline_override = ClientDeadlineOverride::new(
            self.client_id.clone(),
            self.filing_type,
            self.override_date,
            self.reason.clone(),
        );
        match ctx.repos.deadline_overrides.upsert(&deadline_override).await {
            Ok(_) => Ok(UseCaseRes { deadline_override }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RebuildQueueOnOverrideChanged)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use practice_scheduler_domain::Client;
    use practice_scheduler_infra::setup_context;

    #[actix_web::test]
    async fn second_override_for_same_filing_replaces_the_first() {
        let ctx = setup_context().await;
        let client = Client::new("Kingsbridge Stores Ltd".into());
        ctx.repos.clients.insert(&client).await.unwrap();

        let mut first = SetDeadlineOverrideUseCase {
            client_id: client.id.clone(),
            filing_type: FilingType::VatReturn,
            override_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            reason: Some("Agreed extension".into()),
        };
        first.execute(&ctx).await.unwrap();

        let mut second = SetDeadlineOverrideUseCase {
            client_id: client.id.clone(),
            filing_type: FilingType::VatReturn,
            override_date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            reason: None,
        };
        second.execute(&ctx).await.unwrap();

        let overrides = ctx.repos.deadline_overrides.find_by_client(&client.id).await;
        assert_eq!(overrides.len(), 1);
        assert_eq!(
            overrides[0].override_date,
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }
}
