use crate::client::subscribers::RebuildQueueOnClientCreated;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use practice_scheduler_api_structs::create_client::*;
use practice_scheduler_domain::{Client, VatStaggerGroup};
use practice_scheduler_infra::PracticeContext;

pub async fn create_client_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = CreateClientUseCase {
        company_name: body_params.0.company_name,
        contact_email: body_params.0.contact_email,
        year_end_date: body_params.0.year_end_date,
        vat_stagger_group: body_params.0.vat_stagger_group,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.client)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
pub struct CreateClientUseCase {
    pub company_name: String,
    pub contact_email: Option<String>,
    pub year_end_date: Option<NaiveDate>,
    pub vat_stagger_group: Option<VatStaggerGroup>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidCompanyName,
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCompanyName => {
                Self::BadClientData("Company name cannot be empty.".into())
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub client: Client,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateClientUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateClient";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        if self.company_name.trim().is_empty() {
            return Err(UseCaseError::InvalidCompanyName);
        }

        let mut client = Client::new(self.company_name.clone());
        client.contact_email = self.contact_email.clone();
        client.year_end_date = self.year_end_date;
        client.vat_stagger_group = self.vat_stagger_group;

        let res = ctx.repos.clients.insert(&client).await;
        match res {
            Ok(_) => Ok(UseCaseRes { client }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RebuildQueueOnClientCreated)]
    }
}
