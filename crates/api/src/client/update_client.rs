use crate::client::subscribers::RebuildQueueOnClientUpdated;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use practice_scheduler_api_structs::update_client::*;
use practice_scheduler_domain::{Client, VatStaggerGroup, ID};
use practice_scheduler_infra::PracticeContext;

pub async fn update_client_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = UpdateClientUseCase {
        client_id: path_params.into_inner().client_id,
        company_name: body_params.0.company_name,
        contact_email: body_params.0.contact_email,
        year_end_date: body_params.0.year_end_date,
        vat_stagger_group: body_params.0.vat_stagger_group,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.client)))
        .map_err(PracticeError::from)
}

/// Fields left as `None` are kept unchanged.
#[derive(Debug)]
pub struct UpdateClientUseCase {
    pub client_id: ID,
    pub company_name: Option<String>,
    pub contact_email: Option<String>,
    pub year_end_date: Option<NaiveDate>,
    pub vat_stagger_group: Option<VatStaggerGroup>,
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
    /// True when a deadline-relevant field changed and the client's queue
    /// needs rebuilding.
    pub metadata_changed: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateClientUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateClient";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let mut client = match ctx.repos.clients.find(&self.client_id).await {
            Some(client) => client,
            None => return Err(UseCaseError::ClientNotFound(self.client_id.clone())),
        };

        let metadata_changed = self
            .year_end_date
            .map_or(false, |date| Some(date) != client.year_end_date)
            || self
                .vat_stagger_group
                .map_or(false, |group| Some(group) != client.vat_stagger_group);

        if let Some(company_name) = &self.company_name {
            client.company_name = company_name.clone();
        }
        if let Some(contact_email) = &self.contact_email {
            client.contact_email = Some(contact_email.clone());
        }
        if let Some(year_end_date) = self.year_end_date {
            client.year_end_date = Some(year_end_date);
        }
        if let Some(vat_stagger_group) = self.vat_stagger_group {
            client.vat_stagger_group = Some(vat_stagger_group);
        }

        let res = ctx.repos.clients.save(&client).await;
        match res {
            Ok(_) => Ok(UseCaseRes {
                client,
                metadata_changed,
            }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RebuildQueueOnClientUpdated)]
    }
}
