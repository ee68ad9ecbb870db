use crate::client::filings::filing_snapshots;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::dtos::{ClientOverviewDTO, StatusCountsDTO};
use practice_scheduler_api_structs::get_clients::*;
use practice_scheduler_domain::{
    amber_band, classify, date::uk_today, AmberBand, Client, FilingSnapshot, TrafficLight,
};
use practice_scheduler_infra::PracticeContext;

pub async fn get_clients_controller(
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = GetClientsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|res| {
            let mut counts = StatusCountsDTO::default();
            let clients = res
                .overviews
                .iter()
                .map(|overview| {
                    match overview.status {
                        TrafficLight::Grey => counts.grey += 1,
                        TrafficLight::Red => counts.red += 1,
                        TrafficLight::Amber => counts.amber += 1,
                        TrafficLight::Green => counts.green += 1,
                    }
                    ClientOverviewDTO::new(
                        &overview.client,
                        overview.status,
                        overview.band,
                        overview.next_deadline.clone(),
                    )
                })
                .collect();
            HttpResponse::Ok().json(APIResponse { clients, counts })
        })
        .map_err(PracticeError::from)
}

#[derive(Debug)]
pub struct GetClientsUseCase {}

#[derive(Debug)]
pub struct ClientOverview {
    pub client: Client,
    pub status: TrafficLight,
    pub band: Option<AmberBand>,
    pub next_deadline: Option<FilingSnapshot>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub overviews: Vec<ClientOverview>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetClientsUseCase {
    type Response = UseCaseRes;

    type Error = PracticeError;

    const NAME: &'static str = "GetClients";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let clients = ctx.repos.clients.find_all().await;
        let today = uk_today(ctx.sys.now());

        let mut overviews = Vec::with_capacity(clients.len());
        for client in clients {
            let filings = filing_snapshots(&client, today, ctx).await;
            let status = classify(
                client.reminders_paused,
                &client.records_received_for,
                &filings,
                today,
            );
            let band = match status {
                TrafficLight::Amber => amber_band(&client.records_received_for, &filings, today),
                _ => None,
            };
            let next_deadline = filings
                .iter()
                .min_by_key(|filing| filing.deadline_date)
                .cloned();
            overviews.push(ClientOverview {
                client,
                status,
                band,
                next_deadline,
            });
        }

        Ok(UseCaseRes { overviews })
    }
}
