use crate::client::filings::filing_snapshots;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::get_client::*;
use practice_scheduler_domain::{
    amber_band, classify, date::uk_today, AmberBand, Client, FilingSnapshot, TrafficLight, ID,
};
use practice_scheduler_infra::PracticeContext;

pub async fn get_client_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = GetClientUseCase {
        client_id: path_params.into_inner().client_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(res.client, res.status, res.band, res.filings))
        })
        .map_err(PracticeError::from)
}

#[derive(Debug)]
pub struct GetClientUseCase {
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
    pub client: Client,
    pub status: TrafficLight,
    pub band: Option<AmberBand>,
    pub filings: Vec<FilingSnapshot>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetClientUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetClient";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let client = match ctx.repos.clients.find(&self.client_id).await {
            Some(client) => client,
            None => return Err(UseCaseError::ClientNotFound(self.client_id.clone())),
        };

        let today = uk_today(ctx.sys.now());
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

        Ok(UseCaseRes {
            client,
            status,
            band,
            filings,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use practice_scheduler_domain::{ClientFilingAssignment, FilingType};
    use practice_scheduler_infra::{setup_context, ISys};
    use std::sync::Arc;

    struct DummySys(DateTime<Utc>);
    impl ISys for DummySys {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[actix_web::test]
    async fn classifies_a_client_from_its_assignments() {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(DummySys(Utc.with_ymd_and_hms(2025, 11, 20, 9, 0, 0).unwrap()));

        let mut client = Client::new("Bluebird Joinery Ltd".into());
        client.year_end_date = Some(date(2025, 3, 31));
        ctx.repos.clients.insert(&client).await.unwrap();
        let assignment =
            ClientFilingAssignment::new(client.id.clone(), FilingType::CorporationTaxPayment);
        ctx.repos
            .filing_assignments
            .save_for_client(&client.id, &[assignment])
            .await
            .unwrap();

        let mut usecase = GetClientUseCase {
            client_id: client.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(res.status, TrafficLight::Green);
        assert_eq!(res.filings.len(), 1);
        assert_eq!(res.filings[0].deadline_date, date(2026, 1, 1));
        assert!(!res.filings[0].reminder_sent);
    }

    #[actix_web::test]
    async fn missing_client_is_not_found() {
        let ctx = setup_context().await;

        let mut usecase = GetClientUseCase {
            client_id: Default::default(),
        };

        assert!(usecase.execute(&ctx).await.is_err());
    }
}
