use crate::dtos::{
    ClientDTO, ClientOverviewDTO, DeadlineOverrideDTO, FilingAssignmentDTO, FilingDeadlineDTO,
    StatusCountsDTO,
};
use practice_scheduler_domain::{Client, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub client: ClientDTO,
}

impl ClientResponse {
    pub fn new(client: Client) -> Self {
        Self {
            client: ClientDTO::new(client),
        }
    }
}

pub mod create_client {
    use chrono::NaiveDate;
    use practice_scheduler_domain::VatStaggerGroup;

    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub company_name: String,
        pub contact_email: Option<String>,
        pub year_end_date: Option<NaiveDate>,
        pub vat_stagger_group: Option<VatStaggerGroup>,
    }

    pub type APIResponse = ClientResponse;
}

pub mod get_client {
    use practice_scheduler_domain::{AmberBand, FilingSnapshot, TrafficLight};

    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub client: ClientDTO,
        pub status: TrafficLight,
        pub band: Option<AmberBand>,
        pub filings: Vec<FilingDeadlineDTO>,
    }

    impl APIResponse {
        pub fn new(
            client: Client,
            status: TrafficLight,
            band: Option<AmberBand>,
            filings: Vec<FilingSnapshot>,
        ) -> Self {
            Self {
                client: ClientDTO::new(client),
                status,
                band,
                filings: filings.into_iter().map(FilingDeadlineDTO::new).collect(),
            }
        }
    }
}

pub mod get_clients {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub clients: Vec<ClientOverviewDTO>,
        pub counts: StatusCountsDTO,
    }
}

pub mod update_client {
    use chrono::NaiveDate;
    use practice_scheduler_domain::VatStaggerGroup;

    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub company_name: Option<String>,
        pub contact_email: Option<String>,
        pub year_end_date: Option<NaiveDate>,
        pub vat_stagger_group: Option<VatStaggerGroup>,
    }

    pub type APIResponse = ClientResponse;
}

pub mod set_client_pause {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub paused: bool,
    }

    pub type APIResponse = ClientResponse;
}

pub mod set_records_received {
    use practice_scheduler_domain::FilingType;

    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub filing_type: FilingType,
        pub received: bool,
    }

    pub type APIResponse = ClientResponse;
}

pub mod set_filing_assignments {
    use practice_scheduler_domain::FilingType;

    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AssignmentInput {
        pub filing_type: FilingType,
        pub is_active: bool,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub assignments: Vec<AssignmentInput>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub assignments: Vec<FilingAssignmentDTO>,
    }
}

pub mod set_deadline_override {
    use chrono::NaiveDate;
    use practice_scheduler_domain::FilingType;

    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
        pub filing_type: FilingType,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub override_date: NaiveDate,
        pub reason: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deadline_override: DeadlineOverrideDTO,
    }
}

pub mod remove_deadline_override {
    use practice_scheduler_domain::FilingType;

    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
        pub filing_type: FilingType,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deadline_override: DeadlineOverrideDTO,
    }
}

pub mod get_client_queue {
    use crate::dtos::ReminderQueueEntryDTO;

    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entries: Vec<ReminderQueueEntryDTO>,
    }
}
