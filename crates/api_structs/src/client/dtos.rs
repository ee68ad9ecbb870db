use chrono::NaiveDate;
use practice_scheduler_domain::{
    AmberBand, Client, ClientDeadlineOverride, ClientFilingAssignment, FilingSnapshot, FilingType,
    TrafficLight, VatStaggerGroup, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClientDTO {
    pub id: ID,
    pub company_name: String,
    pub contact_email: Option<String>,
    pub year_end_date: Option<NaiveDate>,
    pub vat_stagger_group: Option<VatStaggerGroup>,
    pub reminders_paused: bool,
    pub records_received_for: Vec<FilingType>,
    pub completed_for: Vec<FilingType>,
}

impl ClientDTO {
    pub fn new(client: Client) -> Self {
        let mut records_received_for: Vec<FilingType> =
            client.records_received_for.into_iter().collect();
        records_received_for.sort_by_key(|filing_type| filing_type.key());
        let mut completed_for: Vec<FilingType> = client.completed_for.into_iter().collect();
        completed_for.sort_by_key(|filing_type| filing_type.key());
        Self {
            id: client.id,
            company_name: client.company_name,
            contact_email: client.contact_email,
            year_end_date: client.year_end_date,
            vat_stagger_group: client.vat_stagger_group,
            reminders_paused: client.reminders_paused,
            records_received_for,
            completed_for,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FilingAssignmentDTO {
    pub id: ID,
    pub client_id: ID,
    pub filing_type: FilingType,
    pub is_active: bool,
}

impl FilingAssignmentDTO {
    pub fn new(assignment: ClientFilingAssignment) -> Self {
        Self {
            id: assignment.id,
            client_id: assignment.client_id,
            filing_type: assignment.filing_type,
            is_active: assignment.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineOverrideDTO {
    pub id: ID,
    pub client_id: ID,
    pub filing_type: FilingType,
    pub override_date: NaiveDate,
    pub reason: Option<String>,
}

impl DeadlineOverrideDTO {
    pub fn new(deadline_override: ClientDeadlineOverride) -> Self {
        Self {
            id: deadline_override.id,
            client_id: deadline_override.client_id,
            filing_type: deadline_override.filing_type,
            override_date: deadline_override.override_date,
            reason: deadline_override.reason,
        }
    }
}

/// One filing with its currently resolved deadline, as shown on dashboards.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FilingDeadlineDTO {
    pub filing_type: FilingType,
    pub deadline_date: NaiveDate,
    pub reminder_sent: bool,
}

impl FilingDeadlineDTO {
    pub fn new(snapshot: FilingSnapshot) -> Self {
        Self {
            filing_type: snapshot.filing_type,
            deadline_date: snapshot.deadline_date,
            reminder_sent: snapshot.reminder_sent,
        }
    }
}

/// Dashboard row: the client plus its classified urgency.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClientOverviewDTO {
    pub id: ID,
    pub company_name: String,
    pub status: TrafficLight,
    pub band: Option<AmberBand>,
    pub next_deadline: Option<FilingDeadlineDTO>,
}

impl ClientOverviewDTO {
    pub fn new(
        client: &Client,
        status: TrafficLight,
        band: Option<AmberBand>,
        next_deadline: Option<FilingSnapshot>,
    ) -> Self {
        Self {
            id: client.id.clone(),
            company_name: client.company_name.clone(),
            status,
            band,
            next_deadline: next_deadline.map(FilingDeadlineDTO::new),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountsDTO {
    pub grey: usize,
    pub red: usize,
    pub amber: usize,
    pub green: usize,
}
