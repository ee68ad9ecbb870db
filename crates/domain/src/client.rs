use crate::filing::{FilingType, VatStaggerGroup};
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use std::collections::HashSet;

/// A client of the practice and the metadata its deadlines derive from.
///
/// `year_end_date` always holds the end of the current accounting cycle, the
/// rollover sweep advances it by a year once the cycle's deadlines are done.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ID,
    pub company_name: String,
    pub contact_email: Option<String>,
    pub year_end_date: Option<NaiveDate>,
    pub vat_stagger_group: Option<VatStaggerGroup>,
    pub reminders_paused: bool,
    pub records_received_for: HashSet<FilingType>,
    pub completed_for: HashSet<FilingType>,
}

impl Client {
    pub fn new(company_name: String) -> Self {
        Self {
            id: Default::default(),
            company_name,
            contact_email: None,
            year_end_date: None,
            vat_stagger_group: None,
            reminders_paused: false,
            records_received_for: HashSet::new(),
            completed_for: HashSet::new(),
        }
    }
}

impl Entity for Client {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Marks a filing type as applying to a client. Only active assignments are
/// expanded into reminders.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFilingAssignment {
    pub id: ID,
    pub client_id: ID,
    pub filing_type: FilingType,
    pub is_active: bool,
}

impl ClientFilingAssignment {
    pub fn new(client_id: ID, filing_type: FilingType) -> Self {
        Self {
            id: Default::default(),
            client_id,
            filing_type,
            is_active: true,
        }
    }
}

impl Entity for ClientFilingAssignment {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A staff supplied deadline that takes precedence over the calculated one
/// for a single (client, filing type) pair. Removing it reverts to the
/// calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDeadlineOverride {
    pub id: ID,
    pub client_id: ID,
    pub filing_type: FilingType,
    pub override_date: NaiveDate,
    pub reason: Option<String>,
}

impl ClientDeadlineOverride {
    pub fn new(
        client_id: ID,
        filing_type: FilingType,
        override_date: NaiveDate,
        reason: Option<String>,
    ) -> Self {
        Self {
            id: Default::default(),
            client_id,
            filing_type,
            override_date,
            reason,
        }
    }
}

impl Entity for ClientDeadlineOverride {
    fn id(&self) -> &ID {
        &self.id
    }
}
