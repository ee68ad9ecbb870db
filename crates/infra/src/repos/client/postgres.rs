use super::IClientRepo;
use chrono::NaiveDate;
use practice_scheduler_domain::{Client, FilingType, VatStaggerGroup, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use std::collections::HashSet;
use std::convert::TryFrom;

pub struct PostgresClientRepo {
    pool: PgPool,
}

impl PostgresClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClientRaw {
    client_uid: Uuid,
    company_name: String,
    contact_email: Option<String>,
    year_end_date: Option<NaiveDate>,
    vat_stagger_group: Option<i16>,
    reminders_paused: bool,
    records_received_for: serde_json::Value,
    completed_for: serde_json::Value,
}

impl Into<Client> for ClientRaw {
    fn into(self) -> Client {
        Client {
            id: self.client_uid.into(),
            company_name: self.company_name,
            contact_email: self.contact_email,
            year_end_date: self.year_end_date,
            vat_stagger_group: self
                .vat_stagger_group
                .and_then(|group| VatStaggerGroup::try_from(group).ok()),
            reminders_paused: self.reminders_paused,
            records_received_for: serde_json::from_value(self.records_received_for)
                .unwrap_or_default(),
            completed_for: serde_json::from_value(self.completed_for).unwrap_or_default(),
        }
    }
}

fn filing_set_json(filing_types: &HashSet<FilingType>) -> Json<Vec<FilingType>> {
    let mut filing_types: Vec<FilingType> = filing_types.iter().copied().collect();
    filing_types.sort_by_key(|filing_type| filing_type.key());
    Json(filing_types)
}

#[async_trait::async_trait]
impl IClientRepo for PostgresClientRepo {
    async fn insert(&self, client: &Client) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO clients
            (client_uid, company_name, contact_email, year_end_date, vat_stagger_group, reminders_paused, records_received_for, completed_for)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(client.id.inner_ref())
        .bind(&client.company_name)
        .bind(&client.contact_email)
        .bind(client.year_end_date)
        .bind(client.vat_stagger_group.map(i16::from))
        .bind(client.reminders_paused)
        .bind(filing_set_json(&client.records_received_for))
        .bind(filing_set_json(&client.completed_for))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, client: &Client) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE clients
            SET company_name = $2,
            contact_email = $3,
            year_end_date = $4,
            vat_stagger_group = $5,
            reminders_paused = $6,
            records_received_for = $7,
            completed_for = $8
            WHERE client_uid = $1
            "#,
        )
        .bind(client.id.inner_ref())
        .bind(&client.company_name)
        .bind(&client.contact_email)
        .bind(client.year_end_date)
        .bind(client.vat_stagger_group.map(i16::from))
        .bind(client.reminders_paused)
        .bind(filing_set_json(&client.records_received_for))
        .bind(filing_set_json(&client.completed_for))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, client_id: &ID) -> Option<Client> {
        let client: ClientRaw = match sqlx::query_as(
            r#"
            SELECT * FROM clients
            WHERE client_uid = $1
            "#,
        )
        .bind(client_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(client) => client,
            Err(_) => return None,
        };
        Some(client.into())
    }

    async fn find_many(&self, client_ids: &[ID]) -> Vec<Client> {
        let ids = client_ids
            .iter()
            .map(|id| id.inner_ref().clone())
            .collect::<Vec<_>>();
        sqlx::query_as::<_, ClientRaw>(
            r#"
            SELECT * FROM clients
            WHERE client_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![])
        .into_iter()
        .map(|c| c.into())
        .collect()
    }

    async fn find_all(&self) -> Vec<Client> {
        let clients: Vec<ClientRaw> = sqlx::query_as(
            r#"
            SELECT * FROM clients
            ORDER BY company_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        clients.into_iter().map(|c| c.into()).collect()
    }
}
