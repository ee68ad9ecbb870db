use super::IFilingAssignmentRepo;
use practice_scheduler_domain::{ClientFilingAssignment, FilingType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresFilingAssignmentRepo {
    pool: PgPool,
}

impl PostgresFilingAssignmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRaw {
    assignment_uid: Uuid,
    client_uid: Uuid,
    filing_type: String,
    is_active: bool,
}

impl Into<ClientFilingAssignment> for AssignmentRaw {
    fn into(self) -> ClientFilingAssignment {
        ClientFilingAssignment {
            id: self.assignment_uid.into(),
            client_id: self.client_uid.into(),
            filing_type: self
                .filing_type
                .parse()
                .unwrap_or(FilingType::CorporationTaxPayment),
            is_active: self.is_active,
        }
    }
}

#[async_trait::async_trait]
impl IFilingAssignmentRepo for PostgresFilingAssignmentRepo {
    async fn save_for_client(
        &self,
        client_id: &ID,
        assignments: &[ClientFilingAssignment],
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM client_filing_assignments
            WHERE client_uid = $1
            "#,
        )
        .bind(client_id.inner_ref())
        .execute(&self.pool)
        .await?;

        for assignment in assignments {
            sqlx::query(
                r#"
                INSERT INTO client_filing_assignments
                (assignment_uid, client_uid, filing_type, is_active)
                VALUES($1, $2, $3, $4)
                "#,
            )
            .bind(assignment.id.inner_ref())
            .bind(client_id.inner_ref())
            .bind(assignment.filing_type.key())
            .bind(assignment.is_active)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn find_by_client(&self, client_id: &ID) -> Vec<ClientFilingAssignment> {
        let assignments: Vec<AssignmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM client_filing_assignments
            WHERE client_uid = $1
            ORDER BY filing_type
            "#,
        )
        .bind(client_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        assignments.into_iter().map(|a| a.into()).collect()
    }

    async fn find_active_by_client(&self, client_id: &ID) -> Vec<ClientFilingAssignment> {
        let assignments: Vec<AssignmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM client_filing_assignments
            WHERE client_uid = $1 AND is_active = TRUE
            ORDER BY filing_type
            "#,
        )
        .bind(client_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        assignments.into_iter().map(|a| a.into()).collect()
    }
}
