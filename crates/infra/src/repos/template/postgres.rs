use super::ITemplateRepo;
use practice_scheduler_domain::{EmailTemplate, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresTemplateRepo {
    pool: PgPool,
}

impl PostgresTemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TemplateRaw {
    template_uid: Uuid,
    name: String,
    subject: String,
    body_text: String,
    body_html: String,
}

impl Into<EmailTemplate> for TemplateRaw {
    fn into(self) -> EmailTemplate {
        EmailTemplate {
            id: self.template_uid.into(),
            name: self.name,
            subject: self.subject,
            body_text: self.body_text,
            body_html: self.body_html,
        }
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for PostgresTemplateRepo {
    async fn insert(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO email_templates
            (template_uid, name, subject, body_text, body_html)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(template.id.inner_ref())
        .bind(&template.name)
        .bind(&template.subject)
        .bind(&template.body_text)
        .bind(&template.body_html)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<EmailTemplate> {
        let template: TemplateRaw = match sqlx::query_as(
            r#"
            SELECT * FROM email_templates
            WHERE template_uid = $1
            "#,
        )
        .bind(template_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(template) => template,
            Err(_) => return None,
        };
        Some(template.into())
    }

    async fn find_many(&self, template_ids: &[ID]) -> Vec<EmailTemplate> {
        let ids = template_ids
            .iter()
            .map(|id| id.inner_ref().clone())
            .collect::<Vec<_>>();
        sqlx::query_as::<_, TemplateRaw>(
            r#"
            SELECT * FROM email_templates
            WHERE template_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![])
        .into_iter()
        .map(|t| t.into())
        .collect()
    }

    async fn find_all(&self) -> Vec<EmailTemplate> {
        let templates: Vec<TemplateRaw> = sqlx::query_as(
            r#"
            SELECT * FROM email_templates
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);

        templates.into_iter().map(|t| t.into()).collect()
    }
}
