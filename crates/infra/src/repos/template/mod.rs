mod inmemory;
mod postgres;

pub use inmemory::InMemoryTemplateRepo;
pub use postgres::PostgresTemplateRepo;
use practice_scheduler_domain::{EmailTemplate, ID};

#[async_trait::async_trait]
pub trait ITemplateRepo: Send + Sync {
    async fn insert(&self, template: &EmailTemplate) -> anyhow::Result<()>;
    async fn find(&self, template_id: &ID) -> Option<EmailTemplate>;
    async fn find_many(&self, template_ids: &[ID]) -> Vec<EmailTemplate>;
    async fn find_all(&self) -> Vec<EmailTemplate>;
}
