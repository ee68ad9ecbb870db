mod inmemory;
mod postgres;

pub use inmemory::InMemoryClientRepo;
use practice_scheduler_domain::{Client, ID};
pub use postgres::PostgresClientRepo;

#[async_trait::async_trait]
pub trait IClientRepo: Send + Sync {
    async fn insert(&self, client: &Client) -> anyhow::Result<()>;
    async fn save(&self, client: &Client) -> anyhow::Result<()>;
    async fn find(&self, client_id: &ID) -> Option<Client>;
    async fn find_many(&self, client_ids: &[ID]) -> Vec<Client>;
    async fn find_all(&self) -> Vec<Client>;
}
