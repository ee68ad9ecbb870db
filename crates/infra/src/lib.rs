mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{DeleteResult, Repos};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct PracticeContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl PracticeContext {
    fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> PracticeContext {
    match psql_connection_string() {
        Some(connection_string) => {
            info!("{} env var was provided. Going to use postgres.", PSQL_CONNECTION_STRING);
            PracticeContext::create(ContextParams {
                postgres_connection_string: connection_string,
            })
            .await
        }
        None => {
            info!(
                "{} env var was not provided. Going to use inmemory infra.",
                PSQL_CONNECTION_STRING
            );
            PracticeContext::create_inmemory()
        }
    }
}

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

fn psql_connection_string() -> Option<String> {
    std::env::var(PSQL_CONNECTION_STRING).ok()
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = psql_connection_string()
        .unwrap_or_else(|| panic!("{} env var to be present.", PSQL_CONNECTION_STRING));
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
