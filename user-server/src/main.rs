mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use std::sync::Arc;

use application::user_service::UserService;
use data::memory_repository::InMemoryUserRepository;
use data::user_repository::PostgresUserRepository;
use infrastructure::config::{AppConfig, StorageConfig};
use infrastructure::database::{close_pool, create_pool, run_migrations};
use infrastructure::logging::init_logging;
use tracing::warn;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;

    match &config.storage {
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = create_pool(database_url, *max_connections).await?;
            run_migrations(&pool).await?;

            let service = UserService::new(Arc::new(PostgresUserRepository::new(pool.clone())));
            let served = server::run(service, &config).await;

            close_pool(pool).await;
            served
        }
        StorageConfig::Memory => {
            warn!("using the in-memory user store; records are lost on shutdown");
            let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
            server::run(service, &config).await
        }
    }
}
