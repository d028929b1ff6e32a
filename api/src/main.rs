use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lr_api::{create_app, AppState};
use lr_core::services::{
    AuthService, BcryptPasswordHasher, FileService, FileServiceConfig, SessionConfig,
    SessionService,
};
use lr_infra::cache::{RedisClient, RedisKeyValueStore};
use lr_infra::database::{DatabasePool, PostgresUserRepository};
use lr_infra::mail::SmtpMailer;
use lr_infra::storage::R2ObjectStorage;
use lr_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    tracing::info!(
        environment = %config.environment,
        "Starting Light Room API server"
    );

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to Postgres")?;
    database.run_migrations().await.context("failed to run migrations")?;

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to Redis")?;

    let session_service = Arc::new(
        SessionService::new(
            Arc::new(RedisKeyValueStore::new(redis)),
            SessionConfig::from(&config.jwt),
        )
        .context("invalid session configuration")?,
    );

    let auth_service = Arc::new(AuthService::new(
        Arc::new(PostgresUserRepository::new(database.get_pool().clone())),
        session_service,
        Arc::new(BcryptPasswordHasher::new(config.jwt.bcrypt_cost)),
        Arc::new(SmtpMailer::new(config.mail.clone()).context("invalid mail configuration")?),
    ));

    let storage = R2ObjectStorage::new(&config.storage)
        .await
        .context("invalid storage configuration")?;
    let file_service = Arc::new(FileService::new(
        Arc::new(storage),
        FileServiceConfig::new(config.environment, &config.storage),
    ));

    let app_state = web::Data::new(
        AppState::new(auth_service, file_service)
            .with_max_upload_bytes(config.server.max_upload_bytes),
    );

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    Ok(())
}
