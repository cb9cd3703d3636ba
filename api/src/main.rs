use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mall_api::{create_app, AppState};
use mall_core::services::{AreaService, AreaServiceConfig, VerificationService, VerificationServiceConfig};
use mall_infra::cache::{RedisCacheService, RedisClient};
use mall_infra::captcha::PngCaptchaRenderer;
use mall_infra::database::{DatabasePool, MySqlAreaRepository};
use mall_infra::sms::{create_sms_service, SmsGatewayAdapter};
use mall_shared::{AppConfig, LogFormat, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);
    config.validate().map_err(anyhow::Error::msg)?;

    tracing::info!(environment = ?config.environment, "Starting mall API server");

    let db_pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to MySQL")?;
    let area_cache = RedisClient::new(&config.cache)
        .await
        .context("Failed to connect to the area cache")?;
    let verification_cache = RedisClient::new(&config.verification_cache)
        .await
        .context("Failed to connect to the verification store")?;

    let sms_gateway = SmsGatewayAdapter::from_boxed(
        create_sms_service(&config.sms),
        config.sms.template_id.clone(),
    );
    tracing::info!(provider = sms_gateway.provider_name(), "SMS gateway ready");

    let area_service = Arc::new(AreaService::new(
        Arc::new(MySqlAreaRepository::new(db_pool.get_pool().clone())),
        Arc::new(RedisCacheService::new(area_cache)),
        AreaServiceConfig::from(&config.area_cache),
    ));
    let verification_service = Arc::new(VerificationService::new(
        Arc::new(sms_gateway),
        Arc::new(RedisCacheService::new(verification_cache)),
        Arc::new(PngCaptchaRenderer::new()),
        VerificationServiceConfig::from(&config.verification),
    ));

    let app_state = web::Data::new(AppState::new(area_service, verification_service));

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    db_pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
