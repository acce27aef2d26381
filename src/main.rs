use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod security;
mod services;

use config::Config;

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local development before reading configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    info!("Starting blog-service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: env={}, http_port={}",
        config.app.env, config.app.http_port
    );

    // Initialize database pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    // Verify database connection
    sqlx::query("SELECT 1")
        .execute(&pg_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    // Ensure the fixed role set exists
    services::rbac::seed_roles(&pg_pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed roles: {}", e))?;

    let bind_addr = (config.app.host.clone(), config.app.http_port);
    let pool_data = web::Data::new(pg_pool);
    let config_data = web::Data::new(config);

    info!("HTTP server listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool_data.clone())
            .app_data(config_data.clone())
            .route("/health", web::get().to(health))
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
    .context("HTTP server failed")?;

    Ok(())
}
