use std::{io, sync::Arc};

use config::Config;
use dotenv::dotenv;
use repositories::PostgresRepo;
use routes::create_routes;
use services::store::StoreService;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use uploads::{CloudinaryUploader, ImageHost};
use views::Views;

pub use self::errors::{Error, Result};

mod config;
mod errors;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;
#[cfg(test)]
mod test_support;
mod uploads;
mod views;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store_service: StoreService,
    pub image_host: Arc<dyn ImageHost>,
    pub views: Views,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    if let Err(err) = run().await {
        error!("🔥 Failed to start server: {err}");
        std::process::exit(1);
    }
}

/// Respects `RUST_LOG`, otherwise `info` for the app, axum and tower_http.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

async fn run() -> Result<()> {
    let config = Config::init()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    info!("✅ Connection to the database is successful!");

    let store_service = StoreService::new(Arc::new(PostgresRepo::new(pool.clone())));
    // nothing listens until the schema is in place
    store_service.initialize().await?;

    let app_state = AppState {
        config: config.clone(),
        store_service,
        image_host: Arc::new(CloudinaryUploader::new(config.cloudinary.clone())),
        views: Views::new()?,
    };

    let app = create_routes(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("[::]:{}", config.port)).await?;
    info!("🚀 Server is running at: http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("database pool closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
