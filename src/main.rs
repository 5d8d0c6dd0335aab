mod models;
mod service;
mod config;
mod dtos;
mod error;
mod db;
mod handler;
mod routes;
#[cfg(test)]
mod test_support;

use std::{sync::Arc, time::Duration};

use axum::http::{header::{AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method};
use config::Config;
use db::{DBClient, ReferralExt};
use dotenv::dotenv;
use routes::create_router;
use service::{
    referral::{ReferralCodeSource, UuidCodeSource},
    scraper::{SampleScraper, Scraper},
    sheets::{GoogleSheetsClient, SpreadsheetExt},
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

/// Client handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<dyn ReferralExt>,
    pub sheets: Arc<dyn SpreadsheetExt>,
    pub scraper: Arc<dyn Scraper>,
    pub code_source: Arc<dyn ReferralCodeSource>,
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allow_origin = match &config.cors_allowed_origins {
        Some(origins) => AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin {}", origin);
                        None
                    }
                }),
        ),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            tracing::error!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let sheets = match GoogleSheetsClient::from_credentials_file(
        &config.google_credentials_path,
        Duration::from_secs(config.http_timeout_secs),
    )
    .await
    {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(
                "🔥 Failed to load spreadsheet credentials from {}: {}",
                config.google_credentials_path,
                err
            );
            std::process::exit(1);
        }
    };

    let app_state = AppState {
        env: config.clone(),
        db_client: Arc::new(DBClient::new(pool)),
        sheets: Arc::new(sheets),
        scraper: Arc::new(SampleScraper),
        code_source: Arc::new(UuidCodeSource),
    };

    let app = create_router(Arc::new(app_state)).layer(cors_layer(&config));

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("🔥 Failed to bind port {}: {}", config.port, err);
            std::process::exit(1);
        }
    };

    println!("🚀 Server is running on http://localhost:{}", config.port);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", err);
        std::process::exit(1);
    }
}
