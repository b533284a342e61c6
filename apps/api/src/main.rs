mod candidates;
mod config;
mod db;
mod documents;
mod errors;
mod extractors;
mod matching;
mod models;
mod parsing;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::scorer::{KeywordMatchScorer, ScoringWeights};
use crate::parsing::taxonomy::Taxonomy;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV screener v{}", env!("CARGO_PKG_VERSION"));

    // Keyword tables: built-in unless overridden
    let taxonomy = match &config.taxonomy_path {
        Some(path) => {
            let taxonomy = Taxonomy::load(path)?;
            info!("Loaded taxonomy from {}", path.display());
            taxonomy
        }
        None => Taxonomy::default(),
    };
    info!(
        "Taxonomy: {} skill categories, {} keywords, {} tag rules",
        taxonomy.skills.len(),
        taxonomy.keyword_count(),
        taxonomy.tag_rules.len()
    );
    let taxonomy = Arc::new(taxonomy);

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Match scorer shares the taxonomy's degree and location tables
    let scorer = Arc::new(KeywordMatchScorer::new(
        ScoringWeights::default(),
        taxonomy.as_ref().clone(),
    ));

    // Build app state
    let state = AppState {
        db,
        s3,
        config: config.clone(),
        taxonomy,
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "cv-screener-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
