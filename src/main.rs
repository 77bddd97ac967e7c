use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinesense_api::api::{create_router, AppState};
use cinesense_api::config::Config;
use cinesense_api::services::providers::{omdb::OmdbProvider, openai::OpenAiProvider, tmdb::TmdbProvider};
use cinesense_api::services::ReportBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    // Provider clients are built once at startup and injected into the
    // orchestrator; nothing relies on ambient globals.
    let omdb = Arc::new(OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
    ));
    let tmdb = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));
    let openai = Arc::new(OpenAiProvider::new(
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
        config.openai_model.clone(),
    ));

    let report_builder = Arc::new(ReportBuilder::new(
        omdb,
        tmdb.clone(),
        tmdb,
        openai.clone(),
    ));

    let state = AppState::new(report_builder, openai);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "CineSense server running");
    axum::serve(listener, app).await?;

    Ok(())
}
