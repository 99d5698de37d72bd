use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use leadgen::{EmailHarvester, Geocoder, OsmLeadExtractor, OverpassClient};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use server_core::config::Config;
use server_core::jobs::{JobTracker, MemoryJobStore};
use server_core::server::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,leadgen=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(120))
        .build()
        .context("Failed to build HTTP client")?;

    let mut geocoder = Geocoder::new(client.clone());
    if let Some(url) = &config.nominatim_url {
        geocoder = geocoder.with_endpoint(url);
    }
    let mut overpass = OverpassClient::new(client.clone());
    if let Some(url) = &config.overpass_url {
        overpass = overpass.with_endpoint(url);
    }
    let extractor = OsmLeadExtractor::new(geocoder, overpass, EmailHarvester::new(client))
        .with_fetch_delay(config.fetch_delay);

    let tracker = Arc::new(
        JobTracker::new(Arc::new(MemoryJobStore::new()), Arc::new(extractor))
            .with_job_timeout(config.job_timeout),
    );
    let app = build_app(AppState::new(tracker));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Lead extraction API listening");

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;
    Ok(())
}
