use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use cry_relay::application::services::AnalysisService;
use cry_relay::infrastructure::archive::ZipArchiveReader;
use cry_relay::infrastructure::github::GitHubActionsBackend;
use cry_relay::infrastructure::observability::{TracingConfig, init_tracing};
use cry_relay::infrastructure::staging::PayloadStagerFactory;
use cry_relay::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;
    settings.validate().map_err(anyhow::Error::msg)?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    if settings.backend.token.is_none() {
        tracing::warn!("GITHUB_TOKEN is not set, analyze requests will be rejected");
    }

    let backend = Arc::new(
        GitHubActionsBackend::new(Some(settings.backend.api_base_url.clone()))
            .context("Failed to build backend client")?,
    );
    let stager =
        PayloadStagerFactory::create(&settings.staging).context("Failed to build payload stager")?;

    tracing::info!(
        owner = %settings.backend.owner,
        repo = %settings.backend.repo,
        strategy = ?settings.staging.strategy,
        cadence_secs = settings.polling.cadence_secs,
        deadline_secs = settings.polling.deadline_secs,
        "Orchestrator configured"
    );

    let analysis_service = Arc::new(AnalysisService::new(
        settings.orchestrator_config(),
        backend,
        stager,
        Arc::new(ZipArchiveReader),
    ));

    let state = AppState {
        analysis_service,
        max_upload_bytes: settings.max_upload_bytes(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
