use anyhow::Context;

use stratus_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stratus_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        seed_sample_data = config.seed_sample_data,
        use_experimental_repository = config.features.use_experimental_repository,
        allow_get_forecast_by_date = config.features.allow_get_forecast_by_date,
        "configuration loaded"
    );

    let app = stratus_api::app::build_app(&config).context("failed to build application")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
