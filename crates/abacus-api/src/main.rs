//! Binary entrypoint for the Abacus API server.
use abacus_api::{run, ApiConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ABACUS_CONFIG / ABACUS_ADDR / ABACUS_DEFAULT_BASE / ABACUS_MAX_EXPRESSION_LEN
    let config = ApiConfig::from_env()?;
    run(config).await
}
