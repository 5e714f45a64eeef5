mod error;
mod forms;
mod handlers;
mod router;
mod setup;
mod state;

use atelier_core::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let (_state, router) = setup::initialize_app(config.clone()).await?;
    setup::start_server(&config, router).await?;

    Ok(())
}
