//! Application initialization and server startup.

use std::sync::Arc;

use anyhow::{Context, Result};
use atelier_core::models::{Blog, Offering, Podcast};
use atelier_core::Config;
use atelier_db::{
    PgBroadcastRepository, PgContentRepository, PgContractRepository, PgProfileRepository,
    PgStatsRepository, PgSubscriberRepository,
};
use atelier_services::{
    AdminService, BroadcastService, ContentService, ContractService, DisabledMailer, Mailer,
    ProfileService, SmtpMailer,
};
use axum::Router;

use crate::router;
use crate::state::AppState;

/// Wire the database pool, media store, mailer and services into a router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let pool = atelier_db::connect(&config)
        .await
        .context("Database setup failed")?;
    let store = atelier_storage::create_media_store(&config)
        .await
        .context("Media store setup failed")?;

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::from_config(smtp).context("SMTP setup failed")?),
        None => {
            tracing::warn!("SMTP not configured; outbound email is disabled");
            Arc::new(DisabledMailer)
        }
    };

    let limit = config.default_page_limit;
    let state = Arc::new(AppState {
        blogs: ContentService::new(
            Arc::new(PgContentRepository::<Blog>::new(pool.clone())),
            store.clone(),
            limit,
        ),
        podcasts: ContentService::new(
            Arc::new(PgContentRepository::<Podcast>::new(pool.clone())),
            store.clone(),
            limit,
        ),
        offerings: ContentService::new(
            Arc::new(PgContentRepository::<Offering>::new(pool.clone())),
            store.clone(),
            limit,
        ),
        contracts: ContractService::new(
            Arc::new(PgContractRepository::new(pool.clone())),
            mailer.clone(),
            limit,
        ),
        broadcasts: BroadcastService::new(
            Arc::new(PgSubscriberRepository::new(pool.clone())),
            Arc::new(PgBroadcastRepository::new(pool.clone())),
            mailer,
            config.broadcast_concurrency,
            limit,
        ),
        profiles: ProfileService::new(Arc::new(PgProfileRepository::new(pool.clone())), store),
        admin: AdminService::new(Arc::new(PgStatsRepository::new(pool))),
        config,
    });

    let router = router::build(state.clone());
    Ok((state, router))
}

/// Start serving with graceful shutdown on Ctrl+C / SIGTERM.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, environment = %config.environment, "Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        _ = terminate => tracing::info!("Received terminate signal"),
    }

    tracing::info!("Shutting down gracefully...");
}
