use std::sync::Arc;
use std::time::Duration;

use nuit_info_scraper::api::{Api, ApiState};
use nuit_info_scraper::config_handler;
use nuit_info_scraper::db::Db;
use nuit_info_scraper::refresh_service::RefreshService;
use nuit_info_scraper::scrape_service::Scraper;
use nuit_info_scraper::state_service::ScrapeState;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure a custom event formatter
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config_handler::get_config()?;
    info!("[CONFIG] {:?}", config);

    let state = match Db::new(&config.data_path).load()? {
        Some(stored) => ScrapeState::from_stored(stored),
        None => ScrapeState::new(),
    };

    let shutdown = CancellationToken::new();
    let scraper = Arc::new(Scraper::new(&config, state.clone())?);
    let refresh_service = RefreshService::new(scraper, shutdown.clone());

    if config.refresh_on_start {
        refresh_service.trigger().await;
    }
    if let Some(interval) = config.refresh_interval_s {
        refresh_service.spawn_periodic(Duration::from_secs(interval));
    }

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("[MAIN] Shutting down");
                shutdown.cancel();
            }
        });
    }

    let api_state = ApiState { state, refresh_service };
    Api::serve(config.port, api_state, &config.static_dir, shutdown).await
}
