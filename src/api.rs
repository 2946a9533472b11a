use std::net::{SocketAddr, TcpListener};

use axum::{Router, extract::State, routing::get, Json};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::models::Teams;
use crate::refresh_service::{RefreshStatus, RefreshTrigger, SafeRefreshService};
use crate::state_service::{SafeScrapeState, ScrapeState};

#[derive(Clone)]
pub struct ApiState {
    pub state: SafeScrapeState,
    pub refresh_service: SafeRefreshService,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RefreshAck {
    pub status: String,
    pub message: String,
}

pub struct Api;
impl Api {
    pub fn router(state: ApiState, static_dir: &str) -> Router {
        Router::new()
            .route("/api/teams", get(Api::get_teams))
            .route("/api/refresh", get(Api::refresh))
            .route("/api/refresh/status", get(Api::get_refresh_status))
            .route("/api/leaderboard", get(Api::get_leaderboard))
            .fallback_service(ServeDir::new(static_dir))
            .with_state(state)
            .layer(ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::very_permissive())
            )
    }

    pub async fn serve(port: u16, state: ApiState, static_dir: &str, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port)))?;
        Api::serve_on(listener, Api::router(state, static_dir), shutdown).await
    }

    pub async fn serve_on(listener: TcpListener, app: Router, shutdown: CancellationToken) -> anyhow::Result<()> {
        info!("[API] Listening on {}", listener.local_addr()?);
        axum::Server::from_tcp(listener)?
            .serve(app.into_make_service())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;
        info!("[API] Stopped");
        Ok(())
    }

    async fn get_teams(State(api): State<ApiState>) -> Json<ScrapeState> {
        Json(api.state.read().await.clone())
    }

    async fn refresh(State(api): State<ApiState>) -> Json<RefreshAck> {
        let ack = match api.refresh_service.trigger().await {
            RefreshTrigger::Started => RefreshAck {
                status: "success".to_string(),
                message: "Scraping started in background.".to_string(),
            },
            RefreshTrigger::AlreadyRunning => RefreshAck {
                status: "running".to_string(),
                message: "Scraping already in progress.".to_string(),
            },
        };
        Json(ack)
    }

    async fn get_refresh_status(State(api): State<ApiState>) -> Json<RefreshStatus> {
        Json(api.refresh_service.status())
    }

    async fn get_leaderboard(State(api): State<ApiState>) -> Json<Teams> {
        Json(api.state.read().await.leaderboard())
    }
}
