use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tokio::select;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::scrape_service::Scraper;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RefreshStatus {
    Idle,
    Running { started: NaiveDateTime },
    Completed { finished: NaiveDateTime, total_teams: usize },
    Failed { finished: NaiveDateTime, error: String },
    Cancelled { finished: NaiveDateTime },
}

impl RefreshStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, RefreshStatus::Running { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Started,
    AlreadyRunning,
}

struct RunningRefresh {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs aggregation passes in the background, one at a time.
pub struct RefreshService {
    scraper: Arc<Scraper>,
    shutdown: CancellationToken,
    status: Arc<watch::Sender<RefreshStatus>>,
    running: Mutex<Option<RunningRefresh>>,
}
pub type SafeRefreshService = Arc<RefreshService>;

impl RefreshService {
    pub fn new(scraper: Arc<Scraper>, shutdown: CancellationToken) -> SafeRefreshService {
        let (status, _) = watch::channel(RefreshStatus::Idle);
        Arc::new(RefreshService {
            scraper,
            shutdown,
            status: Arc::new(status),
            running: Mutex::new(None),
        })
    }

    /// Starts a pass unless one is still running. Returns without waiting for it.
    pub async fn trigger(&self) -> RefreshTrigger {
        let mut running = self.running.lock().await;
        if running.as_ref().map(|r| !r.handle.is_finished()).unwrap_or(false) {
            info!("[REFRESH] Already running, skipping");
            return RefreshTrigger::AlreadyRunning;
        }

        let cancel = self.shutdown.child_token();
        self.status.send_replace(RefreshStatus::Running { started: Local::now().naive_local() });
        let handle = tokio::spawn(RefreshService::run(self.scraper.clone(), cancel.clone(), self.status.clone()));
        *running = Some(RunningRefresh { cancel, handle });
        info!("[REFRESH] Started");
        RefreshTrigger::Started
    }

    /// Cancels the running pass, if any. The state it would have replaced is kept.
    pub async fn cancel(&self) {
        if let Some(running) = self.running.lock().await.as_ref() {
            running.cancel.cancel();
        }
    }

    pub fn status(&self) -> RefreshStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RefreshStatus> {
        self.status.subscribe()
    }

    /// Resolves once no pass is running and returns how the last one ended.
    pub async fn wait_idle(&self) -> RefreshStatus {
        let mut receiver = self.status.subscribe();
        loop {
            let current = receiver.borrow_and_update().clone();
            if !current.is_running() || receiver.changed().await.is_err() {
                return current;
            }
        }
    }

    /// Triggers a pass every `interval` until shutdown. The first pass is one interval away.
    /// A zero interval starts nothing.
    pub fn spawn_periodic(self: &Arc<Self>, interval: Duration) -> Option<JoinHandle<()>> {
        if interval.is_zero() {
            warn!("[REFRESH] Periodic refresh interval is zero, not scheduling");
            return None;
        }
        let service = self.clone();
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                select! {
                    _ = service.shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        service.trigger().await;
                    }
                }
            }
            info!("[REFRESH] Periodic refresh stopped");
        }))
    }

    async fn run(scraper: Arc<Scraper>, cancel: CancellationToken, status: Arc<watch::Sender<RefreshStatus>>) {
        let outcome = select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("[REFRESH] Cancelled");
                RefreshStatus::Cancelled { finished: Local::now().naive_local() }
            }
            result = scraper.fetch_all_data() => {
                match result {
                    Ok(teams) => RefreshStatus::Completed {
                        finished: Local::now().naive_local(),
                        total_teams: teams.len(),
                    },
                    Err(e) => {
                        error!("[REFRESH] Failed: {e:#}");
                        RefreshStatus::Failed { finished: Local::now().naive_local(), error: format!("{e:#}") }
                    }
                }
            }
        };
        status.send_replace(outcome);
    }
}
