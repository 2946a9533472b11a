use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::StatusCode;
use tracing::{error, info};

use crate::config_handler::Config;
use crate::LogResult;

/// Shared HTTP client for the event site. Clones share one connection pool.
#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &Config) -> anyhow::Result<RestClient> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_s))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Could not build http client")?;
        Ok(RestClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn challenges_url(&self) -> String {
        format!("{}/inscription/defis/liste", self.base_url)
    }

    pub fn challenge_url(&self, challenge_id: &str) -> String {
        format!("{}/inscription/defis/{challenge_id}", self.base_url)
    }

    /// GET `url` and return the body. Anything but a 200 is `None`.
    pub async fn get_page(&self, url: &str) -> Option<String> {
        let before = Instant::now();
        let rsp = self.client.get(url).send().await
            .ok_log(&format!("[REST] Call failed {url}"))?;

        if rsp.status() != StatusCode::OK {
            error!("[REST] Call {url} returned HTTP {} {:.2?}", rsp.status(), before.elapsed());
            return None;
        }
        let body = rsp.text().await.ok_log(&format!("[REST] Read failed {url}"))?;
        info!("[REST] Call {url} {} bytes {:.2?}", body.len(), before.elapsed());
        Some(body)
    }
}
