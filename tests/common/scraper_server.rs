use std::process::{Child, Command};

use assert_cmd::prelude::CommandCargoExt;
use nuit_info_scraper::config_handler::Config;
use predicates::{function::FnPredicate, Predicate};
use serde_json::Value;

/// The real binary, started as a child process with its own config file.
pub struct ScraperServer {
    port: u16,
    child_process: Option<Child>,
}

impl Drop for ScraperServer {
    fn drop(&mut self) {
        if let Some(child) = self.child_process.as_mut() {
            child.kill().expect("Should kill");
        }
    }
}

impl ScraperServer {
    pub fn new(port: u16) -> ScraperServer {
        ScraperServer { port, child_process: None }
    }

    pub fn write_config(path: &str, config: &Config) -> String {
        let config_path = format!("{path}/config.json");
        std::fs::write(&config_path, serde_json::to_string(config).unwrap()).unwrap();
        config_path
    }

    pub fn start(&mut self, path: &str, config: Config) {
        let config = Config { port: self.port, ..config };
        let config_path = ScraperServer::write_config(path, &config);
        self.start_with_env(&config_path, &[]);
    }

    /// Starts the binary with `CONFIG_PATH` plus the given overrides; unset overrides are removed.
    pub fn start_with_env(&mut self, config_path: &str, env: &[(&str, &str)]) {
        let mut command = Command::cargo_bin("nuit-info-scraper").unwrap();
        command.env("CONFIG_PATH", config_path);
        for key in ["PORT", "DATA_PATH", "BASE_URL"] {
            match env.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => command.env(key, value),
                None => command.env_remove(key),
            };
        }
        self.child_process = Some(command.spawn().expect("should start"));
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response, Box<dyn std::error::Error>> {
        Ok(reqwest::get(format!("http://localhost:{}{path}", self.port)).await?)
    }

    pub async fn get_teams(&self) -> Result<Value, Box<dyn std::error::Error>> {
        Ok(self.get("/api/teams").await?.json().await?)
    }

    pub async fn get_leaderboard(&self) -> Result<Value, Box<dyn std::error::Error>> {
        Ok(self.get("/api/leaderboard").await?.json().await?)
    }

    pub async fn retry_until_teams<F>(&self, predicate: FnPredicate<F, Value>, retry_ms: u64) -> Value
    where
        F: Fn(&Value) -> bool,
    {
        let mut nr_loops = 0;
        loop {
            if let Ok(teams) = self.get_teams().await {
                if predicate.eval(&teams) {
                    return teams;
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(retry_ms)).await;
            nr_loops += 1;
            if nr_loops > 100 {
                panic!("retry failed");
            }
        }
    }
}

pub fn team_names(teams: &Value) -> Vec<String> {
    teams["teams"].as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

