use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default="default_port")]
    pub port: u16,

    #[serde(default="default_base_url")]
    pub base_url: String,

    #[serde(default="default_data_path")]
    pub data_path: String,

    #[serde(default="default_static_dir")]
    pub static_dir: String,

    #[serde(default="default_timeout_s")]
    pub timeout_s: u64,

    #[serde(default="default_user_agent")]
    pub user_agent: String,

    #[serde(default="default_true")]
    pub refresh_on_start: bool,

    #[serde(default)]
    pub refresh_interval_s: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: default_port(),
            base_url: default_base_url(),
            data_path: default_data_path(),
            static_dir: default_static_dir(),
            timeout_s: default_timeout_s(),
            user_agent: default_user_agent(),
            refresh_on_start: default_true(),
            refresh_interval_s: None,
        }
    }
}

fn default_port() -> u16 {
    5000
}

fn default_base_url() -> String {
    "https://www.nuitdelinfo.com".to_string()
}

fn default_data_path() -> String {
    "teams_data.json".to_string()
}

fn default_static_dir() -> String {
    ".".to_string()
}

fn default_timeout_s() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}

/// Reads the config file at `CONFIG_PATH` (or `./deployment/config.json`),
/// falling back to defaults when it is absent, then applies env overrides.
pub fn get_config() -> anyhow::Result<Config> {
    config_from_env(|key| std::env::var(key).ok())
}

/// `get_config` with the environment supplied by `var`.
pub fn config_from_env<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let path = var("CONFIG_PATH")
        .unwrap_or_else(|| "./deployment/config.json".to_string());
    let mut result = read_config(&path)?;

    if let Some(port) = var("PORT") {
        result.port = port.parse()
            .with_context(|| format!("PORT is not a valid port: {port}"))?;
    }
    if let Some(data_path) = var("DATA_PATH") {
        result.data_path = data_path;
    }
    if let Some(base_url) = var("BASE_URL") {
        result.base_url = base_url;
    }
    Ok(result)
}

pub fn read_config(path: &str) -> anyhow::Result<Config> {
    if !Path::new(path).exists() {
        return Ok(Config::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("Unable to read config at {path}"))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Could not parse JSON at {path}!"))
}
