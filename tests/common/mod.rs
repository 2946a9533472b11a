#![allow(dead_code)]

pub mod external_server;
pub mod scraper_server;

use nuit_info_scraper::config_handler::Config;
use tempdir::TempDir;

pub fn test_config(temp_dir: &TempDir, base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        data_path: data_path(temp_dir),
        static_dir: temp_dir.path().to_str().unwrap().to_string(),
        timeout_s: 5,
        refresh_on_start: false,
        ..Default::default()
    }
}

pub fn data_path(temp_dir: &TempDir) -> String {
    temp_dir.path().join("teams_data.json").to_str().unwrap().to_string()
}
