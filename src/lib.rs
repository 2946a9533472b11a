use std::fmt::Display;

use tracing::error;

pub mod config_handler;
pub mod rest_client;
pub mod models;
pub mod db;
pub mod team_filter;
pub mod challenge_service;
pub mod team_service;
pub mod aggregate;
pub mod state_service;
pub mod scrape_service;
pub mod refresh_service;
pub mod api;

pub trait LogResult<T, E: Display> {
    fn ok_log(self, msg: &str) -> Option<T>;
}

impl<T, E: Display> LogResult<T, E> for Result<T, E> {
    fn ok_log(self, msg: &str) -> Option<T> {
        match self {
            Ok(o) => Some(o),
            Err(e) => {
                error!("{}: {}", msg, e);
                None
            }
        }
    }
}
