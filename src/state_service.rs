use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::{Challenges, StoredSnapshot, Teams};

/// In-memory teams and challenges served by the api.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScrapeState {
    pub teams: Teams,
    pub challenges: Challenges,
    #[serde(skip)]
    pub last_updated: Option<NaiveDateTime>,
}
pub type SafeScrapeState = Arc<RwLock<ScrapeState>>;

impl ScrapeState {
    pub fn new() -> SafeScrapeState {
        Arc::new(RwLock::new(ScrapeState::default()))
    }

    pub fn from_stored(stored: StoredSnapshot) -> SafeScrapeState {
        let mut state = ScrapeState::default();
        state.load_from(stored);
        Arc::new(RwLock::new(state))
    }

    /// Swaps in the result of a full pass. Nothing from the previous pass survives.
    pub fn replace(&mut self, teams: Teams, challenges: Challenges, now: NaiveDateTime) {
        self.teams = teams;
        self.challenges = challenges;
        self.last_updated = Some(now);
        info!("[STATE] Replaced with {} teams, {} challenges", self.teams.len(), self.challenges.len());
    }

    pub fn load_from(&mut self, stored: StoredSnapshot) {
        self.teams = stored.teams;
        self.challenges = stored.challenges;
        self.last_updated = stored.last_updated;
    }

    /// Teams by descending `total_projects`; ties keep insertion order.
    pub fn leaderboard(&self) -> Teams {
        let mut ranked: Vec<_> = self.teams.iter()
            .map(|(name, team)| (name.clone(), team.clone()))
            .collect();
        ranked.sort_by(|a, b| b.1.total_projects.cmp(&a.1.total_projects));
        ranked.into_iter().collect()
    }
}
