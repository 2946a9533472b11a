use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tracing::info;

use crate::aggregate::TeamAggregator;
use crate::challenge_service::ChallengeService;
use crate::config_handler::Config;
use crate::db::Db;
use crate::models::{Challenge, Challenges, TeamEntry, Teams};
use crate::rest_client::RestClient;
use crate::state_service::SafeScrapeState;
use crate::team_filter::{HeuristicTeamFilter, TeamNameFilter};
use crate::team_service::TeamService;

pub struct Scraper {
    client: RestClient,
    filter: Arc<dyn TeamNameFilter>,
    state: SafeScrapeState,
    db: Db,
}

impl Scraper {
    pub fn new(config: &Config, state: SafeScrapeState) -> anyhow::Result<Scraper> {
        Ok(Scraper {
            client: RestClient::new(config)?,
            filter: Arc::new(HeuristicTeamFilter),
            state,
            db: Db::new(&config.data_path),
        })
    }

    /// Replaces the team name heuristic used on every challenge page.
    pub fn with_filter(mut self, filter: Arc<dyn TeamNameFilter>) -> Scraper {
        self.filter = filter;
        self
    }

    pub async fn fetch_challenges_list(&self) -> Vec<Challenge> {
        ChallengeService::fetch(&self.client).await
    }

    pub async fn fetch_teams_for_challenge(&self, challenge_id: &str, challenge_name: &str) -> Vec<TeamEntry> {
        TeamService::fetch(&self.client, challenge_id, challenge_name, self.filter.as_ref()).await
    }

    /// One full aggregation pass. The shared state is replaced as a whole once
    /// every challenge has been fetched, then written to disk. An error means
    /// the write failed; the state is replaced regardless.
    pub async fn fetch_all_data(&self) -> anyhow::Result<Teams> {
        let before = Instant::now();
        info!("[SCRAPE] Fetching all data...");

        let challenges = self.fetch_challenges_list().await;
        let mut aggregator = TeamAggregator::new();
        for challenge in &challenges {
            let entries = self.fetch_teams_for_challenge(&challenge.id, &challenge.name).await;
            aggregator.extend(entries, Local::now().naive_local());
        }
        let teams = aggregator.finish();
        let challenges: Challenges = challenges.into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let mut state = self.state.write().await;
        state.replace(teams.clone(), challenges, Local::now().naive_local());
        let saved = self.db.save(&state.teams, &state.challenges);
        drop(state);

        info!("[SCRAPE] Completed fetching. Total teams: {} {:.2?}", teams.len(), before.elapsed());
        saved.map(|_| teams)
    }
}
