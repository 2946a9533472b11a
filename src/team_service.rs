use indexmap::IndexSet;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use crate::challenge_service::{selector, stripped_text};
use crate::models::TeamEntry;
use crate::rest_client::RestClient;
use crate::team_filter::TeamNameFilter;

const TEAM_LIST: &str = "div[class]";
const TEAM_LIST_CLASSES: &str = "list-group col-md-4 col-md-offset-4 text-center";
const TEAM_ITEM: &str = "a.list-group-item";

pub struct TeamService;

impl TeamService {
    pub async fn fetch(
        client: &RestClient,
        challenge_id: &str,
        challenge_name: &str,
        filter: &dyn TeamNameFilter,
    ) -> Vec<TeamEntry> {
        let url = client.challenge_url(challenge_id);
        let Some(html) = client.get_page(&url).await else {
            warn!("[TEAMS] No teams for challenge {challenge_id}, fetch failed");
            return vec![];
        };
        let teams = parse_teams(&html, challenge_id, challenge_name, filter);
        debug!("[TEAMS] Challenge {challenge_id} {challenge_name}: {} teams", teams.len());
        teams
    }
}

/// Team names listed on one challenge page, each name once.
pub fn parse_teams(
    html: &str,
    challenge_id: &str,
    challenge_name: &str,
    filter: &dyn TeamNameFilter,
) -> Vec<TeamEntry> {
    let (Some(container_sel), Some(item_sel)) = (selector(TEAM_LIST), selector(TEAM_ITEM)) else {
        return vec![];
    };
    let document = Html::parse_document(html);
    let Some(container) = document.select(&container_sel).find(|div| is_team_list(div)) else {
        return vec![];
    };

    let names: IndexSet<String> = container.select(&item_sel)
        .map(|item| stripped_text(&item))
        .filter(|name| filter.is_valid(name))
        .collect();

    names.into_iter()
        .map(|name| TeamEntry {
            name,
            challenge_id: challenge_id.to_string(),
            challenge_name: challenge_name.to_string(),
        })
        .collect()
}

/// The class attribute, whitespace-normalized, is exactly the team list classes.
fn is_team_list(element: &ElementRef) -> bool {
    element.value().attr("class")
        .map(|class| class.split_whitespace().collect::<Vec<_>>().join(" ") == TEAM_LIST_CLASSES)
        .unwrap_or(false)
}
