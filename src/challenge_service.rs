use std::time::Instant;

use indexmap::IndexMap;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info};

use crate::models::{Challenge, ChallengeId};
use crate::rest_client::RestClient;
use crate::LogResult;

const CHALLENGE_PATH: &str = "/inscription/defis/";

/// Link texts that point to a challenge but are not its name.
const UI_LABELS: [&str; 4] = ["", "Voir", "Détails", "Voir plus"];

pub struct ChallengeService;

impl ChallengeService {
    pub async fn fetch(client: &RestClient) -> Vec<Challenge> {
        let before = Instant::now();
        let url = client.challenges_url();
        let Some(html) = client.get_page(&url).await else {
            error!("[CHALLENGES] Error fetching challenges from {url}");
            return vec![];
        };
        let challenges = parse_challenges(&html, client.base_url());
        info!("[CHALLENGES] Found {} challenges {:.2?}", challenges.len(), before.elapsed());
        challenges
    }
}

pub fn parse_challenges(html: &str, base_url: &str) -> Vec<Challenge> {
    let Some(anchors) = selector("a[href]") else {
        return vec![];
    };
    let base = Url::parse(base_url).ok_log("[CHALLENGES] Invalid base url");
    let document = Html::parse_document(html);

    let mut unique = IndexMap::<ChallengeId, Challenge>::new();
    for a in document.select(&anchors) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let Some(challenge_id) = challenge_id(href) else {
            continue;
        };
        let name = stripped_text(&a);
        if UI_LABELS.contains(&name.as_str()) {
            continue;
        }
        let url = base.as_ref()
            .and_then(|base| base.join(href).ok())
            .map(|url| url.to_string())
            .unwrap_or_else(|| href.to_string());
        let id = challenge_id.to_string();
        unique.insert(id.clone(), Challenge { id, name, url });
    }
    unique.into_values().collect()
}

/// Trailing numeric path segment of a challenge link.
fn challenge_id(href: &str) -> Option<&str> {
    if !href.contains(CHALLENGE_PATH) {
        return None;
    }
    let last = href.rsplit('/').next()?;
    // ASCII 0-9 only: Arabic-Indic or fullwidth digits are not ids
    if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) {
        Some(last)
    } else {
        None
    }
}

/// Every text fragment trimmed, empty ones dropped, the rest glued together.
pub(crate) fn stripped_text(element: &ElementRef) -> String {
    element.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css)
        .map_err(|e| format!("{css} {e:?}"))
        .ok_log("[HTML] Invalid selector")
}
