/// Words that show up in links around the team list but never in team names.
const JUNK_KEYWORDS: [&str; 12] = [
    "document", "discord", "conditions", "inscription",
    "voir", "détails", "plus", "page", "défi", "challenge", "supprimer", "modifier",
];

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 50;

/// Decides whether a link text looks like a team name rather than page chrome.
pub trait TeamNameFilter: Send + Sync {
    fn is_valid(&self, name: &str) -> bool;
}

impl<F> TeamNameFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid(&self, name: &str) -> bool {
        self(name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTeamFilter;

impl TeamNameFilter for HeuristicTeamFilter {
    fn is_valid(&self, name: &str) -> bool {
        is_valid_team_name(name)
    }
}

pub fn is_valid_team_name(name: &str) -> bool {
    let len = name.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return false;
    }
    let name_lower = name.to_lowercase();
    if JUNK_KEYWORDS.iter().any(|word| name_lower.contains(word)) {
        return false;
    }
    name.chars().next().map(char::is_uppercase).unwrap_or(false)
}
