use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type TeamName = String;
pub type ChallengeId = String;

/// Teams keyed by display name, in order of first sighting.
pub type Teams = IndexMap<TeamName, Team>;
pub type Challenges = IndexMap<ChallengeId, Challenge>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: ChallengeId,
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub projects: Vec<Project>,
    pub total_projects: usize,
    pub completed_projects: usize,
    pub progress: f64,
    pub last_updated: NaiveDateTime,
}

impl Team {
    pub fn new(now: NaiveDateTime) -> Team {
        Team {
            projects: vec![],
            total_projects: 0,
            completed_projects: 0,
            progress: 0.0,
            last_updated: now,
        }
    }

    pub fn has_challenge(&self, challenge_id: &str) -> bool {
        self.projects.iter().any(|p| p.challenge_id == challenge_id)
    }
}

/// A team's registration to one challenge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub challenge_id: ChallengeId,
    pub completed: bool,
}

/// One team name found on a challenge page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub name: TeamName,
    pub challenge_id: ChallengeId,
    pub challenge_name: String,
}

/// Persisted snapshot as written to disk.
#[derive(Serialize, Debug)]
pub struct Snapshot<'a> {
    pub teams: &'a Teams,
    pub challenges: &'a Challenges,
    pub last_updated: NaiveDateTime,
}

/// Persisted snapshot as read back. Missing keys default to empty.
#[derive(Deserialize, Debug, Default)]
pub struct StoredSnapshot {
    #[serde(default)]
    pub teams: Teams,
    #[serde(default)]
    pub challenges: Challenges,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
}
