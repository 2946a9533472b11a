use chrono::NaiveDateTime;

use crate::models::{Project, Team, TeamEntry, Teams};

/// Folds team entries from every challenge page into one mapping per team.
#[derive(Default)]
pub struct TeamAggregator {
    teams: Teams,
}

impl TeamAggregator {
    pub fn new() -> TeamAggregator {
        TeamAggregator::default()
    }

    /// `now` stamps teams seen for the first time.
    pub fn add(&mut self, entry: TeamEntry, now: NaiveDateTime) {
        let team = self.teams
            .entry(entry.name)
            .or_insert_with(|| Team::new(now));

        if !team.has_challenge(&entry.challenge_id) {
            team.projects.push(Project {
                name: entry.challenge_name,
                challenge_id: entry.challenge_id,
                completed: false,
            });
        }
    }

    pub fn extend<I: IntoIterator<Item = TeamEntry>>(&mut self, entries: I, now: NaiveDateTime) {
        for entry in entries {
            self.add(entry, now);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn finish(mut self) -> Teams {
        for team in self.teams.values_mut() {
            team.total_projects = team.projects.len();
            team.progress = 0.0;
        }
        self.teams
    }
}
