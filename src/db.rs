use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::models::{Challenges, Snapshot, StoredSnapshot, Teams};

/// Single-file JSON store for the scraped snapshot.
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    pub fn new<P: AsRef<Path>>(path: P) -> Db {
        Db { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the file in place.
    pub fn save(&self, teams: &Teams, challenges: &Challenges) -> anyhow::Result<()> {
        let before = Instant::now();
        let snapshot = Snapshot { teams, challenges, last_updated: Local::now().naive_local() };
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("Could not write {}", self.path.display()))?;

        debug!("[DB] Wrote {} teams to {} {:.2?}", teams.len(), self.path.display(), before.elapsed());
        Ok(())
    }

    /// `None` when no file has been written yet.
    pub fn load(&self) -> anyhow::Result<Option<StoredSnapshot>> {
        if !self.path.exists() {
            info!("[DB] No snapshot at {}", self.path.display());
            return Ok(None);
        }
        let before = Instant::now();
        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read {}", self.path.display()))?;
        let snapshot: StoredSnapshot = serde_json::from_str(&data)
            .with_context(|| format!("Could not parse JSON at {}", self.path.display()))?;

        info!("[DB] Read {} teams, {} challenges from {} {:.2?}",
            snapshot.teams.len(), snapshot.challenges.len(), self.path.display(), before.elapsed());
        Ok(Some(snapshot))
    }
}
