use crate::error::Result;
use crate::source::{
    collect_repositories, ActivityData, AllTime, CommitIndex, Repository, WakaStats, YearlyTimeline,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Activity exported from the code-hosting provider, stored as JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Repositories owned by the user
    #[serde(default)]
    pub repositories: Vec<Repository>,
    /// Repositories contributed to; entries may be null
    #[serde(default)]
    pub contributed: Vec<Option<Repository>>,
    #[serde(default)]
    pub commit_dates: CommitIndex,
    #[serde(default)]
    pub yearly: YearlyTimeline,
    #[serde(default)]
    pub wakatime: Option<WakaStats>,
    #[serde(default)]
    pub all_time: Option<AllTime>,
    #[serde(default)]
    pub profile_views: Option<u64>,
}

impl Snapshot {
    /// Read and validate a snapshot file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let snapshot = Self::parse(&contents)?;
        debug!(
            path = %path.display(),
            repositories = snapshot.repositories.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Parse and validate snapshot JSON
    pub fn parse(contents: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(contents)?;
        if let Some(ref stats) = snapshot.wakatime {
            stats.validate()?;
        }
        Ok(snapshot)
    }

    /// Flatten into the data the renderer consumes
    pub fn into_activity(self) -> ActivityData {
        ActivityData {
            repositories: collect_repositories(self.repositories, self.contributed),
            commit_index: self.commit_dates,
            yearly: self.yearly,
            wakatime: self.wakatime,
            all_time: self.all_time,
            profile_views: self.profile_views,
        }
    }
}
