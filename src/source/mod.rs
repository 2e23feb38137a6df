pub mod local;
pub mod snapshot;
pub mod wakatime;

use crate::error::Result;
use crate::render::list::CategoryRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Repository name -> branch name -> commit id -> `YYYY-MM-DDTHH:MM:SSZ`
pub type CommitIndex = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// Year -> quarter -> date -> line delta
pub type YearlyTimeline = BTreeMap<String, BTreeMap<String, BTreeMap<String, LineDelta>>>;

/// Timestamp format of every commit in a [`CommitIndex`]
pub const COMMIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A repository on the code-hosting provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub primary_language: Option<PrimaryLanguage>,
    #[serde(default)]
    pub is_fork: bool,
}

impl Repository {
    pub fn new(name: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            name: name.into(),
            primary_language: language.map(|name| PrimaryLanguage {
                name: name.to_string(),
            }),
            is_fork: false,
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.primary_language.as_ref().map(|l| l.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryLanguage {
    pub name: String,
}

/// Lines added and deleted on one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineDelta {
    #[serde(default)]
    pub add: u64,
    #[serde(default)]
    pub del: u64,
}

/// Coding-time breakdown for a time range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WakaStats {
    /// IANA zone the user configured on WakaTime
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub languages: Vec<CategoryRecord>,
    #[serde(default)]
    pub editors: Vec<CategoryRecord>,
    #[serde(default)]
    pub operating_systems: Vec<CategoryRecord>,
}

impl WakaStats {
    /// Check every category record
    pub fn validate(&self) -> Result<()> {
        self.languages
            .iter()
            .chain(&self.editors)
            .chain(&self.operating_systems)
            .try_for_each(CategoryRecord::validate)
    }
}

/// All-time coding total, already human-formatted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllTime {
    pub text: String,
}

/// Everything the renderer needs for one run
#[derive(Debug, Clone, Default)]
pub struct ActivityData {
    pub repositories: Vec<Repository>,
    pub commit_index: CommitIndex,
    pub yearly: YearlyTimeline,
    pub wakatime: Option<WakaStats>,
    pub all_time: Option<AllTime>,
    pub profile_views: Option<u64>,
}

impl ActivityData {
    /// Sum of added lines across the whole timeline
    pub fn total_lines_added(&self) -> u64 {
        self.yearly
            .values()
            .flat_map(|quarters| quarters.values())
            .flat_map(|days| days.values())
            .map(|delta| delta.add)
            .sum()
    }

    /// Fold a locally scanned commit index in; local branches win on conflict
    pub fn merge_local(&mut self, repositories: Vec<Repository>, index: CommitIndex) {
        let mut known: HashSet<String> = self.repositories.iter().map(|r| r.name.clone()).collect();
        for repo in repositories {
            if known.insert(repo.name.clone()) {
                self.repositories.push(repo);
            }
        }
        for (repo, branches) in index {
            self.commit_index.entry(repo).or_default().extend(branches);
        }
    }
}

/// Owned repositories followed by contributed ones that are present, not
/// forks and not already listed.
pub fn collect_repositories(
    owned: Vec<Repository>,
    contributed: Vec<Option<Repository>>,
) -> Vec<Repository> {
    let mut names: HashSet<String> = owned.iter().map(|r| r.name.clone()).collect();
    let mut repositories = owned;

    for repo in contributed.into_iter().flatten() {
        if repo.is_fork || !names.insert(repo.name.clone()) {
            continue;
        }
        repositories.push(repo);
    }

    repositories
}
