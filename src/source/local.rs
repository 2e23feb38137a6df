use crate::error::Result;
use crate::source::{CommitIndex, Repository, COMMIT_TIMESTAMP_FORMAT};
use chrono::{TimeZone, Utc};
use git2::{BranchType, Oid, Repository as Git2Repository};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Builds a commit index from git repositories on disk
pub struct LocalScanner {
    /// Patterns to exclude from scanning
    exclude_patterns: Vec<String>,
    /// Maximum directory depth (None = unlimited)
    max_depth: Option<u32>,
    /// Only commits whose author email contains this (case-insensitive)
    author_email: Option<String>,
}

impl LocalScanner {
    /// Create a new scanner
    pub fn new(exclude_patterns: Vec<String>, max_depth: Option<u32>, author_email: Option<String>) -> Self {
        Self {
            exclude_patterns,
            max_depth,
            author_email,
        }
    }

    /// Scan `path` and index the commits of every repository found
    pub fn collect(&self, path: &Path) -> Result<(Vec<Repository>, CommitIndex)> {
        let mut repositories = Vec::new();
        let mut index = CommitIndex::new();

        for repo_path in self.scan(path)? {
            let name = Self::get_repo_name(&repo_path);
            let branches = self.index_branches(&repo_path)?;
            debug!(repository = %name, branches = branches.len(), "Indexed local repository");

            repositories.push(Repository::new(name.clone(), None));
            index.entry(name).or_default().extend(branches);
        }

        Ok((repositories, index))
    }

    /// Scan a directory for git repositories
    pub fn scan(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut repos = Vec::new();
        self.scan_recursive(path, 0, &mut repos)?;
        Ok(repos)
    }

    fn scan_recursive(&self, path: &Path, depth: u32, repos: &mut Vec<PathBuf>) -> Result<()> {
        if let Some(max_depth) = self.max_depth {
            if depth >= max_depth {
                return Ok(());
            }
        }

        if Self::is_git_repository(path) {
            repos.push(path.to_path_buf());
        }

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable directory");
                return Ok(());
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let dir_name = match path.file_name() {
                Some(name) => name.to_string_lossy().to_string(),
                None => continue,
            };

            if dir_name.starts_with('.') || self.should_exclude(&dir_name) {
                continue;
            }

            self.scan_recursive(&path, depth + 1, repos)?;
        }

        Ok(())
    }

    fn is_git_repository(path: &Path) -> bool {
        path.join(".git").exists() && Git2Repository::open(path).is_ok()
    }

    fn should_exclude(&self, name: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| name == pattern || name.contains(pattern.as_str()))
    }

    /// Get repository name from path
    pub fn get_repo_name(path: &Path) -> String {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }

    /// Branch name -> commit id -> timestamp, for every local branch
    fn index_branches(&self, repo_path: &Path) -> Result<BTreeMap<String, BTreeMap<String, String>>> {
        let repo = Git2Repository::open(repo_path)?;
        let mut branches = BTreeMap::new();

        for branch in repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            let Some(name) = branch.name()?.map(String::from) else {
                continue;
            };
            let Some(tip) = branch.get().target() else {
                continue;
            };

            let commits = self.index_commits(&repo, tip)?;
            if !commits.is_empty() {
                branches.insert(name, commits);
            }
        }

        Ok(branches)
    }

    fn index_commits(&self, repo: &Git2Repository, tip: Oid) -> Result<BTreeMap<String, String>> {
        let mut revwalk = repo.revwalk()?;
        revwalk.push(tip)?;

        let filter = self.author_email.as_ref().map(|email| email.to_lowercase());
        let mut commits = BTreeMap::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = repo.find_commit(oid)?;

            if let Some(ref filter) = filter {
                let email = commit.author().email().unwrap_or("").to_lowercase();
                if !email.contains(filter.as_str()) {
                    continue;
                }
            }

            let Some(timestamp) = Utc.timestamp_opt(commit.time().seconds(), 0).single() else {
                continue;
            };
            commits.insert(
                oid.to_string(),
                timestamp.format(COMMIT_TIMESTAMP_FORMAT).to_string(),
            );
        }

        Ok(commits)
    }
}
