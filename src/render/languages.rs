use crate::error::{RecapError, Result};
use crate::i18n::{translate_with, Translator};
use crate::render::graph::SymbolSet;
use crate::render::list::{make_list, CategoryRecord, DEFAULT_TOP_N};
use crate::render::percent_of;
use crate::source::Repository;

/// Repository count per primary language, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryLanguageCount {
    counts: Vec<(String, u64)>,
}

impl RepositoryLanguageCount {
    /// Count repositories by primary language, skipping those without one
    pub fn from_repositories(repositories: &[Repository]) -> Self {
        let mut counts: Vec<(String, u64)> = Vec::new();

        for language in repositories.iter().filter_map(Repository::language) {
            match counts.iter_mut().find(|(name, _)| name == language) {
                Some((_, count)) => *count += 1,
                None => counts.push((language.to_string(), 1)),
            }
        }

        Self { counts }
    }

    /// Repositories that have a primary language
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Language with the most repositories; the first one wins ties
    pub fn top_language(&self) -> Option<&str> {
        let mut top: Option<&(String, u64)> = None;
        for entry in &self.counts {
            if top.map_or(true, |(_, best)| entry.1 > *best) {
                top = Some(entry);
            }
        }
        top.map(|(name, _)| name.as_str())
    }

    pub fn counts(&self) -> &[(String, u64)] {
        &self.counts
    }
}

/// "I mostly code in ..." block ranking languages by repository share
pub fn make_language_per_repo_list(
    repositories: &[Repository],
    symbols: SymbolSet,
    translator: &dyn Translator,
) -> Result<String> {
    let languages = RepositoryLanguageCount::from_repositories(repositories);
    let top_language = languages.top_language().ok_or_else(|| {
        RecapError::EmptyInput("no repository has a primary language".to_string())
    })?;
    let total = languages.total();

    let records: Vec<CategoryRecord> = languages
        .counts()
        .iter()
        .map(|(name, count)| {
            let unit = if *count == 1 { "{} repo" } else { "{} repos" };
            CategoryRecord::new(
                name.clone(),
                translate_with(translator, unit, count),
                percent_of(*count, total),
            )
        })
        .collect();

    let title = translate_with(translator, "I mostly code in {}", top_language);
    let list = make_list(&records, DEFAULT_TOP_N, true, symbols)?;
    Ok(format!("**{}** \n\n```text\n{}\n```\n\n", title, list))
}
