use crate::chart::{ChartRenderer, StaticChart};
use crate::config::Config;
use crate::error::Result;
use crate::i18n::{translate_with, Catalog, Identity, Translator};
use crate::render::badges::{badge, intword};
use crate::render::commits::{
    make_commit_day_time_list, render_day_times, render_week_days, TimeBucketHistogram,
};
use crate::render::graph::SymbolSet;
use crate::render::languages::{make_language_per_repo_list, RepositoryLanguageCount};
use crate::render::list::{make_list, CategoryRecord, DEFAULT_TOP_N};
use crate::source::local::LocalScanner;
use crate::source::snapshot::Snapshot;
use crate::source::wakatime::WakaTimeClient;
use crate::source::{ActivityData, WakaStats};
use tracing::{debug, info, warn};

const FALLBACK_TIME_ZONE: &str = "UTC";

/// Orchestrator for collecting activity and assembling the README section
pub struct Orchestrator {
    config: Config,
    symbols: SymbolSet,
    translator: Box<dyn Translator>,
    wakatime: Option<WakaTimeClient>,
    chart: Option<Box<dyn ChartRenderer>>,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(config: Config) -> Result<Self> {
        let symbols = config.symbols()?;

        let translator: Box<dyn Translator> = match config.locale_path {
            Some(ref path) => {
                let catalog = Catalog::load_from(path)?;
                debug!(path = %path.display(), entries = catalog.entry_count(), "Locale loaded");
                Box::new(catalog)
            }
            None => Box::new(Identity),
        };

        let wakatime = match config.get_wakatime_api_key() {
            Some(key) => Some(
                WakaTimeClient::new(key)?
                    .with_base_url(config.wakatime_url.clone())
                    .with_time_range(config.wakatime_time_range.clone()),
            ),
            None => None,
        };

        let chart = config
            .chart_url
            .as_ref()
            .map(|url| Box::new(StaticChart::new(url.clone())) as Box<dyn ChartRenderer>);

        Ok(Self {
            config,
            symbols,
            translator,
            wakatime,
            chart,
        })
    }

    /// Never call the WakaTime API, even when a key is configured
    pub fn without_wakatime(mut self) -> Self {
        self.wakatime = None;
        self
    }

    /// Gather snapshot, WakaTime and local git data
    pub async fn collect(&self) -> Result<ActivityData> {
        let mut data = match self.config.snapshot_path {
            Some(ref path) => Snapshot::load_from(path)?.into_activity(),
            None => ActivityData::default(),
        };
        info!(repositories = data.repositories.len(), "Repository list collected");

        if let Some(ref client) = self.wakatime {
            let (stats, all_time) = tokio::try_join!(client.fetch_stats(), client.fetch_all_time())?;
            info!("WakaTime stats collected");
            data.wakatime = Some(stats);
            data.all_time = Some(all_time);
        }

        if let Some(ref local) = self.config.local {
            let scanner = LocalScanner::new(
                local.exclude_patterns.clone(),
                local.max_depth,
                local.author_email.clone(),
            );
            let (repositories, index) = scanner.collect(&local.path)?;
            info!(repositories = repositories.len(), "Local commit dates collected");
            data.merge_local(repositories, index);
        }

        Ok(data)
    }

    /// Zone for commit bucketing: config, then WakaTime, then UTC
    pub fn time_zone(&self, data: &ActivityData) -> String {
        self.config
            .time_zone
            .clone()
            .or_else(|| data.wakatime.as_ref().and_then(|w| w.timezone.clone()))
            .unwrap_or_else(|| FALLBACK_TIME_ZONE.to_string())
    }

    fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    /// Day-time and weekday blocks that are enabled
    pub fn render_commit_times(&self, data: &ActivityData) -> Result<String> {
        let time_zone = self.time_zone(data);
        if self.config.show_commit && self.config.show_days_of_week {
            return make_commit_day_time_list(
                &time_zone,
                &data.repositories,
                &data.commit_index,
                self.symbols,
                self.translator.as_ref(),
            );
        }

        let histogram =
            TimeBucketHistogram::from_commit_index(&time_zone, &data.repositories, &data.commit_index)?;
        debug!(time_zone = %time_zone, commits = histogram.total(), "Commit times bucketed");

        let mut stats = String::new();
        if self.config.show_commit {
            stats.push_str(&render_day_times(&histogram, self.symbols, self.translator.as_ref())?);
        }
        if self.config.show_days_of_week {
            stats.push_str(&render_week_days(&histogram, self.symbols, self.translator.as_ref())?);
        }
        Ok(stats)
    }

    /// Fenced block with the enabled language, editor and OS lists
    pub fn render_coding_time(&self, stats: &WakaStats) -> Result<String> {
        let mut block = format!(
            "📊 **{}** \n\n```text\n",
            self.t("Since my first \"Hello World!\", I have spent time on")
        );

        let sections: [(bool, &str, &str, &[CategoryRecord]); 3] = [
            (self.config.show_language, "💬", "Languages", stats.languages.as_slice()),
            (self.config.show_editors, "🔥", "Editors", stats.editors.as_slice()),
            (self.config.show_os, "💻", "Operating Systems", stats.operating_systems.as_slice()),
        ];

        for (enabled, emoji, title, records) in sections {
            if !enabled {
                continue;
            }
            let list = make_list(records, DEFAULT_TOP_N, true, self.symbols)?;
            block.push_str(&format!("{} {}: \n{}\n\n", emoji, self.t(title), list));
        }

        block.pop();
        block.push_str("```\n\n");
        Ok(block)
    }

    /// Code-time, lines-of-code and profile-view badges that are enabled
    pub fn render_badges(&self, data: &ActivityData) -> Result<String> {
        let mut badges = String::new();

        if self.config.show_total_code_time {
            match data.all_time {
                Some(ref all_time) => {
                    let label = self.t("I have been coding for");
                    badges.push_str(&badge("Code Time", &label, &all_time.text)?);
                    badges.push_str("  ");
                }
                None => warn!("No all-time coding total available; skipping code time badge"),
            }
        }

        if self.config.show_lines_of_code {
            let label = self.t("I have been writing");
            let message = translate_with(
                self.translator.as_ref(),
                "{} lines of code",
                intword(data.total_lines_added()),
            );
            badges.push_str(&badge("Lines of code", &label, &message)?);
            badges.push_str("  ");
        }

        if self.config.show_profile_views {
            match data.profile_views {
                Some(views) => {
                    let label = self.t("Profile views");
                    badges.push_str(&badge("Profile views", &label, &views.to_string())?);
                    badges.push_str("\n\n");
                }
                None => debug!("No profile view count available"),
            }
        }

        Ok(badges)
    }

    /// Assemble the full README section
    pub fn render(&self, data: &ActivityData) -> Result<String> {
        let mut stats = String::new();

        if self.config.show_commit || self.config.show_days_of_week {
            stats.push_str(&self.render_commit_times(data)?);
            stats.push_str("\n\n");
        }

        if self.config.shows_wakatime() {
            match data.wakatime {
                Some(ref waka) => stats.push_str(&self.render_coding_time(waka)?),
                None => warn!("No WakaTime stats available; skipping coding time section"),
            }
        }

        if self.config.show_language_per_repo {
            if RepositoryLanguageCount::from_repositories(&data.repositories).total() == 0 {
                warn!("No repository has a primary language; skipping language per repo");
            } else {
                stats.push_str(&make_language_per_repo_list(
                    &data.repositories,
                    self.symbols,
                    self.translator.as_ref(),
                )?);
                stats.push_str("\n\n");
            }
        }

        if self.config.show_loc_chart {
            match self.chart {
                Some(ref chart) if !data.yearly.is_empty() => {
                    let image = chart.render(&self.t("Lines of Code"), &data.yearly)?;
                    stats.push_str(&format!("**{}**\n\n{}", self.t("Timeline"), image));
                }
                _ => warn!("No line-count timeline to chart; skipping timeline"),
            }
        }

        stats.push_str(&self.render_badges(data)?);
        info!(bytes = stats.len(), "Stats rendered");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecapError;
    use crate::source::{AllTime, CommitIndex, LineDelta, Repository, YearlyTimeline};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config() -> Config {
        Config {
            wakatime_api_key: None,
            ..Config::default()
        }
    }

    fn create_orchestrator(config: Config) -> Orchestrator {
        Orchestrator::new(config).unwrap().without_wakatime()
    }

    fn create_test_data() -> ActivityData {
        let mut commit_index = CommitIndex::new();
        let commits = commit_index
            .entry("alpha".to_string())
            .or_default()
            .entry("main".to_string())
            .or_default();
        commits.insert("a".to_string(), "2024-01-01T09:00:00Z".to_string());
        commits.insert("b".to_string(), "2024-01-02T14:00:00Z".to_string());

        let mut yearly = YearlyTimeline::new();
        yearly
            .entry("2024".to_string())
            .or_default()
            .entry("1".to_string())
            .or_default()
            .insert("2024-01-01".to_string(), LineDelta { add: 12_500, del: 10 });

        ActivityData {
            repositories: vec![
                Repository::new("alpha", Some("Rust")),
                Repository::new("beta", Some("Go")),
                Repository::new("gamma", Some("Rust")),
            ],
            commit_index,
            yearly,
            wakatime: Some(WakaStats {
                timezone: Some("UTC".to_string()),
                languages: vec![
                    CategoryRecord::new("Rust", "4 hrs", 80.0),
                    CategoryRecord::new("Other", "1 hr", 20.0),
                ],
                editors: vec![CategoryRecord::new("Neovim", "5 hrs", 100.0)],
                operating_systems: vec![CategoryRecord::new("Linux", "5 hrs", 100.0)],
            }),
            all_time: Some(AllTime {
                text: "321 hrs".to_string(),
            }),
            profile_views: Some(7),
        }
    }

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator = create_orchestrator(create_test_config());
        assert!(orchestrator.wakatime.is_none());
        assert!(orchestrator.chart.is_none());
        assert_eq!(orchestrator.symbols, SymbolSet::Blocks);
    }

    #[test]
    fn test_time_zone_precedence() {
        let data = create_test_data();

        let orchestrator = create_orchestrator(create_test_config());
        assert_eq!(orchestrator.time_zone(&data), "UTC");
        assert_eq!(orchestrator.time_zone(&ActivityData::default()), "UTC");

        let mut config = create_test_config();
        config.time_zone = Some("Asia/Tokyo".to_string());
        let orchestrator = create_orchestrator(config);
        assert_eq!(orchestrator.time_zone(&data), "Asia/Tokyo");

        let mut waka_zone = create_test_data();
        waka_zone.wakatime.as_mut().unwrap().timezone = Some("Europe/Oslo".to_string());
        let orchestrator = create_orchestrator(create_test_config());
        assert_eq!(orchestrator.time_zone(&waka_zone), "Europe/Oslo");
    }

    #[test]
    fn test_render_full_section_order() {
        let orchestrator = create_orchestrator(create_test_config());
        let stats = orchestrator.render(&create_test_data()).unwrap();

        let early = stats.find("**I'm an Early**").unwrap();
        let weekday = stats.find("📅 **I'm most productive on Monday**").unwrap();
        let coding = stats.find("📊 **Since my first").unwrap();
        let per_repo = stats.find("**I mostly code in Rust**").unwrap();
        let code_time = stats.find("![Code Time]").unwrap();
        let views = stats.find("![Profile views]").unwrap();
        assert!(early < weekday && weekday < coding && coding < per_repo);
        assert!(per_repo < code_time && code_time < views);

        assert!(!stats.contains("Lines of code"));
        assert!(!stats.contains("Timeline"));
        assert!(stats.ends_with("-7-blue)\n\n"));
    }

    #[test]
    fn test_render_coding_time_block() {
        let orchestrator = create_orchestrator(create_test_config());
        let block = orchestrator
            .render_coding_time(create_test_data().wakatime.as_ref().unwrap())
            .unwrap();

        assert!(block.starts_with("📊 **Since my first \"Hello World!\", I have spent time on** \n\n```text\n💬 Languages: \nRust"));
        assert!(block.contains("🔥 Editors: \nNeovim"));
        assert!(block.contains("💻 Operating Systems: \nLinux"));
        assert!(!block.contains("Other"));
        assert!(block.ends_with(" % \n```\n\n"));
    }

    #[test]
    fn test_visibility_flags() {
        let mut config = create_test_config();
        config.show_commit = false;
        config.show_editors = false;
        config.show_language_per_repo = false;
        config.show_profile_views = false;
        let orchestrator = create_orchestrator(config);
        let stats = orchestrator.render(&create_test_data()).unwrap();

        assert!(!stats.contains("I'm an Early"));
        assert!(stats.contains("I'm most productive on"));
        assert!(!stats.contains("Editors"));
        assert!(stats.contains("Languages"));
        assert!(!stats.contains("I mostly code in"));
        assert!(!stats.contains("Profile views"));
    }

    #[test]
    fn test_language_per_repo_skipped_without_languages() {
        let mut data = create_test_data();
        data.repositories = vec![Repository::new("alpha", None)];
        let orchestrator = create_orchestrator(create_test_config());
        let stats = orchestrator.render(&data).unwrap();
        assert!(!stats.contains("I mostly code in"));
    }

    #[test]
    fn test_lines_of_code_and_chart() {
        let mut config = create_test_config();
        config.show_lines_of_code = true;
        config.show_loc_chart = true;
        config.chart_url = Some("assets/loc.png".to_string());
        let orchestrator = create_orchestrator(config);
        let stats = orchestrator.render(&create_test_data()).unwrap();

        assert!(stats.contains("**Timeline**\n\n![Lines of Code](assets/loc.png)\n\n"));
        assert!(stats.contains("I%20have%20been%20writing-12.5%20thousand%20lines%20of%20code-blue"));
    }

    #[test]
    fn test_invalid_time_zone_fails_fast() {
        let mut config = create_test_config();
        config.time_zone = Some("Atlantis/Capital".to_string());
        let orchestrator = create_orchestrator(config);
        let result = orchestrator.render(&create_test_data());
        assert!(matches!(result, Err(RecapError::InvalidTimezone(_))));
    }

    #[test]
    fn test_locale_catalog_translates_titles() {
        let mut locale = NamedTempFile::new().unwrap();
        write!(locale, r#""I mostly code in {{}}" = "Je code surtout en {{}}""#).unwrap();

        let mut config = create_test_config();
        config.locale_path = Some(locale.path().to_path_buf());
        let orchestrator = create_orchestrator(config);
        let stats = orchestrator.render(&create_test_data()).unwrap();
        assert!(stats.contains("**Je code surtout en Rust**"));
    }

    #[tokio::test]
    async fn test_collect_from_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "repositories": [{{"name": "alpha", "primaryLanguage": {{"name": "Rust"}}}}],
                "contributed": [{{"name": "beta", "primaryLanguage": null}}],
                "commit_dates": {{"alpha": {{"main": {{"x": "2024-02-02T02:02:02Z"}}}}}},
                "profile_views": 3
            }}"#
        )
        .unwrap();

        let mut config = create_test_config();
        config.snapshot_path = Some(file.path().to_path_buf());
        let orchestrator = create_orchestrator(config);

        let data = orchestrator.collect().await.unwrap();
        assert_eq!(data.repositories.len(), 2);
        assert_eq!(data.profile_views, Some(3));
        assert!(data.wakatime.is_none());
    }

    #[tokio::test]
    async fn test_collect_without_sources() {
        let orchestrator = create_orchestrator(create_test_config());
        let data = orchestrator.collect().await.unwrap();
        assert!(data.repositories.is_empty());
        assert!(data.commit_index.is_empty());
    }
}
