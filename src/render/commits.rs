use crate::error::{RecapError, Result};
use crate::i18n::{translate_with, Translator};
use crate::render::graph::SymbolSet;
use crate::render::list::{make_list, CategoryRecord, DEFAULT_TOP_N};
use crate::render::{percent_of, titled_block};
use crate::source::{CommitIndex, Repository, COMMIT_TIMESTAMP_FORMAT};
use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Emojis for the rotated day-time buckets
pub const DAY_TIME_EMOJI: [&str; 4] = ["🌞", "🌆", "🌃", "🌙"];

/// Labels for the rotated day-time buckets
pub const DAY_TIME_NAMES: [&str; 4] = ["Morning", "Daytime", "Evening", "Night"];

pub const WEEK_DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Commit counts by quarter of the day and by weekday
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeBucketHistogram {
    /// 00-06, 06-12, 12-18, 18-24 in the target zone
    pub day_time: [u64; 4],
    /// Monday first
    pub week_day: [u64; 7],
}

impl TimeBucketHistogram {
    /// Bucket every commit of the listed repositories in `time_zone`.
    ///
    /// Repositories missing from either side are ignored.
    pub fn from_commit_index(
        time_zone: &str,
        repositories: &[Repository],
        index: &CommitIndex,
    ) -> Result<Self> {
        let tz = parse_timezone(time_zone)?;
        let mut histogram = Self::default();

        for repository in repositories {
            let Some(branches) = index.get(&repository.name) else {
                continue;
            };

            for committed_at in branches.values().flat_map(|commits| commits.values()) {
                let local = parse_commit_timestamp(committed_at)?.with_timezone(&tz);
                histogram.record(&local);
            }
        }

        Ok(histogram)
    }

    fn record<T: TimeZone>(&mut self, local: &DateTime<T>) {
        self.day_time[(local.hour() / 6) as usize] += 1;
        self.week_day[local.weekday().num_days_from_monday() as usize] += 1;
    }

    /// Commits counted
    pub fn total(&self) -> u64 {
        self.week_day.iter().sum()
    }

    /// Day-time buckets starting at 06-12, the midnight quarter last
    pub fn rotated_day_time(&self) -> [u64; 4] {
        let mut rotated = self.day_time;
        rotated.rotate_left(1);
        rotated
    }
}

/// Resolve an IANA zone name
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| RecapError::InvalidTimezone(name.to_string()))
}

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` commit timestamp as UTC
pub fn parse_commit_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, COMMIT_TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| RecapError::MalformedTimestamp(value.to_string()))
}

/// Day-time block, titled early bird or night owl
pub fn render_day_times(
    histogram: &TimeBucketHistogram,
    symbols: SymbolSet,
    translator: &dyn Translator,
) -> Result<String> {
    let buckets = histogram.rotated_day_time();
    let total: u64 = buckets.iter().sum();

    let records: Vec<CategoryRecord> = buckets
        .iter()
        .enumerate()
        .map(|(i, count)| {
            CategoryRecord::new(
                format!("{} {}", DAY_TIME_EMOJI[i], translator.translate(DAY_TIME_NAMES[i])),
                translate_with(translator, "{} commits", count),
                percent_of(*count, total),
            )
        })
        .collect();

    let title = if buckets[0] + buckets[1] >= buckets[2] + buckets[3] {
        translator.translate("I'm an Early")
    } else {
        translator.translate("I'm a Night")
    };

    let list = make_list(&records, DEFAULT_TOP_N, false, symbols)?;
    Ok(titled_block(&title, &list))
}

/// Weekday block, titled by the busiest day
pub fn render_week_days(
    histogram: &TimeBucketHistogram,
    symbols: SymbolSet,
    translator: &dyn Translator,
) -> Result<String> {
    let total = histogram.total();
    let percents: Vec<f64> = histogram
        .week_day
        .iter()
        .map(|count| percent_of(*count, total))
        .collect();

    let names: Vec<String> = WEEK_DAY_NAMES.iter().map(|day| translator.translate(day)).collect();
    let texts: Vec<String> = histogram
        .week_day
        .iter()
        .map(|count| translate_with(translator, "{} commits", count))
        .collect();
    let records = CategoryRecord::from_parallel(&names, &texts, &percents)?;

    let mut busiest = 0;
    for (i, percent) in percents.iter().enumerate() {
        if *percent > percents[busiest] {
            busiest = i;
        }
    }
    let title = translate_with(
        translator,
        "I'm most productive on {}",
        &names[busiest],
    );

    let list = make_list(&records, DEFAULT_TOP_N, false, symbols)?;
    Ok(format!("📅 {}", titled_block(&title, &list)))
}

/// Day-time and weekday blocks for every commit in `index`
pub fn make_commit_day_time_list(
    time_zone: &str,
    repositories: &[Repository],
    index: &CommitIndex,
    symbols: SymbolSet,
    translator: &dyn Translator,
) -> Result<String> {
    let histogram = TimeBucketHistogram::from_commit_index(time_zone, repositories, index)?;
    let mut stats = render_day_times(&histogram, symbols, translator)?;
    stats.push_str(&render_week_days(&histogram, symbols, translator)?);
    Ok(stats)
}
