use crate::error::{RecapError, Result};
use crate::render::graph::{make_graph, SymbolSet};
use serde::{Deserialize, Serialize};

/// Rows kept before the visibility filter
pub const DEFAULT_TOP_N: usize = 7;

/// Rows with these names are never rendered
pub const BANNED_NAMES: [&str; 4] = ["Other", "Unknown", "Unknown OS", "Unknown Language"];

/// Rows whose displayed percent is below this are dropped
pub const VISIBILITY_THRESHOLD: f64 = 0.70;

const NAME_WIDTH: usize = 25;
const TEXT_WIDTH: usize = 20;

/// One ranked row of a formatted list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Language, editor, OS, bucket label or weekday
    pub name: String,
    /// Free-form text shown next to the name (e.g. "3 hrs 20 mins")
    #[serde(rename = "text", alias = "description", default)]
    pub display_text: String,
    /// Share of the whole, 0-100
    pub percent: f64,
}

impl CategoryRecord {
    pub fn new(name: impl Into<String>, display_text: impl Into<String>, percent: f64) -> Self {
        Self {
            name: name.into(),
            display_text: display_text.into(),
            percent,
        }
    }

    /// Zip three parallel sequences into records
    pub fn from_parallel(names: &[String], texts: &[String], percents: &[f64]) -> Result<Vec<Self>> {
        if names.len() != texts.len() || names.len() != percents.len() {
            return Err(RecapError::invalid_input(format!(
                "parallel sequences differ in length: {} names, {} texts, {} percents",
                names.len(),
                texts.len(),
                percents.len()
            )));
        }

        Ok(names
            .iter()
            .zip(texts)
            .zip(percents)
            .map(|((name, text), percent)| Self::new(name.clone(), text.clone(), *percent))
            .collect())
    }

    /// Reject percents outside [0, 100]
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.percent) {
            return Err(RecapError::invalid_input(format!(
                "percent {} for '{}' is outside [0, 100]",
                self.percent, self.name
            )));
        }
        Ok(())
    }

    fn is_banned(&self) -> bool {
        BANNED_NAMES.contains(&self.name.as_str())
    }

    /// Percent as printed in the row
    fn displayed_percent(&self) -> String {
        format!("{:.2}", self.percent)
    }

    fn render(&self, percent: &str, symbols: SymbolSet) -> String {
        format!(
            "{:<name_width$}{:<text_width$}{}   {:0>5} % ",
            truncate(&self.name, NAME_WIDTH),
            truncate(&self.display_text, TEXT_WIDTH),
            make_graph(self.percent, symbols),
            percent,
            name_width = NAME_WIDTH,
            text_width = TEXT_WIDTH,
        )
    }
}

fn truncate(value: &str, width: usize) -> &str {
    match value.char_indices().nth(width) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Render records as a fixed-width bar list.
///
/// Banned names are removed first, then the first `top_n` records are kept
/// (sorted by percent descending when `sort` is set). Rows under the
/// visibility threshold are dropped afterwards without backfilling, so the
/// result may hold fewer than `top_n` lines.
pub fn make_list(
    records: &[CategoryRecord],
    top_n: usize,
    sort: bool,
    symbols: SymbolSet,
) -> Result<String> {
    for record in records {
        record.validate()?;
    }

    let mut top: Vec<&CategoryRecord> = records
        .iter()
        .filter(|record| !record.is_banned())
        .take(top_n)
        .collect();

    if sort {
        top.sort_by(|a, b| b.percent.total_cmp(&a.percent));
    }

    let lines: Vec<String> = top
        .into_iter()
        .filter_map(|record| {
            let percent = record.displayed_percent();
            let visible = percent
                .parse::<f64>()
                .is_ok_and(|shown| shown >= VISIBILITY_THRESHOLD);
            visible.then(|| record.render(&percent, symbols))
        })
        .collect();

    Ok(lines.join("\n"))
}
