use crate::error::{RecapError, Result};
use crate::source::YearlyTimeline;

/// Turns a line-count timeline into something embeddable in Markdown
pub trait ChartRenderer {
    fn render(&self, title: &str, timeline: &YearlyTimeline) -> Result<String>;
}

/// Embeds a chart image produced and hosted elsewhere
#[derive(Debug, Clone)]
pub struct StaticChart {
    url: String,
}

impl StaticChart {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ChartRenderer for StaticChart {
    fn render(&self, title: &str, timeline: &YearlyTimeline) -> Result<String> {
        if timeline.is_empty() {
            return Err(RecapError::EmptyInput(
                "line-count timeline has no years".to_string(),
            ));
        }
        Ok(format!("![{}]({})\n\n", title, self.url))
    }
}
