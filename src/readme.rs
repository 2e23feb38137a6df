use crate::error::{RecapError, Result};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;

fn section_pattern(section: &str) -> Result<Regex> {
    let start = regex::escape(&format!("<!--START_SECTION:{}-->", section));
    let end = regex::escape(&format!("<!--END_SECTION:{}-->", section));
    Ok(Regex::new(&format!("(?s){}.*?{}", start, end))?)
}

/// Replace everything between the section markers with `stats`
pub fn update_section(document: &str, section: &str, stats: &str) -> Result<String> {
    let pattern = section_pattern(section)?;
    if !pattern.is_match(document) {
        return Err(RecapError::MissingSection(section.to_string()));
    }

    let replacement = format!(
        "<!--START_SECTION:{}-->\n{}\n<!--END_SECTION:{}-->",
        section, stats, section
    );
    Ok(pattern
        .replacen(document, 1, NoExpand(&replacement))
        .into_owned())
}

/// Rewrite the section of the file at `path`; returns whether it changed
pub fn update_file(path: &Path, section: &str, stats: &str) -> Result<bool> {
    let document = fs::read_to_string(path)?;
    let updated = update_section(&document, section, stats)?;

    if updated == document {
        return Ok(false);
    }

    fs::write(path, updated)?;
    Ok(true)
}
