use crate::error::{RecapError, Result};
use reqwest::Url;

const SHIELDS_BASE: &str = "https://img.shields.io/badge/";

const INTWORD_SUFFIXES: [(f64, &str); 4] = [
    (1e12, "trillion"),
    (1e9, "billion"),
    (1e6, "million"),
    (1e3, "thousand"),
];

/// Human-friendly large number: `1234567` -> `1.2 million`
pub fn intword(value: u64) -> String {
    let number = value as f64;
    for (scale, suffix) in INTWORD_SUFFIXES {
        if number >= scale {
            return format!("{:.1} {}", number / scale, suffix);
        }
    }
    value.to_string()
}

/// shields.io URL for a static blue badge
pub fn badge_url(label: &str, message: &str) -> Result<Url> {
    let mut url = Url::parse(SHIELDS_BASE)
        .map_err(|e| RecapError::invalid_input(format!("badge base URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| RecapError::invalid_input("badge base URL cannot have segments"))?
        .pop_if_empty()
        .push(&format!("{}-{}-blue", escape(label), escape(message)));
    Ok(url)
}

/// Markdown image for a badge
pub fn badge(alt: &str, label: &str, message: &str) -> Result<String> {
    Ok(format!("![{}]({})", alt, badge_url(label, message)?))
}

// shields.io reads single dashes and underscores as separators
fn escape(value: &str) -> String {
    value.replace('-', "--").replace('_', "__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intword() {
        assert_eq!(intword(0), "0");
        assert_eq!(intword(999), "999");
        assert_eq!(intword(1_000), "1.0 thousand");
        assert_eq!(intword(12_345), "12.3 thousand");
        assert_eq!(intword(1_234_567), "1.2 million");
        assert_eq!(intword(3_000_000_000), "3.0 billion");
    }

    #[test]
    fn test_badge_url_encodes_spaces() {
        let url = badge_url("I have been coding for", "1,234 hrs 5 mins").unwrap();
        assert_eq!(
            url.as_str(),
            "https://img.shields.io/badge/I%20have%20been%20coding%20for-1,234%20hrs%205%20mins-blue"
        );
    }

    #[test]
    fn test_badge_escapes_separators() {
        let url = badge_url("Profile views", "a-b_c").unwrap();
        assert!(url.as_str().ends_with("Profile%20views-a--b__c-blue"));
    }

    #[test]
    fn test_badge_markdown() {
        let markdown = badge("Profile views", "Profile views", "42").unwrap();
        assert_eq!(
            markdown,
            "![Profile views](https://img.shields.io/badge/Profile%20views-42-blue)"
        );
    }
}
