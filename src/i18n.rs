use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Lookup of localized labels and `{}` templates by their English key
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Returns every key unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Translator for Identity {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Translations loaded from a flat TOML table (`"Morning" = "Matin"`)
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Load a catalog from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a catalog from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        let entries: HashMap<String, String> = toml::from_str(contents)?;
        Ok(Self { entries })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Substitute the first `{}` in `template`; templates without one are
/// returned as-is.
pub fn fill(template: &str, value: impl std::fmt::Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

/// Translate `key` and fill its placeholder
pub fn translate_with(translator: &dyn Translator, key: &str, value: impl std::fmt::Display) -> String {
    fill(&translator.translate(key), value)
}
