//! Localized-string table.
//!
//! The localization asset is a semicolon-delimited file whose first column
//! is the string name. Keys are matched case-insensitively, so they are
//! lowercased on entry. Each load fully replaces the previous contents.

use std::collections::HashMap;
use std::path::Path;

use crate::index::models::{DefinitionSite, StringEntry};
use crate::indexer::decode;

#[derive(Debug, Default)]
pub struct StringTable {
    entries: HashMap<String, DefinitionSite>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the asset at `path`. Read failures are logged and yield an
    /// empty table; a missing or unreadable string table is never fatal.
    pub fn load(path: &Path) -> Self {
        match decode::read_latin1(path) {
            Ok(content) => {
                let table = Self::parse(&path.to_string_lossy(), &content);
                tracing::info!(path = %path.display(), strings = table.len(), "indexed string table");
                table
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read string table");
                Self::new()
            }
        }
    }

    /// Parses semicolon-delimited rows. A row registers an entry iff its
    /// first field, trimmed and lowercased, is non-empty; later rows with
    /// the same key overwrite earlier ones.
    pub fn parse(path: &str, content: &str) -> Self {
        let mut entries = HashMap::new();
        for (i, row) in content.lines().enumerate() {
            let name = match row.split(';').next() {
                Some(first) => first.trim().to_lowercase(),
                None => continue,
            };
            if name.is_empty() {
                continue;
            }
            entries.insert(name, DefinitionSite::new(path, i as u32 + 1));
        }
        Self { entries }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&DefinitionSite> {
        self.entries.get(&key.to_lowercase())
    }

    pub fn entries(&self) -> impl Iterator<Item = StringEntry> + '_ {
        self.entries.iter().map(|(key, site)| StringEntry {
            key: key.clone(),
            site: site.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
