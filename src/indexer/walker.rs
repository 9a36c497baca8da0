use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Recognized source suffixes, matched against the lowercased file name.
pub const SOURCE_SUFFIXES: [&str; 2] = [".ini", ".inc"];

/// Reserved file excluded from indexing regardless of suffix.
pub const RESERVED_FILE: &str = "map.ini";

/// Default name of the localization asset.
pub const STRING_TABLE_FILE: &str = "lotr.csv";

/// Files gathered by one collection pass over the configured roots.
#[derive(Debug, Default)]
pub struct CollectedFiles {
    /// Source files, in walk order
    pub sources: Vec<PathBuf>,
    /// Localization assets, in walk order
    pub string_tables: Vec<PathBuf>,
}

/// Enumerates candidate files under the configured roots.
pub struct SourceWalker {
    string_file: String,
}

impl Default for SourceWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceWalker {
    pub fn new() -> Self {
        Self {
            string_file: STRING_TABLE_FILE.to_string(),
        }
    }

    /// Overrides the recognized localization asset name.
    pub fn with_string_file(mut self, name: impl Into<String>) -> Self {
        self.string_file = name.into().to_lowercase();
        self
    }

    /// Walks every root recursively. Walk errors are logged and skipped;
    /// the remaining entries and roots continue.
    pub fn collect(&self, roots: &[PathBuf]) -> CollectedFiles {
        let mut collected = CollectedFiles::default();

        for root in roots {
            let walker = WalkBuilder::new(root).standard_filters(false).build();
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!(root = %root.display(), error = %e, "walk error, skipping entry");
                        continue;
                    }
                };
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if self.is_source_file(path) {
                    collected.sources.push(path.to_path_buf());
                } else if self.is_string_file(path) {
                    collected.string_tables.push(path.to_path_buf());
                }
            }
        }

        collected
    }

    /// Whether the file name, lowercased, ends in a recognized suffix and
    /// is not the reserved excluded file.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(name) = file_name_lower(path) else {
            return false;
        };
        if name == RESERVED_FILE {
            return false;
        }
        SOURCE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
    }

    /// Whether the file is the localization asset (exact name match).
    pub fn is_string_file(&self, path: &Path) -> bool {
        file_name_lower(path).is_some_and(|name| name == self.string_file)
    }
}

fn file_name_lower(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_lowercase())
}
