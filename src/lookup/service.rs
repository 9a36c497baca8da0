//! Lookup and completion queries.
//!
//! Read-only composition of the published snapshot, the behavior schema,
//! and per-query context resolution. Safe to call concurrently with an
//! in-flight rebuild; every query works against one complete snapshot.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::context;
use crate::index::{IndexSnapshot, SymbolEntry, SymbolKind};
use crate::indexer::extractor;
use crate::indexer::IndexService;
use crate::lookup::filters;
use crate::lookup::{
    BrowseItem, CandidateKind, CompletionItem, CompletionRequest, IncludeTarget, Resolution,
};
use crate::schema::BehaviorSchema;

/// Completion results are capped regardless of how many candidates match.
const MAX_COMPLETIONS: usize = 100;

pub struct LookupService {
    index: Arc<IndexService>,
    schema: Arc<BehaviorSchema>,
}

impl LookupService {
    pub fn new(index: Arc<IndexService>, schema: Arc<BehaviorSchema>) -> Self {
        Self { index, schema }
    }

    /// Exact resolution for navigation: case-sensitive symbol lookup
    /// first, then case-insensitive string lookup.
    pub fn resolve(&self, ident: &str) -> Resolution {
        let snapshot = self.index.snapshot();
        if let Some(entry) = snapshot.symbols.get(ident) {
            return Resolution::Symbol {
                name: entry.name.clone(),
                kind: entry.kind,
                sites: entry.defs.sites().to_vec(),
                values: entry.values.clone(),
            };
        }
        if let Some(site) = snapshot.strings.get(ident) {
            return Resolution::String {
                key: ident.to_lowercase(),
                site: site.clone(),
            };
        }
        Resolution::NotFound
    }

    /// Resolves an include directive on `line` against the including
    /// file's directory. Include paths are always relative; backslash
    /// separators and a leading separator are normalized away.
    pub fn resolve_include(&self, current_file: &Path, line: &str) -> Option<IncludeTarget> {
        let target = extractor::include_target(line)?;
        let normalized = target.replace('\\', "/");
        let relative = normalized.trim_start_matches('/');
        let dir = current_file.parent().unwrap_or_else(|| Path::new(""));
        let path = normalize_path(&dir.join(relative));
        let exists = path.exists();
        Some(IncludeTarget { path, exists })
    }

    /// Flat, alphabetically sorted list of all symbol, macro, and string
    /// entries. Multi-site entries yield one row per site, with the path
    /// in the label.
    pub fn browse_all(&self) -> Vec<BrowseItem> {
        let snapshot = self.index.snapshot();
        let mut items = Vec::new();

        for entry in snapshot.symbols.entries() {
            if entry.defs.is_multiple() {
                for site in entry.defs.sites() {
                    items.push(BrowseItem {
                        label: format!("{} [{}] {}", entry.name, entry.kind.as_str(), site.file),
                        file: site.file.clone(),
                        line: site.line,
                    });
                }
            } else {
                let site = entry.defs.first();
                items.push(BrowseItem {
                    label: format!("{} [{}]", entry.name, entry.kind.as_str()),
                    file: site.file.clone(),
                    line: site.line,
                });
            }
        }

        for entry in snapshot.strings.entries() {
            items.push(BrowseItem {
                label: format!("{} [string]", entry.key),
                file: entry.site.file.clone(),
                line: entry.site.line,
            });
        }

        items.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
        items
    }

    /// Prefix enumeration for completion. Candidates come from the symbol
    /// index (narrowed by the line-derived kind filter), behavior names on
    /// declaration lines, parameter names inside a recognized behavior
    /// block, and the string table for label-like fields.
    pub fn complete(&self, request: &CompletionRequest) -> Vec<CompletionItem> {
        let snapshot = self.index.snapshot();
        let prefix_lower = request.prefix.to_lowercase();
        let filter = filters::kind_filter_for_line(request.line);
        let mut items = Vec::new();

        self.collect_symbols(&snapshot, &prefix_lower, filter, &mut items);

        if context::is_declaration_line(request.line) {
            self.collect_behavior_names(&prefix_lower, &mut items);
        }

        if let Some(block) = context::enclosing_block(request.text, request.offset) {
            self.collect_parameters(&block, &prefix_lower, &mut items);
        }

        if filter.is_none() || filters::line_suggests_label(request.line) {
            self.collect_strings(&snapshot, &prefix_lower, &mut items);
        }

        rank(&mut items, &prefix_lower);
        items.truncate(MAX_COMPLETIONS);
        items
    }

    fn collect_symbols(
        &self,
        snapshot: &IndexSnapshot,
        prefix_lower: &str,
        filter: Option<&[SymbolKind]>,
        items: &mut Vec<CompletionItem>,
    ) {
        for entry in snapshot.symbols.entries() {
            if !matches_prefix(&entry.name, prefix_lower) {
                continue;
            }
            if let Some(kinds) = filter {
                if !kinds.contains(&entry.kind) {
                    continue;
                }
            }
            items.push(CompletionItem {
                label: entry.name.clone(),
                detail: symbol_detail(entry),
                kind: CandidateKind::Symbol(entry.kind),
            });
        }
    }

    fn collect_behavior_names(&self, prefix_lower: &str, items: &mut Vec<CompletionItem>) {
        for (name, params) in self.schema.iter() {
            if !matches_prefix(name, prefix_lower) {
                continue;
            }
            items.push(CompletionItem {
                label: name.to_string(),
                detail: format!("behavior, {} parameters", params.len()),
                kind: CandidateKind::Behavior,
            });
        }
    }

    fn collect_parameters(&self, block: &str, prefix_lower: &str, items: &mut Vec<CompletionItem>) {
        let Some(params) = self.schema.get(block) else {
            return;
        };
        for (param, type_label) in params {
            if !matches_prefix(param, prefix_lower) {
                continue;
            }
            items.push(CompletionItem {
                label: param.clone(),
                detail: type_label.clone(),
                kind: CandidateKind::Parameter,
            });
        }
    }

    fn collect_strings(
        &self,
        snapshot: &IndexSnapshot,
        prefix_lower: &str,
        items: &mut Vec<CompletionItem>,
    ) {
        for entry in snapshot.strings.entries() {
            if !matches_prefix(&entry.key, prefix_lower) {
                continue;
            }
            items.push(CompletionItem {
                label: entry.key.clone(),
                detail: format!("{}:{}", entry.site.file, entry.site.line),
                kind: CandidateKind::String,
            });
        }
    }
}

/// Candidates match on case-insensitive containment; ranking then prefers
/// exact and strict-prefix matches over the substring fallback.
fn matches_prefix(candidate: &str, prefix_lower: &str) -> bool {
    candidate.to_lowercase().contains(prefix_lower)
}

fn rank(items: &mut [CompletionItem], prefix_lower: &str) {
    items.sort_by_cached_key(|item| {
        let label_lower = item.label.to_lowercase();
        let bucket = if label_lower == prefix_lower {
            0u8
        } else if label_lower.starts_with(prefix_lower) {
            1
        } else {
            2
        };
        (bucket, label_lower)
    });
}

fn symbol_detail(entry: &SymbolEntry) -> String {
    match entry.kind {
        SymbolKind::Macro => format!(
            "= {}",
            entry.values.first().map(String::as_str).unwrap_or_default()
        ),
        _ if entry.defs.is_multiple() => {
            format!("{}, {} definitions", entry.kind.as_str(), entry.defs.len())
        }
        _ => {
            let site = entry.defs.first();
            format!("{} {}:{}", entry.kind.as_str(), site.file, site.line)
        }
    }
}

/// Lexically resolves `.` and `..` components without touching the
/// filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
