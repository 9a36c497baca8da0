//! In-memory symbol table.
//!
//! Maps identifier -> definition entry, case-sensitively. Duplicate
//! definitions accumulate sites in encounter order (file-walk order, then
//! line order within a file); they are informational, never an error.

use std::collections::HashMap;

use crate::index::models::{
    DefinitionSite, IncludeDirective, SymbolEntry, SymbolKind,
};

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolEntry>,
    includes: Vec<IncludeDirective>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a block declaration. An existing entry under the same
    /// identifier gains an additional site; its kind is kept.
    pub fn record_block(&mut self, name: &str, kind: SymbolKind, site: DefinitionSite) {
        self.record(name, kind, site, None);
    }

    /// Records a `#define`. Duplicate macros append both the site and the
    /// raw replacement value, keeping the two lists parallel.
    pub fn record_macro(&mut self, name: &str, site: DefinitionSite, value: &str) {
        self.record(name, SymbolKind::Macro, site, Some(value));
    }

    fn record(&mut self, name: &str, kind: SymbolKind, site: DefinitionSite, value: Option<&str>) {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.defs.push(site);
                if entry.kind == SymbolKind::Macro {
                    // Keep the value list parallel to the site list even if a
                    // block declaration collides with a macro name.
                    entry.values.push(value.unwrap_or_default().to_string());
                }
                tracing::info!(
                    name,
                    count = entry.defs.len(),
                    "duplicate definition for {}", name
                );
            }
            None => {
                let entry = match value {
                    Some(value) => SymbolEntry::macro_def(name, site, value),
                    None => SymbolEntry::block(name, kind, site),
                };
                self.entries.insert(name.to_string(), entry);
            }
        }
    }

    pub fn record_include(&mut self, include: IncludeDirective) {
        self.includes.push(include);
    }

    /// Case-sensitive exact lookup.
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }

    pub fn includes(&self) -> &[IncludeDirective] {
        &self.includes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry counts grouped by kind, sorted by kind name.
    pub fn counts_by_kind(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&'static str, usize> = HashMap::new();
        for entry in self.entries.values() {
            *counts.entry(entry.kind.as_str()).or_default() += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(kind, n)| (kind.to_string(), n))
            .collect();
        counts.sort();
        counts
    }
}
