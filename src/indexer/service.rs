//! Index ownership and rebuild supervision.
//!
//! The service owns the published [`IndexSnapshot`] behind an `RwLock` of
//! an `Arc`. A rebuild constructs a fresh snapshot off to the side and
//! publishes it with a single swap, so readers always see a complete old
//! or new table. A compare-and-swap run guard rejects overlapping
//! background rebuilds instead of letting them race.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::{IndexError, Result};
use crate::index::{DefinitionSite, IndexSnapshot, StringTable, SymbolTable};
use crate::indexer::extractor::{ExtractionResult, SymbolExtractor};
use crate::indexer::walker::SourceWalker;

/// Outcome of one indexing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RebuildStats {
    pub files_indexed: usize,
    pub symbols: usize,
    pub strings: usize,
    /// Files that could not be read; logged and skipped
    pub errors: usize,
}

pub struct IndexService {
    snapshot: RwLock<Arc<IndexSnapshot>>,
    rebuilding: AtomicBool,
    walker: SourceWalker,
}

impl Default for IndexService {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexService {
    pub fn new() -> Self {
        Self::with_walker(SourceWalker::new())
    }

    pub fn with_walker(walker: SourceWalker) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(IndexSnapshot::empty())),
            rebuilding: AtomicBool::new(false),
            walker,
        }
    }

    /// The currently published snapshot. Cheap; safe to call concurrently
    /// with an in-flight rebuild.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.snapshot.read().unwrap().clone()
    }

    pub fn is_rebuilding(&self) -> bool {
        self.rebuilding.load(Ordering::Acquire)
    }

    /// Rebuilds synchronously: walk, extract, then publish atomically.
    pub fn rebuild(&self, roots: &[PathBuf]) -> RebuildStats {
        let (snapshot, stats) = self.build(roots);
        *self.snapshot.write().unwrap() = Arc::new(snapshot);
        tracing::info!(
            files = stats.files_indexed,
            symbols = stats.symbols,
            strings = stats.strings,
            errors = stats.errors,
            "indexing complete"
        );
        stats
    }

    /// Starts a supervised background rebuild. Returns a channel that
    /// delivers the run's stats on completion. A second trigger while one
    /// run is in flight is rejected with [`IndexError::RebuildInProgress`];
    /// the run itself has no cancellation and always runs to completion.
    pub fn spawn_rebuild(
        self: &Arc<Self>,
        roots: Vec<PathBuf>,
    ) -> Result<oneshot::Receiver<RebuildStats>> {
        if self
            .rebuilding
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(IndexError::RebuildInProgress);
        }

        let (tx, rx) = oneshot::channel();
        let service = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            tracing::debug!("background rebuild started");
            let stats = service.rebuild(&roots);
            service.rebuilding.store(false, Ordering::Release);
            let _ = tx.send(stats);
        });

        Ok(rx)
    }

    /// Builds a fresh snapshot without touching the published one.
    fn build(&self, roots: &[PathBuf]) -> (IndexSnapshot, RebuildStats) {
        let collected = self.walker.collect(roots);
        let mut stats = RebuildStats::default();

        // Extraction is per-file and order-independent; folding into the
        // table is sequential so sites keep walk-then-line order.
        let extractor = SymbolExtractor::new();
        let results: Vec<(&PathBuf, Result<ExtractionResult>)> = collected
            .sources
            .par_iter()
            .map(|file| (file, extractor.extract_file(file)))
            .collect();

        let mut symbols = SymbolTable::new();
        for (file, result) in results {
            match result {
                Ok(extraction) => {
                    stats.files_indexed += 1;
                    let file_label = file.to_string_lossy();
                    for def in extraction.definitions {
                        let site = DefinitionSite::new(file_label.as_ref(), def.line);
                        match def.value {
                            Some(value) => symbols.record_macro(&def.name, site, &value),
                            None => symbols.record_block(&def.name, def.kind, site),
                        }
                    }
                    for include in extraction.includes {
                        symbols.record_include(include);
                    }
                }
                Err(e) => {
                    stats.errors += 1;
                    tracing::warn!(file = %file.display(), error = %e, "failed to read file, skipping");
                }
            }
        }

        // The last localization asset encountered wins, wholesale.
        let mut strings = StringTable::new();
        for path in &collected.string_tables {
            strings = StringTable::load(path);
        }

        stats.symbols = symbols.len();
        stats.strings = strings.len();
        (IndexSnapshot { symbols, strings }, stats)
    }
}
