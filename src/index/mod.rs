pub mod models;
pub mod strings;
pub mod symbols;

pub use models::*;
pub use strings::StringTable;
pub use symbols::SymbolTable;

/// One complete, immutable indexing result: symbols plus strings.
///
/// Snapshots are built off to the side and published with a single atomic
/// swap, so readers always observe a complete table.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    pub symbols: SymbolTable,
    pub strings: StringTable,
}

impl IndexSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats {
            total_symbols: self.symbols.len(),
            total_strings: self.strings.len(),
            symbols_by_kind: self.symbols.counts_by_kind(),
        }
    }
}
