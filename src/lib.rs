pub mod context;
pub mod error;
pub mod index;
pub mod indexer;
pub mod lookup;
pub mod schema;

pub use error::{IndexError, Result};
pub use index::{
    DefinitionSite, Definitions, IncludeDirective, IndexSnapshot, SnapshotStats, StringEntry,
    StringTable, SymbolEntry, SymbolKind, SymbolTable,
};
pub use indexer::{
    Definition, ExtractionResult, IndexService, RebuildStats, SourceWalker, SymbolExtractor,
};
pub use lookup::{
    BrowseItem, CandidateKind, CompletionItem, CompletionRequest, IncludeTarget, LookupService,
    Resolution,
};
pub use schema::{BehaviorSchema, ParamMap};
