pub mod decode;
pub mod extractor;
pub mod service;
pub mod walker;

pub use extractor::{Definition, ExtractionResult, SymbolExtractor};
pub use service::{IndexService, RebuildStats};
pub use walker::{CollectedFiles, SourceWalker};
