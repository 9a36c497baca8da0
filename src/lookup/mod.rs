pub mod filters;
pub mod service;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::index::{DefinitionSite, SymbolKind};

pub use filters::{kind_filter_for_line, line_suggests_label};
pub use service::LookupService;

/// Outcome of an exact-resolution query. A miss is a defined outcome, not
/// an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Resolution {
    /// Index hit. Multi-site entries return every site in encounter order;
    /// the caller disambiguates.
    Symbol {
        name: String,
        kind: SymbolKind,
        sites: Vec<DefinitionSite>,
        /// Raw replacement values, parallel to `sites`; macros only
        values: Vec<String>,
    },
    /// String-table hit (case-insensitive).
    String { key: String, site: DefinitionSite },
    NotFound,
}

/// A resolved include directive target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeTarget {
    pub path: PathBuf,
    pub exists: bool,
}

/// One row of the quick-pick symbol browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseItem {
    pub label: String,
    pub file: String,
    pub line: u32,
}

/// Source category of a completion candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateKind {
    Symbol(SymbolKind),
    String,
    Behavior,
    Parameter,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Symbol(kind) => kind.as_str(),
            CandidateKind::String => "string",
            CandidateKind::Behavior => "behavior",
            CandidateKind::Parameter => "parameter",
        }
    }
}

/// A ranked completion candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionItem {
    pub label: String,
    pub detail: String,
    pub kind: CandidateKind,
}

/// A completion query: the typed prefix plus enough of the cursor's
/// surroundings to derive context.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// The partial identifier being completed
    pub prefix: &'a str,
    /// Full text of the current line
    pub line: &'a str,
    /// Full text of the current file
    pub text: &'a str,
    /// Cursor position as a character offset into `text`
    pub offset: usize,
}
