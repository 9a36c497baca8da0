use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::index::{IncludeDirective, SymbolKind};
use crate::indexer::decode;

/// Block declaration: a known keyword followed by an identifier made of
/// word characters plus `+`/`-`. Keywords match case-insensitively.
static BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(AudioEvent|MappedImage|Object|ChildObject|ObjectCreationList|ModifierList|FXList|FXParticleSystem|Locomotor|Upgrade|Science|StanceTemplate|CommandSet|CommandButton|Weapon|Armor|SpecialPower)\s+([\w+\-]+)",
    )
    .unwrap()
});

/// Macro definition: value runs to the first `;` or end of line, raw.
static MACRO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*#define\s+([\w+\-]+)\s+([^;]+)").unwrap());

/// Include directive with a quoted relative path.
static INCLUDE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)^\s*#include\s+"([^"]+)""#).unwrap());

/// Returns the quoted path when the line is an include directive.
pub fn include_target(line: &str) -> Option<&str> {
    INCLUDE_PATTERN
        .captures(line)
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// One definition recognized in a file, before it is folded into the table.
#[derive(Debug, Clone)]
pub struct Definition {
    pub name: String,
    pub kind: SymbolKind,
    /// 1-based line number
    pub line: u32,
    /// Raw replacement value; macros only
    pub value: Option<String>,
}

/// Result of extracting a single file.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub definitions: Vec<Definition>,
    pub includes: Vec<IncludeDirective>,
}

/// Recognizes definitions line by line. No lookahead, no block matching;
/// each line is classified independently.
pub struct SymbolExtractor;

impl Default for SymbolExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Reads and extracts one file. The read is Latin-1 and cannot fail on
    /// malformed bytes; only I/O errors surface.
    pub fn extract_file(&self, path: &Path) -> Result<ExtractionResult> {
        let content = decode::read_latin1(path)?;
        Ok(self.extract_content(&path.to_string_lossy(), &content))
    }

    /// Extracts definitions and include directives from file content.
    pub fn extract_content(&self, file: &str, content: &str) -> ExtractionResult {
        let mut result = ExtractionResult::default();

        for (i, line) in content.lines().enumerate() {
            let line_no = i as u32 + 1;

            if let Some(caps) = BLOCK_PATTERN.captures(line) {
                // The keyword set and the enum are the same closed set.
                if let Some(kind) = SymbolKind::from_keyword(&caps[1]) {
                    result.definitions.push(Definition {
                        name: caps[2].to_string(),
                        kind,
                        line: line_no,
                        value: None,
                    });
                }
                continue;
            }

            if let Some(caps) = MACRO_PATTERN.captures(line) {
                result.definitions.push(Definition {
                    name: caps[1].to_string(),
                    kind: SymbolKind::Macro,
                    line: line_no,
                    value: Some(caps[2].to_string()),
                });
                continue;
            }

            if let Some(caps) = INCLUDE_PATTERN.captures(line) {
                result.includes.push(IncludeDirective {
                    file: file.to_string(),
                    line: line_no,
                    target: caps[1].to_string(),
                });
            }
        }

        result
    }
}
