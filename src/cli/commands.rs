use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::indexer::{decode, IndexService, SourceWalker};
use crate::lookup::{CompletionRequest, LookupService, Resolution};
use crate::schema::BehaviorSchema;

#[derive(Parser)]
#[command(name = "sage-indexer")]
#[command(about = "CLI tool for indexing SAGE-engine mod INI sources")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Index a mod tree and print counts
    sage-indexer index ./data

    # Find where a symbol is defined
    sage-indexer definition Uruk_Sword --root ./data

    # Browse all symbols, macros and strings
    sage-indexer symbols --root ./data

    # Completion candidates for a position in a file
    sage-indexer complete Wea --file data/ini/object/men.ini --line 120 --root ./data

    # Entry counts by kind
    sage-indexer stats --root ./data
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the behavior schema asset (JSON)
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Name of the localization asset
    #[arg(long, default_value = "lotr.csv")]
    pub strings: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index one or more root directories
    Index {
        /// Root directories to index
        #[arg(default_value = ".")]
        roots: Vec<PathBuf>,
    },

    /// Find the definition sites of a symbol
    Definition {
        /// Symbol name (case-sensitive; strings fall back case-insensitive)
        name: String,

        /// Root directory to index
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Browse all symbol, macro and string entries
    Symbols {
        /// Only entries whose label contains this prefix
        prefix: Option<String>,

        /// Filter by kind (e.g. weapon, macro, string)
        #[arg(long)]
        kind: Option<String>,

        /// Root directory to index
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Completion candidates for a position in a file
    Complete {
        /// The typed prefix to complete
        prefix: String,

        /// File containing the cursor
        #[arg(long)]
        file: PathBuf,

        /// Cursor line, 1-based
        #[arg(long)]
        line: u32,

        /// Root directory to index
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Show entry counts for an indexed tree
    Stats {
        /// Root directory to index
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn build_service(roots: &[PathBuf], strings_file: &str) -> Arc<IndexService> {
    let walker = SourceWalker::new().with_string_file(strings_file);
    let service = Arc::new(IndexService::with_walker(walker));
    service.rebuild(roots);
    service
}

fn load_schema(path: Option<&Path>) -> Arc<BehaviorSchema> {
    let Some(path) = path else {
        return Arc::new(BehaviorSchema::default());
    };
    match BehaviorSchema::load(path) {
        Ok(schema) => Arc::new(schema),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load behavior schema");
            Arc::new(BehaviorSchema::default())
        }
    }
}

pub fn index_roots(roots: &[PathBuf], strings_file: &str) -> Result<()> {
    let walker = SourceWalker::new().with_string_file(strings_file);
    let service = IndexService::with_walker(walker);
    let stats = service.rebuild(roots);
    println!(
        "Indexed {} files: {} symbols, {} strings ({} errors)",
        stats.files_indexed, stats.symbols, stats.strings, stats.errors
    );
    Ok(())
}

pub fn find_definition(name: &str, root: &Path, strings_file: &str) -> Result<()> {
    let service = build_service(&[root.to_path_buf()], strings_file);
    let lookup = LookupService::new(service, Arc::new(BehaviorSchema::default()));

    match lookup.resolve(name) {
        Resolution::Symbol {
            name,
            kind,
            sites,
            values,
        } => {
            for (i, site) in sites.iter().enumerate() {
                match values.get(i) {
                    Some(value) => {
                        println!("{} [{}] {}:{} = {}", name, kind.as_str(), site.file, site.line, value)
                    }
                    None => println!("{} [{}] {}:{}", name, kind.as_str(), site.file, site.line),
                }
            }
        }
        Resolution::String { key, site } => {
            println!("{} [string] {}:{}", key, site.file, site.line);
        }
        Resolution::NotFound => {
            println!("No definition found for {}", name);
        }
    }
    Ok(())
}

pub fn list_symbols(
    prefix: Option<&str>,
    kind: Option<&str>,
    root: &Path,
    strings_file: &str,
    format: &str,
) -> Result<()> {
    let service = build_service(&[root.to_path_buf()], strings_file);
    let lookup = LookupService::new(service, Arc::new(BehaviorSchema::default()));

    let mut items = lookup.browse_all();
    if let Some(prefix) = prefix {
        let prefix = prefix.to_lowercase();
        items.retain(|item| item.label.to_lowercase().contains(&prefix));
    }
    if let Some(kind) = kind {
        let tag = format!("[{}]", kind.to_lowercase());
        items.retain(|item| item.label.contains(&tag));
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&items).unwrap_or_default());
    } else {
        for item in &items {
            println!("{}  {}:{}", item.label, item.file, item.line);
        }
        println!("{} entries", items.len());
    }
    Ok(())
}

pub fn complete(
    prefix: &str,
    file: &Path,
    line: u32,
    root: &Path,
    strings_file: &str,
    schema_path: Option<&Path>,
) -> Result<()> {
    let text = decode::read_latin1(file)?;
    let line_idx = line.saturating_sub(1) as usize;
    let line_text = text.lines().nth(line_idx).unwrap_or("").to_string();
    let offset = char_offset_of_line(&text, line_idx);

    let service = build_service(&[root.to_path_buf()], strings_file);
    let lookup = LookupService::new(service, load_schema(schema_path));

    let items = lookup.complete(&CompletionRequest {
        prefix,
        line: &line_text,
        text: &text,
        offset,
    });

    for item in &items {
        println!("{}  [{}]  {}", item.label, item.kind.as_str(), item.detail);
    }
    println!("{} candidates", items.len());
    Ok(())
}

pub fn show_stats(root: &Path, strings_file: &str) -> Result<()> {
    let service = build_service(&[root.to_path_buf()], strings_file);
    let stats = service.snapshot().stats();

    println!("Symbols: {}", stats.total_symbols);
    println!("Strings: {}", stats.total_strings);
    for (kind, count) in &stats.symbols_by_kind {
        println!("  {:<20} {}", kind, count);
    }
    Ok(())
}

/// Char offset of the first character of line `line_idx` (0-based).
fn char_offset_of_line(text: &str, line_idx: usize) -> usize {
    let mut newlines = 0;
    for (i, ch) in text.chars().enumerate() {
        if newlines == line_idx {
            return i;
        }
        if ch == '\n' {
            newlines += 1;
        }
    }
    text.chars().count()
}
