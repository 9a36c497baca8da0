mod commands;

pub use commands::{
    complete, find_definition, index_roots, list_symbols, show_stats, Cli, Commands,
};
