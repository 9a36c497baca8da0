//! Structural-context resolution.
//!
//! Given a cursor position, finds the nearest enclosing block declaration
//! by scanning lines backward and comparing indentation against a single
//! baseline. This resolves consistently-indented nesting correctly but
//! does not keep a full scope stack; deeply or irregularly indented input
//! can misattribute context.

use once_cell::sync::Lazy;
use regex::Regex;

/// A declaration line: either `<Keyword> <Identifier>` or a module head
/// `Behavior = <Type> <Tag>`. The captured name is the type token, which
/// is what keys the behavior schema.
static DECLARATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:Behavior|Body|Draw|ClientUpdate)\s*=\s*)?([A-Za-z_]\w*)\s+[\w+\-]+")
        .unwrap()
});

/// A module declaration head, the position where block-kind completion
/// applies (as opposed to parameter completion inside the block).
static MODULE_HEAD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:Behavior|Body|Draw|ClientUpdate)\s*=").unwrap());

/// The keyword closing a block scope.
const BLOCK_TERMINATOR: &str = "end";

/// Resolves the nearest enclosing block declaration for the character
/// offset `offset` into `text`. Returns the declaration's type name, or
/// `None` when the position is not inside any block.
pub fn enclosing_block(text: &str, offset: usize) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return None;
    }
    let target_idx = line_index_at(text, offset).min(lines.len() - 1);
    let target_indent = indent_width(lines[target_idx]);

    let mut baseline: Option<usize> = None;
    for line in lines[..=target_idx].iter().rev() {
        if line.trim().eq_ignore_ascii_case(BLOCK_TERMINATOR) {
            let term_indent = indent_width(line);
            if baseline.map_or(true, |b| term_indent <= b) {
                // A scope closed at or above our level before any enclosing
                // declaration was found.
                return None;
            }
            continue;
        }

        if let Some((indent, name)) = declaration_of(line) {
            match baseline {
                None => {
                    if target_indent > indent {
                        return Some(name.to_string());
                    }
                    // Sibling or unrelated block at or below our level; its
                    // indentation bounds the scope we can still be inside.
                    baseline = Some(indent);
                }
                Some(b) if indent < b => return Some(name.to_string()),
                Some(_) => {}
            }
        }
    }

    None
}

/// Whether the line is itself a module declaration head, where completion
/// should offer block-kind names rather than parameter names.
pub fn is_declaration_line(line: &str) -> bool {
    MODULE_HEAD_PATTERN.is_match(line)
}

fn declaration_of(line: &str) -> Option<(usize, &str)> {
    let caps = DECLARATION_PATTERN.captures(line)?;
    let name = caps.get(1).unwrap().as_str();
    Some((indent_width(line), name))
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn line_index_at(text: &str, offset: usize) -> usize {
    text.chars().take(offset).filter(|&c| c == '\n').count()
}
