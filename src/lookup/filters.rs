//! Context-filter derivation.
//!
//! Completion narrows its candidate kinds from the current line's text via
//! a fixed, ordered rule table. The first rule whose needle set matches
//! wins; later rules are not consulted.

use crate::index::SymbolKind;

/// One derivation rule: if the lowercased line contains any needle, the
/// kind filter applies.
pub struct FilterRule {
    pub needles: &'static [&'static str],
    pub kinds: &'static [SymbolKind],
}

/// Rules in priority order.
pub const CONTEXT_FILTERS: &[FilterRule] = &[
    FilterRule {
        needles: &["weapon"],
        kinds: &[SymbolKind::Weapon],
    },
    FilterRule {
        needles: &["armor"],
        kinds: &[SymbolKind::Armor],
    },
    FilterRule {
        needles: &["locomotor"],
        kinds: &[SymbolKind::Locomotor],
    },
    FilterRule {
        needles: &["commandset", "commandbutton"],
        kinds: &[SymbolKind::CommandSet, SymbolKind::CommandButton],
    },
    FilterRule {
        needles: &["voice", "sound", "audio"],
        kinds: &[SymbolKind::AudioEvent],
    },
    FilterRule {
        needles: &["upgrade", "science"],
        kinds: &[SymbolKind::Upgrade, SymbolKind::Science],
    },
];

/// Derives the kind filter for a line of text, if any rule matches.
pub fn kind_filter_for_line(line: &str) -> Option<&'static [SymbolKind]> {
    let lower = line.to_lowercase();
    CONTEXT_FILTERS
        .iter()
        .find(|rule| rule.needles.iter().any(|needle| lower.contains(needle)))
        .map(|rule| rule.kinds)
}

/// Whether the line heuristically names a display/label/description field,
/// where localized-string completion applies even under a kind filter.
pub fn line_suggests_label(line: &str) -> bool {
    let lower = line.to_lowercase();
    ["displayname", "description", "label", "tooltip"]
        .iter()
        .any(|needle| lower.contains(needle))
}
