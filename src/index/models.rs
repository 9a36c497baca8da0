use serde::{Deserialize, Serialize};

/// A (file, line) location where a symbol is defined. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSite {
    pub file: String,
    pub line: u32,
}

impl DefinitionSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// Definition sites of a symbol, in encounter order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Definitions {
    One(DefinitionSite),
    Many(Vec<DefinitionSite>),
}

impl Definitions {
    pub fn one(site: DefinitionSite) -> Self {
        Definitions::One(site)
    }

    /// Appends a site, converting a single-site entry into a multi-site one.
    pub fn push(&mut self, site: DefinitionSite) {
        match self {
            Definitions::One(first) => {
                *self = Definitions::Many(vec![first.clone(), site]);
            }
            Definitions::Many(sites) => sites.push(site),
        }
    }

    /// Views the sites as a slice regardless of variant.
    pub fn sites(&self) -> &[DefinitionSite] {
        match self {
            Definitions::One(site) => std::slice::from_ref(site),
            Definitions::Many(sites) => sites,
        }
    }

    pub fn first(&self) -> &DefinitionSite {
        &self.sites()[0]
    }

    pub fn len(&self) -> usize {
        self.sites().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Definitions::Many(_))
    }
}

/// The closed set of block keywords the dialect declares symbols with,
/// plus `Macro` for `#define` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    AudioEvent,
    MappedImage,
    Object,
    ChildObject,
    ObjectCreationList,
    ModifierList,
    FxList,
    FxParticleSystem,
    Locomotor,
    Upgrade,
    Science,
    StanceTemplate,
    CommandSet,
    CommandButton,
    Weapon,
    Armor,
    SpecialPower,
    Macro,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::AudioEvent => "audioevent",
            SymbolKind::MappedImage => "mappedimage",
            SymbolKind::Object => "object",
            SymbolKind::ChildObject => "childobject",
            SymbolKind::ObjectCreationList => "objectcreationlist",
            SymbolKind::ModifierList => "modifierlist",
            SymbolKind::FxList => "fxlist",
            SymbolKind::FxParticleSystem => "fxparticlesystem",
            SymbolKind::Locomotor => "locomotor",
            SymbolKind::Upgrade => "upgrade",
            SymbolKind::Science => "science",
            SymbolKind::StanceTemplate => "stancetemplate",
            SymbolKind::CommandSet => "commandset",
            SymbolKind::CommandButton => "commandbutton",
            SymbolKind::Weapon => "weapon",
            SymbolKind::Armor => "armor",
            SymbolKind::SpecialPower => "specialpower",
            SymbolKind::Macro => "macro",
        }
    }

    /// Resolves a declaration keyword, case-insensitively. `Macro` has no
    /// keyword; it is introduced by `#define` lines only.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "audioevent" => Some(SymbolKind::AudioEvent),
            "mappedimage" => Some(SymbolKind::MappedImage),
            "object" => Some(SymbolKind::Object),
            "childobject" => Some(SymbolKind::ChildObject),
            "objectcreationlist" => Some(SymbolKind::ObjectCreationList),
            "modifierlist" => Some(SymbolKind::ModifierList),
            "fxlist" => Some(SymbolKind::FxList),
            "fxparticlesystem" => Some(SymbolKind::FxParticleSystem),
            "locomotor" => Some(SymbolKind::Locomotor),
            "upgrade" => Some(SymbolKind::Upgrade),
            "science" => Some(SymbolKind::Science),
            "stancetemplate" => Some(SymbolKind::StanceTemplate),
            "commandset" => Some(SymbolKind::CommandSet),
            "commandbutton" => Some(SymbolKind::CommandButton),
            "weapon" => Some(SymbolKind::Weapon),
            "armor" => Some(SymbolKind::Armor),
            "specialpower" => Some(SymbolKind::SpecialPower),
            _ => None,
        }
    }
}

/// An indexed definition: one identifier, one kind, one or more sites.
///
/// For `Macro` entries, `values` holds the raw replacement text parallel to
/// the site list (same length, same order). Other kinds leave it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: SymbolKind,
    pub defs: Definitions,
    pub values: Vec<String>,
}

impl SymbolEntry {
    pub fn block(name: impl Into<String>, kind: SymbolKind, site: DefinitionSite) -> Self {
        Self {
            name: name.into(),
            kind,
            defs: Definitions::one(site),
            values: Vec::new(),
        }
    }

    pub fn macro_def(
        name: impl Into<String>,
        site: DefinitionSite,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Macro,
            defs: Definitions::one(site),
            values: vec![value.into()],
        }
    }
}

/// A localized-string entry: lowercased key, exactly one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringEntry {
    pub key: String,
    pub site: DefinitionSite,
}

/// An `#include "<path>"` directive encountered while extracting a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeDirective {
    /// File containing the directive
    pub file: String,
    /// Line of the directive, 1-based
    pub line: u32,
    /// The quoted path, verbatim (separators not yet normalized)
    pub target: String,
}

/// Aggregate counts over a published snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotStats {
    pub total_symbols: usize,
    pub total_strings: usize,
    pub symbols_by_kind: Vec<(String, usize)>,
}
