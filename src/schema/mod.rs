//! Behavior schema.
//!
//! A read-only catalog of block kind -> ordered parameter metadata,
//! produced out-of-band by a documentation harvester and shipped as a JSON
//! asset. Loaded once at startup and never mutated; parameter order in the
//! asset is preserved.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Ordered parameter name -> declared type label.
pub type ParamMap = IndexMap<String, String>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BehaviorSchema {
    behaviors: IndexMap<String, ParamMap>,
}

impl BehaviorSchema {
    /// Loads the schema asset. Missing or malformed assets are errors; the
    /// caller decides whether to fall back to an empty schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Looks up a behavior, exact-case first, then case-insensitively
    /// (source files do not reliably match the documented casing).
    pub fn get(&self, name: &str) -> Option<&ParamMap> {
        self.behaviors.get(name).or_else(|| {
            self.behaviors
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, params)| params)
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamMap)> {
        self.behaviors
            .iter()
            .map(|(name, params)| (name.as_str(), params))
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}
