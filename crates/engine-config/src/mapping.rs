//! Source-to-destination column re-mapping applied by the loader.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Source field name to destination column name.
    pub renames: BTreeMap<String, String>,
    /// Source fields that have no destination column.
    pub excluded: BTreeSet<String>,
}

/// Where a source field lands in the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTarget<'a> {
    Column(&'a str),
    Dropped,
}

impl ColumnMapping {
    pub fn new() -> Self {
        ColumnMapping {
            renames: BTreeMap::new(),
            excluded: BTreeSet::new(),
        }
    }

    pub fn rename(mut self, from: &str, to: &str) -> Self {
        self.renames.insert(from.to_string(), to.to_string());
        self
    }

    pub fn exclude(mut self, field: &str) -> Self {
        self.excluded.insert(field.to_string());
        self
    }

    /// The admin schema names its audit columns `created`/`modified` and has
    /// no `file_path` column.
    pub fn catalogue() -> Self {
        ColumnMapping::new()
            .rename("created_at", "created")
            .rename("updated_at", "modified")
            .exclude("file_path")
    }

    pub fn target<'a>(&'a self, field: &'a str) -> ColumnTarget<'a> {
        if self.excluded.contains(field) {
            return ColumnTarget::Dropped;
        }
        match self.renames.get(field) {
            Some(renamed) => ColumnTarget::Column(renamed.as_str()),
            None => ColumnTarget::Column(field),
        }
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping::catalogue()
    }
}
