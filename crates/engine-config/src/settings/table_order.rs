use crate::error::SettingsError;
use model::registry::RecordKind;
use std::collections::HashSet;

/// Checks that every table is listed once and after the tables it references.
///
/// A referenced table that is not listed at all is accepted: its rows are
/// expected to be in the destination already.
pub fn validate_table_order(tables: &[RecordKind]) -> Result<(), SettingsError> {
    let mut seen = HashSet::new();
    for kind in tables {
        if !seen.insert(*kind) {
            return Err(SettingsError::DuplicateTable(kind.table().to_string()));
        }
    }

    for (position, kind) in tables.iter().enumerate() {
        for parent in kind.depends_on() {
            if tables[position + 1..].contains(parent) {
                return Err(SettingsError::InvalidTableOrder {
                    table: kind.table().to_string(),
                    depends_on: parent.table().to_string(),
                });
            }
        }
    }

    Ok(())
}
