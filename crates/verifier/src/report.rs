use serde::Serialize;

pub const CODE_ROW_COUNT: &str = "ROW_COUNT_MISMATCH";
pub const CODE_MISSING_ROW: &str = "MISSING_ROW";
pub const CODE_UNEXPECTED_ROW: &str = "UNEXPECTED_ROW";
pub const CODE_FIELD: &str = "FIELD_MISMATCH";

/// Findings kept per table before the rest are only counted.
pub const MAX_FINDINGS: usize = 20;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Match,
    Mismatch,
    /// Nothing to compare against; not a failure.
    SourceMissing,
    DestinationMissing,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Finding {
    pub fn new(code: &str, message: String) -> Self {
        Finding {
            code: code.to_string(),
            message,
            id: None,
            field: None,
        }
    }

    pub fn row(code: &str, id: &str, message: String) -> Self {
        Finding {
            id: Some(id.to_string()),
            ..Finding::new(code, message)
        }
    }

    pub fn field(id: &str, field: &str, message: String) -> Self {
        Finding {
            id: Some(id.to_string()),
            field: Some(field.to_string()),
            ..Finding::new(CODE_FIELD, message)
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_rows: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
    /// Findings beyond [`MAX_FINDINGS`] that were dropped.
    #[serde(skip_serializing_if = "is_zero")]
    pub truncated: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl TableReport {
    pub fn new(table: &str, status: TableStatus) -> Self {
        TableReport {
            table: table.to_string(),
            status,
            source_rows: None,
            destination_rows: None,
            findings: Vec::new(),
            truncated: 0,
        }
    }

    pub fn add(&mut self, finding: Finding) {
        self.status = TableStatus::Mismatch;
        if self.findings.len() < MAX_FINDINGS {
            self.findings.push(finding);
        } else {
            self.truncated += 1;
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub tables: Vec<TableReport>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.tables
            .iter()
            .all(|t| matches!(t.status, TableStatus::Match | TableStatus::SourceMissing))
    }

    pub fn get(&self, table: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == table)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TableReport> {
        self.tables
            .iter()
            .filter(|t| !matches!(t.status, TableStatus::Match | TableStatus::SourceMissing))
    }
}
