use engine_core::loader::LoadOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    Loaded {
        pages: usize,
        rows: usize,
        inserted: u64,
    },
    SourceMissing,
    DestinationMissing {
        pages_committed: usize,
    },
}

impl From<LoadOutcome> for TableOutcome {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Loaded {
                pages,
                rows,
                inserted,
            } => TableOutcome::Loaded {
                pages,
                rows,
                inserted,
            },
            LoadOutcome::DestinationMissing { pages_committed } => {
                TableOutcome::DestinationMissing { pages_committed }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub table: String,
    #[serde(flatten)]
    pub outcome: TableOutcome,
}

/// Per-table results of one run, in the order tables were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub tables: Vec<TableSummary>,
}

impl RunSummary {
    pub fn push(&mut self, table: &str, outcome: TableOutcome) {
        self.tables.push(TableSummary {
            table: table.to_string(),
            outcome,
        });
    }

    pub fn get(&self, table: &str) -> Option<&TableOutcome> {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map(|t| &t.outcome)
    }

    pub fn total_rows(&self) -> usize {
        self.tables
            .iter()
            .map(|t| match t.outcome {
                TableOutcome::Loaded { rows, .. } => rows,
                _ => 0,
            })
            .sum()
    }

    /// Tables skipped because either store lacked them.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.tables
            .iter()
            .filter(|t| !matches!(t.outcome, TableOutcome::Loaded { .. }))
            .map(|t| t.table.as_str())
    }
}
