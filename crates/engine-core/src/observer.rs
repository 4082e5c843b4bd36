//! Structured run events and the observers that receive them.

use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EtlEvent {
    RunStarted {
        tables: Vec<String>,
        batch_size: usize,
    },
    TableStarted {
        table: String,
    },
    /// The source has no such table; it is skipped.
    SourceTableMissing {
        table: String,
    },
    PageLoaded {
        table: String,
        page: usize,
        rows: usize,
        inserted: u64,
    },
    /// The destination has no such table; the rest of the table is abandoned.
    DestinationTableMissing {
        table: String,
        pages_committed: usize,
        message: String,
    },
    TableFinished {
        table: String,
        pages: usize,
        rows: usize,
        inserted: u64,
    },
    RunFinished {
        tables: usize,
        duration_ms: u64,
    },
}

/// Receives run events. Injected into the orchestrator.
pub trait EtlObserver: Send + Sync {
    fn on_event(&self, event: &EtlEvent);

    /// Called once when the run ends, whatever its outcome.
    fn flush(&self) {}
}

/// Emits each event as a `tracing` event.
#[derive(Debug, Default, Clone)]
pub struct TracingObserver;

impl EtlObserver for TracingObserver {
    fn on_event(&self, event: &EtlEvent) {
        match event {
            EtlEvent::RunStarted { tables, batch_size } => {
                info!(tables = ?tables, batch_size, "Migration started");
            }
            EtlEvent::TableStarted { table } => info!(table, "Loading table"),
            EtlEvent::SourceTableMissing { table } => {
                warn!(table, "Table does not exist in source, skipping");
            }
            EtlEvent::PageLoaded {
                table,
                page,
                rows,
                inserted,
            } => debug!(table, page, rows, inserted, "Page loaded"),
            EtlEvent::DestinationTableMissing {
                table,
                pages_committed,
                message,
            } => warn!(
                table,
                pages_committed,
                error = %message,
                "Table does not exist in destination, skipping"
            ),
            EtlEvent::TableFinished {
                table,
                pages,
                rows,
                inserted,
            } => info!(table, pages, rows, inserted, "Table loaded"),
            EtlEvent::RunFinished {
                tables,
                duration_ms,
            } => info!(tables, duration_ms, "Migration finished"),
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    events: Mutex<Vec<EtlEvent>>,
    flushed: Mutex<bool>,
}

impl MemoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EtlEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn was_flushed(&self) -> bool {
        self.flushed.lock().map(|f| *f).unwrap_or(false)
    }
}

impl EtlObserver for MemoryObserver {
    fn on_event(&self, event: &EtlEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn flush(&self) {
        if let Ok(mut flushed) = self.flushed.lock() {
            *flushed = true;
        }
    }
}
