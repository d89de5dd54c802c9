//! Metrics registry for tabledb
//!
//! - Counters only (no gauges, no histograms)
//! - Monotonic increase
//! - Reset only on process start
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Metrics registry containing all operational counters
///
/// All counters use atomic operations with Relaxed ordering; each counter is
/// exact, but a snapshot is not a consistent cut across counters.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful store mutations (reads are not counted)
    operations_applied: AtomicU64,
    /// Store operations, reads included, rejected with an error
    operations_rejected: AtomicU64,
    /// Tables created
    tables_created: AtomicU64,
    /// Tables deleted
    tables_deleted: AtomicU64,
    /// Columns created
    columns_created: AtomicU64,
    /// Columns deleted, including those dropped with their table
    columns_deleted: AtomicU64,
    /// Rows created
    rows_created: AtomicU64,
    /// Rows deleted, including those dropped with their table
    rows_deleted: AtomicU64,
    /// Cell writes (single cells and whole-row updates count per cell)
    cells_written: AtomicU64,
    /// Projections built
    projections: AtomicU64,
    /// HTTP requests served
    http_requests: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Operation outcomes

    /// Increment successful operations
    pub fn increment_applied(&self) {
        self.operations_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rejected operations
    pub fn increment_rejected(&self) {
        self.operations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    // Structure

    pub fn increment_tables_created(&self) {
        self.tables_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_tables_deleted(&self, count: u64) {
        self.tables_deleted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_columns_created(&self) {
        self.columns_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_columns_deleted(&self, count: u64) {
        self.columns_deleted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_rows_created(&self) {
        self.rows_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_deleted(&self, count: u64) {
        self.rows_deleted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_cells_written(&self, count: u64) {
        self.cells_written.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_projections(&self) {
        self.projections.fetch_add(1, Ordering::Relaxed);
    }

    // HTTP

    pub fn increment_http_requests(&self) {
        self.http_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            operations_applied: self.operations_applied.load(Ordering::Relaxed),
            operations_rejected: self.operations_rejected.load(Ordering::Relaxed),
            tables_created: self.tables_created.load(Ordering::Relaxed),
            tables_deleted: self.tables_deleted.load(Ordering::Relaxed),
            columns_created: self.columns_created.load(Ordering::Relaxed),
            columns_deleted: self.columns_deleted.load(Ordering::Relaxed),
            rows_created: self.rows_created.load(Ordering::Relaxed),
            rows_deleted: self.rows_deleted.load(Ordering::Relaxed),
            cells_written: self.cells_written.load(Ordering::Relaxed),
            projections: self.projections.load(Ordering::Relaxed),
            http_requests: self.http_requests.load(Ordering::Relaxed),
        }
    }

    /// Get current snapshot of all metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub operations_applied: u64,
    pub operations_rejected: u64,
    pub tables_created: u64,
    pub tables_deleted: u64,
    pub columns_created: u64,
    pub columns_deleted: u64,
    pub rows_created: u64,
    pub rows_deleted: u64,
    pub cells_written: u64,
    pub projections: u64,
    pub http_requests: u64,
}
