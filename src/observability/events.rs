//! Observability events for tabledb
//!
//! Events are explicit and typed. Each one renders as a stable
//! SCREAMING_SNAKE_CASE name in the log stream.

use std::fmt;

/// Observable events in tabledb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Listening for HTTP requests
    ServerListening,
    /// Shutdown signal received
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,
    /// Server could not start (FATAL)
    ServerFailed,

    // Database lifecycle
    /// Database created
    DatabaseCreated,
    /// Database renamed
    DatabaseRenamed,
    /// Database discarded
    DatabaseDeleted,

    // Tables
    /// Table appended
    TableAdded,
    /// Table renamed
    TableRenamed,
    /// Table removed
    TableDeleted,

    // Columns
    /// Column appended to a table and to every row
    ColumnAdded,
    /// Column renamed
    ColumnRenamed,
    /// Column removed from a table and from every row
    ColumnDeleted,

    // Rows and cells
    /// Row appended
    RowAdded,
    /// Row replaced
    RowUpdated,
    /// Row removed
    RowDeleted,
    /// Single cell replaced
    CellUpdated,

    // Reads
    /// Projection built
    ProjectionBuilt,

    // Rejections
    /// An operation failed validation and changed nothing
    OperationRejected,

    // HTTP
    /// HTTP request handled
    HttpRequest,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ServerFailed => "SERVER_FAILED",

            Event::DatabaseCreated => "DATABASE_CREATED",
            Event::DatabaseRenamed => "DATABASE_RENAMED",
            Event::DatabaseDeleted => "DATABASE_DELETED",

            Event::TableAdded => "TABLE_ADDED",
            Event::TableRenamed => "TABLE_RENAMED",
            Event::TableDeleted => "TABLE_DELETED",

            Event::ColumnAdded => "COLUMN_ADDED",
            Event::ColumnRenamed => "COLUMN_RENAMED",
            Event::ColumnDeleted => "COLUMN_DELETED",

            Event::RowAdded => "ROW_ADDED",
            Event::RowUpdated => "ROW_UPDATED",
            Event::RowDeleted => "ROW_DELETED",
            Event::CellUpdated => "CELL_UPDATED",

            Event::ProjectionBuilt => "PROJECTION_BUILT",

            Event::OperationRejected => "OPERATION_REJECTED",

            Event::HttpRequest => "HTTP_REQUEST",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ServerFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [Event; 22] = [
        Event::BootStart,
        Event::ConfigLoaded,
        Event::ServerListening,
        Event::ShutdownStart,
        Event::ShutdownComplete,
        Event::ServerFailed,
        Event::DatabaseCreated,
        Event::DatabaseRenamed,
        Event::DatabaseDeleted,
        Event::TableAdded,
        Event::TableRenamed,
        Event::TableDeleted,
        Event::ColumnAdded,
        Event::ColumnRenamed,
        Event::ColumnDeleted,
        Event::RowAdded,
        Event::RowUpdated,
        Event::RowDeleted,
        Event::CellUpdated,
        Event::ProjectionBuilt,
        Event::OperationRejected,
        Event::HttpRequest,
    ];

    #[test]
    fn test_event_names_are_unique_screaming_snake() {
        let mut seen = HashSet::new();
        for event in ALL {
            let s = event.as_str();
            assert!(seen.insert(s), "duplicate event name {}", s);
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_only_server_failure_is_fatal() {
        for event in ALL {
            assert_eq!(event.is_fatal(), event == Event::ServerFailed);
        }
    }
}
