//! Error types for the timetable core and its configuration layer.
//!
//! Domain operations never panic on bad input: they return a
//! [`TimetableError`] and leave the table collection untouched, so the UI
//! layer can log the refusal and carry on.

use std::path::PathBuf;

use thiserror::Error;

/// Refusals raised by the grid model, the table manager and the drag engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// No table with this id exists in the collection
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// The collection must always keep at least one table
    #[error("Cannot remove the last remaining table")]
    LastTable,

    /// A table exists but has no schedule at the requested position
    #[error("Table {table_id} has no schedule at index {index}")]
    ScheduleIndexOutOfBounds { table_id: String, index: usize },

    /// Slot index outside the fixed weekly grid
    #[error("Time slot {0} is outside the grid")]
    InvalidTimeSlot(i64),

    /// Slot ranges must be non-empty, contiguous and inside the grid
    #[error("Invalid slot range: {0}")]
    InvalidSlotRange(String),

    /// Table ids must be non-empty and free of the drag separator
    #[error("Invalid table id '{0}'")]
    InvalidTableId(String),

    /// Drag token that does not decode to `tableId:index`
    #[error("Malformed drag id '{0}'")]
    MalformedDragId(String),

    #[error("Unknown day '{0}'")]
    UnknownDay(String),

    /// A schedule builder was missing a required field
    #[error("Schedule {0} is required")]
    IncompleteSchedule(&'static str),
}

/// Errors raised while loading or validating configuration and catalogs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Failed to read lecture catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}
