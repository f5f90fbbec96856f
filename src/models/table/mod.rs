// Table module
// One independent weekly timetable and its identifier

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::models::schedule::Schedule;

/// Character reserved for drag tokens (`tableId:index`); never part of a table id
pub const DRAG_ID_SEPARATOR: char = ':';

const GENERATED_ID_PREFIX: &str = "schedule-";

/// Unique identifier of a table within the collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableId(String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Result<Self, TimetableError> {
        let id = id.into();
        if id.trim().is_empty() || id.contains(DRAG_ID_SEPARATOR) {
            return Err(TimetableError::InvalidTableId(id));
        }
        Ok(Self(id))
    }

    /// Id derived from the collection's monotonic counter
    pub(crate) fn generated(sequence: u64) -> Self {
        Self(format!("{GENERATED_ID_PREFIX}{sequence}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TableId {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableId> for String {
    fn from(id: TableId) -> Self {
        id.0
    }
}

/// A named list of placed blocks. Order only affects iteration, never geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub id: TableId,
    pub schedules: Vec<Schedule>,
}

impl Table {
    pub fn new(id: TableId) -> Self {
        Self {
            id,
            schedules: Vec::new(),
        }
    }

    pub fn with_schedules(id: TableId, schedules: Vec<Schedule>) -> Self {
        Self { id, schedules }
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
