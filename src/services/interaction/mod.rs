//! Grid interaction events and their routing.
//!
//! The grid view never edits schedules itself. An empty-cell click becomes an
//! [`GridEvent::AddRequested`] that is forwarded to the search collaborator,
//! and a confirmed block deletion becomes a [`GridEvent::DeleteRequested`]
//! applied through the [`TableCollection`].

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::models::lecture::Lecture;
use crate::models::schedule::{Schedule, SlotRange};
use crate::models::table::TableId;
use crate::models::time_grid::{Day, TimeSlot};
use crate::services::tables::TableCollection;

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub day: Day,
    pub slot: TimeSlot,
}

/// Ask the search collaborator for a lecture to place.
///
/// `cell` is `None` when the request came from a table's "add" button
/// rather than from a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRequest {
    pub table_id: TableId,
    pub cell: Option<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    AddRequested(AddRequest),
    DeleteRequested {
        table_id: TableId,
        day: Day,
        slot: TimeSlot,
    },
}

impl GridEvent {
    /// Empty cell clicked
    pub fn cell_clicked(table_id: TableId, day: Day, slot: TimeSlot) -> Self {
        GridEvent::AddRequested(AddRequest {
            table_id,
            cell: Some(GridCell { day, slot }),
        })
    }

    /// "Add" button in a table header
    pub fn add_button(table_id: TableId) -> Self {
        GridEvent::AddRequested(AddRequest {
            table_id,
            cell: None,
        })
    }

    /// Deletion accepted for a placed block; targets its first slot
    pub fn delete_confirmed(table_id: TableId, schedule: &Schedule) -> Self {
        GridEvent::DeleteRequested {
            table_id,
            day: schedule.day,
            slot: schedule.range.start(),
        }
    }
}

/// The external lecture search dialog
#[cfg_attr(test, mockall::automock)]
pub trait SearchCollaborator {
    fn request_placement(&mut self, request: AddRequest);
}

/// Placement resolved by the search collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub table_id: TableId,
    pub day: Day,
    pub range: SlotRange,
    #[serde(default)]
    pub room: String,
    pub lecture: Rc<Lecture>,
}

impl PlacementRequest {
    pub fn into_schedule(self) -> (TableId, Schedule) {
        let schedule = Schedule::new(self.day, self.range, self.room, self.lecture);
        (self.table_id, schedule)
    }

    /// Append the resolved block to its table, returning its index
    pub fn apply(self, tables: &mut TableCollection) -> Result<usize, TimetableError> {
        let (table_id, schedule) = self.into_schedule();
        tables.append_schedule(&table_id, schedule)
    }
}

/// Confirmation affordance shown after clicking a placed block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDelete {
    target: Option<(TableId, usize)>,
}

impl PendingDelete {
    pub fn open(&mut self, table_id: TableId, index: usize) {
        self.target = Some((table_id, index));
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_open_for(&self, table_id: &TableId, index: usize) -> bool {
        matches!(&self.target, Some((id, i)) if id == table_id && *i == index)
    }

    /// Accept the deletion. Yields nothing if the block has since disappeared.
    pub fn accept(&mut self, tables: &TableCollection) -> Option<GridEvent> {
        let (table_id, index) = self.target.take()?;
        let schedule = tables.schedule(&table_id, index)?;
        Some(GridEvent::delete_confirmed(table_id, schedule))
    }

    pub fn dismiss(&mut self) {
        self.target = None;
    }
}

/// What routing did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Forwarded,
    Removed(usize),
}

pub struct InteractionRouter;

impl InteractionRouter {
    pub fn route(
        event: GridEvent,
        tables: &mut TableCollection,
        search: &mut dyn SearchCollaborator,
    ) -> Result<Routed, TimetableError> {
        match event {
            GridEvent::AddRequested(request) => {
                if !tables.contains(&request.table_id) {
                    return Err(TimetableError::UnknownTable(request.table_id.to_string()));
                }
                search.request_placement(request);
                Ok(Routed::Forwarded)
            }
            GridEvent::DeleteRequested {
                table_id,
                day,
                slot,
            } => tables
                .remove_schedule_at(&table_id, day, slot)
                .map(Routed::Removed),
        }
    }
}
