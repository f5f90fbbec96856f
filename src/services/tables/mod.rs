// Table collection service
// Owns every timetable for the session and applies add/duplicate/remove edits

use crate::error::TimetableError;
use crate::models::schedule::{Schedule, SlotRange};
use crate::models::table::{Table, TableId};
use crate::models::time_grid::{Day, TimeSlot};
use crate::services::color::{LectureColorMap, Palette};
use crate::services::drag::DragSession;

/// Ordered set of tables, always holding at least one.
///
/// Every mutating operation either succeeds completely or returns an error
/// with the collection unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCollection {
    tables: Vec<Table>,
    next_id: u64,
}

impl Default for TableCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCollection {
    /// A collection with one empty table
    pub fn new() -> Self {
        let mut collection = Self {
            tables: Vec::new(),
            next_id: 1,
        };
        let id = collection.generate_id();
        collection.tables.push(Table::new(id));
        collection
    }

    /// Build from existing tables; ids must be unique and the list non-empty
    pub fn from_tables(tables: Vec<Table>) -> Result<Self, TimetableError> {
        if tables.is_empty() {
            return Err(TimetableError::LastTable);
        }
        for (i, table) in tables.iter().enumerate() {
            if tables[..i].iter().any(|other| other.id == table.id) {
                return Err(TimetableError::InvalidTableId(format!(
                    "{} (duplicate)",
                    table.id
                )));
            }
        }

        Ok(Self {
            next_id: tables.len() as u64 + 1,
            tables,
        })
    }

    fn generate_id(&mut self) -> TableId {
        loop {
            let candidate = TableId::generated(self.next_id);
            self.next_id += 1;
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Never true for a collection built through the public API
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn ids(&self) -> Vec<TableId> {
        self.tables.iter().map(|table| table.id.clone()).collect()
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.tables.iter().any(|table| &table.id == id)
    }

    pub fn get(&self, id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|table| &table.id == id)
    }

    fn get_mut(&mut self, id: &TableId) -> Result<&mut Table, TimetableError> {
        self.tables
            .iter_mut()
            .find(|table| &table.id == id)
            .ok_or_else(|| TimetableError::UnknownTable(id.to_string()))
    }

    /// Display position (0-based) of a table
    pub fn position(&self, id: &TableId) -> Option<usize> {
        self.tables.iter().position(|table| &table.id == id)
    }

    pub fn schedules(&self, id: &TableId) -> Option<&[Schedule]> {
        self.get(id).map(|table| table.schedules.as_slice())
    }

    pub fn schedule(&self, id: &TableId, index: usize) -> Option<&Schedule> {
        self.schedules(id).and_then(|schedules| schedules.get(index))
    }

    /// Whether "remove table" should be offered at all
    pub fn can_remove_table(&self) -> bool {
        self.tables.len() > 1
    }

    pub fn add_table(&mut self) -> TableId {
        let id = self.generate_id();
        log::info!("Added table {}", id);
        self.tables.push(Table::new(id.clone()));
        id
    }

    /// Copy a table's schedules into a new table appended at the end
    pub fn duplicate_table(&mut self, source: &TableId) -> Result<TableId, TimetableError> {
        let schedules = self
            .get(source)
            .ok_or_else(|| TimetableError::UnknownTable(source.to_string()))?
            .schedules
            .clone();

        let id = self.generate_id();
        log::info!(
            "Duplicated table {} into {} ({} schedules)",
            source,
            id,
            schedules.len()
        );
        self.tables.push(Table::with_schedules(id.clone(), schedules));
        Ok(id)
    }

    pub fn remove_table(&mut self, id: &TableId) -> Result<Table, TimetableError> {
        let position = self
            .position(id)
            .ok_or_else(|| TimetableError::UnknownTable(id.to_string()))?;
        if !self.can_remove_table() {
            return Err(TimetableError::LastTable);
        }

        log::info!("Removed table {}", id);
        Ok(self.tables.remove(position))
    }

    /// Append a schedule, returning its index within the table
    pub fn append_schedule(
        &mut self,
        id: &TableId,
        schedule: Schedule,
    ) -> Result<usize, TimetableError> {
        let table = self.get_mut(id)?;
        log::debug!(
            "Placing {} on {} {:?} in table {}",
            schedule.lecture.title,
            schedule.day,
            schedule.range.to_indices(),
            id
        );
        table.schedules.push(schedule);
        Ok(table.schedules.len() - 1)
    }

    /// Remove every schedule on `day` whose range contains `slot`.
    ///
    /// Overlapping blocks are allowed, so this can remove more than one entry.
    /// Returns how many were removed.
    pub fn remove_schedule_at(
        &mut self,
        id: &TableId,
        day: Day,
        slot: TimeSlot,
    ) -> Result<usize, TimetableError> {
        let table = self.get_mut(id)?;
        let before = table.schedules.len();
        table
            .schedules
            .retain(|schedule| !schedule.occupies(day, slot));
        let removed = before - table.schedules.len();

        if removed == 0 {
            log::warn!("No schedule at {} slot {} in table {}", day, slot, id);
        }
        Ok(removed)
    }

    /// Relocate one schedule; range length is preserved by the caller
    pub fn move_schedule(
        &mut self,
        id: &TableId,
        index: usize,
        day: Day,
        range: SlotRange,
    ) -> Result<(), TimetableError> {
        let table = self.get_mut(id)?;
        let schedule = table.schedules.get_mut(index).ok_or_else(|| {
            TimetableError::ScheduleIndexOutOfBounds {
                table_id: id.to_string(),
                index,
            }
        })?;

        schedule.day = day;
        schedule.range = range;
        Ok(())
    }

    /// Table currently highlighted as the drag source, if any
    pub fn active_table_id(&self, session: &DragSession) -> Option<&TableId> {
        let active = session.active()?;
        self.get(&active.table_id).map(|table| &table.id)
    }

    /// Colours for one table, derived from its current schedules
    pub fn color_map(&self, id: &TableId, palette: &Palette) -> Option<LectureColorMap> {
        self.schedules(id)
            .map(|schedules| LectureColorMap::for_schedules(schedules, palette))
    }
}
