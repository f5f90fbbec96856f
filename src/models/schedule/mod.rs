// Schedule module
// A lecture block placed on one day over a contiguous run of slots

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::models::lecture::Lecture;
use crate::models::time_grid::{Day, TimeSlot, SLOT_COUNT};

/// Non-empty, contiguous run of slots inside the grid.
///
/// Stored as start + length so contiguity holds by construction; the list
/// form (`[3, 4, 5]`) is only used at serialization boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct SlotRange {
    start: TimeSlot,
    count: u8,
}

impl SlotRange {
    pub fn new(start: TimeSlot, count: u8) -> Result<Self, TimetableError> {
        if count == 0 {
            return Err(TimetableError::InvalidSlotRange(
                "range must cover at least one slot".to_string(),
            ));
        }

        let last = start.index() as u16 + count as u16 - 1;
        if last > SLOT_COUNT as u16 {
            return Err(TimetableError::InvalidSlotRange(format!(
                "slots {}..={} run past the last row ({})",
                start, last, SLOT_COUNT
            )));
        }

        Ok(Self { start, count })
    }

    pub fn single(slot: TimeSlot) -> Self {
        Self {
            start: slot,
            count: 1,
        }
    }

    /// Build from an explicit list of slot indices, which must be strictly
    /// increasing by one.
    pub fn from_indices(indices: &[u8]) -> Result<Self, TimetableError> {
        let (&first, rest) = indices.split_first().ok_or_else(|| {
            TimetableError::InvalidSlotRange("range must cover at least one slot".to_string())
        })?;

        let mut previous = first;
        for &index in rest {
            if index != previous.wrapping_add(1) || index < previous {
                return Err(TimetableError::InvalidSlotRange(format!(
                    "slots {:?} are not contiguous",
                    indices
                )));
            }
            previous = index;
        }

        let count = u8::try_from(indices.len()).map_err(|_| {
            TimetableError::InvalidSlotRange(format!("{} slots exceed the grid", indices.len()))
        })?;
        Self::new(TimeSlot::new(first)?, count)
    }

    pub fn start(&self) -> TimeSlot {
        self.start
    }

    /// Last slot covered by the range
    pub fn end(&self) -> TimeSlot {
        TimeSlot::new(self.start.index() + self.count - 1).unwrap_or(TimeSlot::LAST)
    }

    pub fn slot_count(&self) -> usize {
        self.count as usize
    }

    pub fn contains(&self, slot: TimeSlot) -> bool {
        slot >= self.start && slot <= self.end()
    }

    pub fn slots(&self) -> impl Iterator<Item = TimeSlot> {
        let start = self.start.index();
        (start..start + self.count).filter_map(|index| TimeSlot::new(index).ok())
    }

    pub fn to_indices(&self) -> Vec<u8> {
        self.slots().map(TimeSlot::index).collect()
    }

    /// Shift by `delta` rows while keeping the whole range on the grid
    pub fn shifted_clamped(&self, delta: i64) -> Self {
        let last_start = (SLOT_COUNT - self.count + 1) as i64;
        let start = (self.start.index() as i64)
            .saturating_add(delta)
            .clamp(1, last_start) as u8;
        Self {
            start: TimeSlot::new(start).unwrap_or(self.start),
            count: self.count,
        }
    }
}

impl TryFrom<Vec<u8>> for SlotRange {
    type Error = TimetableError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(&indices)
    }
}

impl From<SlotRange> for Vec<u8> {
    fn from(range: SlotRange) -> Self {
        range.to_indices()
    }
}

/// A placed lecture block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub day: Day,
    pub range: SlotRange,
    pub room: String,
    pub lecture: Rc<Lecture>,
}

impl Schedule {
    pub fn new(day: Day, range: SlotRange, room: impl Into<String>, lecture: Rc<Lecture>) -> Self {
        Self {
            day,
            range,
            room: room.into(),
            lecture,
        }
    }

    /// Create a builder for schedules assembled field by field
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::new()
    }

    /// True when this block covers the (day, slot) cell
    pub fn occupies(&self, day: Day, slot: TimeSlot) -> bool {
        self.day == day && self.range.contains(slot)
    }

    pub fn lecture_id(&self) -> &str {
        &self.lecture.id
    }
}

/// Builder for schedules whose fields arrive separately (dialogs, requests)
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    day: Option<Day>,
    range: Option<SlotRange>,
    room: Option<String>,
    lecture: Option<Rc<Lecture>>,
}

impl ScheduleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(mut self, day: Day) -> Self {
        self.day = Some(day);
        self
    }

    pub fn range(mut self, range: SlotRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Set the range from a start slot and a number of slots
    pub fn span(mut self, start: TimeSlot, count: u8) -> Result<Self, TimetableError> {
        self.range = Some(SlotRange::new(start, count)?);
        Ok(self)
    }

    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn lecture(mut self, lecture: Rc<Lecture>) -> Self {
        self.lecture = Some(lecture);
        self
    }

    /// Room defaults to empty; every other field is required
    pub fn build(self) -> Result<Schedule, TimetableError> {
        let day = self.day.ok_or(TimetableError::IncompleteSchedule("day"))?;
        let range = self.range.ok_or(TimetableError::IncompleteSchedule("range"))?;
        let lecture = self
            .lecture
            .ok_or(TimetableError::IncompleteSchedule("lecture"))?;

        Ok(Schedule::new(day, range, self.room.unwrap_or_default(), lecture))
    }
}
