// Time grid module
// Fixed weekly day columns, time-slot rows and their screen geometry

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::models::schedule::SlotRange;
use crate::models::settings::GridSettings;

/// Number of rows in the weekly grid (header row excluded)
pub const SLOT_COUNT: u8 = 24;
/// Rows 1..=18 are half-hour daytime slots, the rest are evening sessions
pub const DAYTIME_SLOT_COUNT: u8 = 18;

const BASE_HOUR: i64 = 9;
const DAYTIME_SLOT_MINUTES: i64 = 30;
const EVENING_SLOT_MINUTES: i64 = 50;
const EVENING_SLOT_STRIDE: i64 = 55;

/// Weekday column of the timetable grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Day {
    /// All columns, left to right
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];

    /// Column index (Mon = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
        }
    }

    /// Move by `delta` columns, stopping at the first or last column
    pub fn offset_clamped(self, delta: i64) -> Day {
        let last = (Self::ALL.len() - 1) as i64;
        let target = (self.index() as i64).saturating_add(delta).clamp(0, last);
        Self::ALL[target as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimetableError::UnknownDay(s.to_string()))
    }
}

/// Start and end of one grid row
#[derive(Debug, Clone)]
struct SlotDefinition {
    start: NaiveTime,
    end: NaiveTime,
    label: String,
}

fn slot_table() -> &'static [SlotDefinition] {
    static TABLE: OnceLock<Vec<SlotDefinition>> = OnceLock::new();
    TABLE.get_or_init(build_slot_table)
}

fn build_slot_table() -> Vec<SlotDefinition> {
    let base = NaiveTime::default() + Duration::hours(BASE_HOUR);
    let define = |start: NaiveTime, minutes: i64| {
        let end = start + Duration::minutes(minutes);
        SlotDefinition {
            start,
            end,
            label: format!("{}~{}", start.format("%H:%M"), end.format("%H:%M")),
        }
    };

    let daytime = (0..DAYTIME_SLOT_COUNT as i64).map(|k| {
        define(
            base + Duration::minutes(k * DAYTIME_SLOT_MINUTES),
            DAYTIME_SLOT_MINUTES,
        )
    });

    let evening_base = base + Duration::minutes(DAYTIME_SLOT_COUNT as i64 * DAYTIME_SLOT_MINUTES);
    let evening = (0..(SLOT_COUNT - DAYTIME_SLOT_COUNT) as i64).map(|k| {
        define(
            evening_base + Duration::minutes(k * EVENING_SLOT_STRIDE),
            EVENING_SLOT_MINUTES,
        )
    });

    daytime.chain(evening).collect()
}

/// 1-based row index into the fixed slot table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub const FIRST: TimeSlot = TimeSlot(1);
    pub const LAST: TimeSlot = TimeSlot(SLOT_COUNT);

    pub fn new(index: u8) -> Result<Self, TimetableError> {
        if (1..=SLOT_COUNT).contains(&index) {
            Ok(Self(index))
        } else {
            Err(TimetableError::InvalidTimeSlot(index as i64))
        }
    }

    /// Every slot, top to bottom
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (1..=SLOT_COUNT).map(TimeSlot)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Screen row; row 0 holds the day headers
    pub fn row(self) -> usize {
        self.0 as usize
    }

    /// Evening sessions are drawn with a different background
    pub fn is_evening(self) -> bool {
        self.0 > DAYTIME_SLOT_COUNT
    }

    pub fn start_time(self) -> NaiveTime {
        self.definition().start
    }

    pub fn end_time(self) -> NaiveTime {
        self.definition().end
    }

    /// `HH:MM~HH:MM`
    pub fn label(self) -> &'static str {
        &self.definition().label
    }

    /// Row header text, e.g. `01 (09:00~09:30)`
    pub fn row_label(self) -> String {
        format!("{:02} ({})", self.0, self.label())
    }

    fn definition(self) -> &'static SlotDefinition {
        &slot_table()[(self.0 - 1) as usize]
    }
}

impl TryFrom<u8> for TimeSlot {
    type Error = TimetableError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeSlot> for u8 {
    fn from(slot: TimeSlot) -> Self {
        slot.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen-space translation of the pointer during a drag
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDelta {
    pub dx: f32,
    pub dy: f32,
}

impl PointerDelta {
    pub const ZERO: PointerDelta = PointerDelta { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Total travel from where the pointer was pressed to where it is now
    pub fn between(origin: (f32, f32), current: (f32, f32)) -> Self {
        Self {
            dx: current.0 - origin.0,
            dy: current.1 - origin.1,
        }
    }
}

/// Axis-aligned rectangle relative to the grid's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlockRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BlockRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn translated(&self, delta: PointerDelta) -> Self {
        Self {
            left: self.left + delta.dx,
            top: self.top + delta.dy,
            ..*self
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// Pixel layout of the grid: a label column, a header row, then uniform cells.
///
/// Blocks are inset by `inset` pixels on their top/left edge so the grid
/// border stays visible; that inset is cosmetic and never feeds back into
/// coordinate resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub column_base: f32,
    pub column_width: f32,
    pub row_base: f32,
    pub row_height: f32,
    pub inset: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            column_base: 120.0,
            column_width: 80.0,
            row_base: 40.0,
            row_height: 30.0,
            inset: 1.0,
        }
    }
}

impl GridGeometry {
    pub fn from_settings(settings: &GridSettings) -> Self {
        Self {
            column_base: settings.label_column_width,
            column_width: settings.cell_width,
            row_base: settings.header_height,
            row_height: settings.cell_height,
            inset: settings.border_inset,
        }
    }

    pub fn column_left(&self, day: Day) -> f32 {
        self.column_base + self.column_width * day.index() as f32
    }

    pub fn row_top(&self, slot: TimeSlot) -> f32 {
        self.row_base + self.row_height * (slot.row() - 1) as f32
    }

    /// The undecorated cell at (day, slot)
    pub fn cell_rect(&self, day: Day, slot: TimeSlot) -> BlockRect {
        BlockRect {
            left: self.column_left(day),
            top: self.row_top(slot),
            width: self.column_width,
            height: self.row_height,
        }
    }

    /// Static position of a placed block spanning `range` on `day`
    pub fn block_rect(&self, day: Day, range: &SlotRange) -> BlockRect {
        BlockRect {
            left: self.column_left(day) + self.inset,
            top: self.row_top(range.start()) + self.inset,
            width: self.column_width - self.inset,
            height: self.row_height * range.slot_count() as f32 - self.inset,
        }
    }

    /// Inverse of [`cell_rect`](Self::cell_rect). Header row, label column and
    /// anything past the last row/column resolve to `None`.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(Day, TimeSlot)> {
        if !x.is_finite() || !y.is_finite() || x < self.column_base || y < self.row_base {
            return None;
        }

        let column = ((x - self.column_base) / self.column_width).floor() as usize;
        let row = ((y - self.row_base) / self.row_height).floor() as usize + 1;

        let day = Day::from_index(column)?;
        let slot = u8::try_from(row).ok().and_then(|row| TimeSlot::new(row).ok())?;
        Some((day, slot))
    }

    /// Total width and height including the label column and header row
    pub fn grid_size(&self) -> (f32, f32) {
        (
            self.column_base + self.column_width * Day::ALL.len() as f32,
            self.row_base + self.row_height * SLOT_COUNT as f32,
        )
    }
}
