// Drag placement engine
//
// Tracks the single active block drag, renders it at a live offset and, on
// drop, snaps the pointer delta to whole days/slots before moving the block.

use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;
use crate::models::schedule::{Schedule, SlotRange};
use crate::models::table::{TableId, DRAG_ID_SEPARATOR};
use crate::models::time_grid::{BlockRect, Day, GridGeometry, PointerDelta};
use crate::services::tables::TableCollection;

/// Identifies one block: the owning table plus its index in that table's list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragId {
    pub table_id: TableId,
    pub index: usize,
}

impl DragId {
    pub fn new(table_id: TableId, index: usize) -> Self {
        Self { table_id, index }
    }

    /// Opaque `tableId:index` token for the UI layer
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.table_id, DRAG_ID_SEPARATOR, self.index)
    }

    /// Split on the first separator. Table ids cannot contain the separator,
    /// so the split is unambiguous.
    pub fn decode(token: &str) -> Result<Self, TimetableError> {
        let malformed = || TimetableError::MalformedDragId(token.to_string());

        let (table, index) = token.split_once(DRAG_ID_SEPARATOR).ok_or_else(malformed)?;
        let table_id = TableId::new(table).map_err(|_| malformed())?;
        let index = index.parse::<usize>().map_err(|_| malformed())?;
        Ok(Self { table_id, index })
    }
}

impl fmt::Display for DragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for DragId {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

/// Result of a completed drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from_day: Day,
    pub from_range: SlotRange,
    pub day: Day,
    pub range: SlotRange,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        self.from_day != self.day || self.from_range != self.range
    }
}

/// Snap a pixel delta to whole (day, slot) steps, rounding to nearest
pub fn resolve_delta(delta: PointerDelta, geometry: &GridGeometry) -> (i64, i64) {
    let snap = |pixels: f32, step: f32| {
        if !pixels.is_finite() || step <= 0.0 {
            0
        } else {
            (pixels / step).round() as i64
        }
    };

    (
        snap(delta.dx, geometry.column_width),
        snap(delta.dy, geometry.row_height),
    )
}

/// Transient pointer-drag state; at most one block is dragged at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    active: Option<DragId>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&DragId> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_dragging(&self, id: &DragId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// Start dragging `id`. Ignored (returns false) while another drag is active.
    pub fn begin(&mut self, id: DragId) -> bool {
        if let Some(current) = &self.active {
            log::debug!("Ignoring drag of {} while {} is active", id, current);
            return false;
        }

        log::debug!("Drag started for {}", id);
        self.active = Some(id);
        true
    }

    /// Where `schedule` should be drawn this frame. The dragged block follows
    /// the pointer; its stored coordinates stay untouched until drop.
    pub fn live_rect(
        &self,
        schedule: &Schedule,
        id: &DragId,
        geometry: &GridGeometry,
        pointer_delta: PointerDelta,
    ) -> BlockRect {
        let rect = geometry.block_rect(schedule.day, &schedule.range);
        if self.is_dragging(id) {
            rect.translated(pointer_delta)
        } else {
            rect
        }
    }

    /// Finish the drag of `id`, applying the snapped delta to the block.
    ///
    /// The session is always cleared. Nothing moves when `id` is not the
    /// active drag or no longer names an existing block; out-of-grid targets
    /// are clamped to the nearest edge.
    pub fn end(
        &mut self,
        id: &DragId,
        final_delta: PointerDelta,
        tables: &mut TableCollection,
        geometry: &GridGeometry,
    ) -> Option<MoveOutcome> {
        let active = self.active.take();
        if active.as_ref() != Some(id) {
            log::warn!(
                "Drop for {} does not match active drag {:?}; ignoring",
                id,
                active.map(|a| a.encode())
            );
            return None;
        }

        let Some(schedule) = tables.schedule(&id.table_id, id.index) else {
            log::warn!("Drop for {} refers to no schedule; ignoring", id);
            return None;
        };

        let (day_delta, slot_delta) = resolve_delta(final_delta, geometry);
        let outcome = MoveOutcome {
            from_day: schedule.day,
            from_range: schedule.range,
            day: schedule.day.offset_clamped(day_delta),
            range: schedule.range.shifted_clamped(slot_delta),
        };

        if let Err(err) = tables.move_schedule(&id.table_id, id.index, outcome.day, outcome.range) {
            log::warn!("Failed to move {}: {}", id, err);
            return None;
        }

        log::debug!(
            "Drag finished for {}: {} {:?} -> {} {:?}",
            id,
            outcome.from_day,
            outcome.from_range.to_indices(),
            outcome.day,
            outcome.range.to_indices()
        );
        Some(outcome)
    }

    /// Decode a UI token and finish that drag; malformed tokens only clear the session
    pub fn end_token(
        &mut self,
        token: &str,
        final_delta: PointerDelta,
        tables: &mut TableCollection,
        geometry: &GridGeometry,
    ) -> Option<MoveOutcome> {
        match DragId::decode(token) {
            Ok(id) => self.end(&id, final_delta, tables, geometry),
            Err(err) => {
                log::warn!("{}", err);
                self.active = None;
                None
            }
        }
    }

    /// Abandon the drag without touching any block
    pub fn cancel(&mut self) {
        if let Some(id) = self.active.take() {
            log::debug!("Drag cancelled for {}", id);
        }
    }
}
