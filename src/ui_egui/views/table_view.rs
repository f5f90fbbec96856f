//! Grid rendering for a single timetable.
//!
//! Draws the header row, the slot label column and every placed block, and
//! turns pointer input into [`TableAction`]s. Nothing is mutated here: the
//! app applies the collected actions once the frame has been laid out.

use egui::{Align2, CursorIcon, FontId, Painter, Pos2, Rect, RichText, Sense, Stroke, Vec2};

use super::palette::{to_color32, GridPalette};
use crate::models::schedule::Schedule;
use crate::models::table::{Table, TableId};
use crate::models::time_grid::{BlockRect, Day, GridGeometry, PointerDelta, TimeSlot};
use crate::services::color::LectureColorMap;
use crate::services::drag::{DragId, DragSession};
use crate::services::interaction::{GridEvent, PendingDelete};

const HEADER_FONT_SIZE: f32 = 13.0;
const LABEL_FONT_SIZE: f32 = 10.5;
const TITLE_FONT_SIZE: f32 = 12.0;
const ROOM_FONT_SIZE: f32 = 10.0;
const BLOCK_PADDING: f32 = 4.0;

/// Something the user did this frame
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    Grid(GridEvent),
    AddTable,
    Duplicate(TableId),
    Remove(TableId),
    DragStarted(DragId),
    /// Pointer travel since the press that started dragging this block
    DragMoved(DragId, PointerDelta),
    DragStopped(DragId),
    BlockClicked { table_id: TableId, index: usize },
    ConfirmDelete,
    DismissDelete,
}

/// Shared inputs for rendering one table
pub(crate) struct TableViewContext<'a> {
    pub geometry: &'a GridGeometry,
    pub palette: &'a GridPalette,
    pub colors: &'a LectureColorMap,
    pub drag: &'a DragSession,
    pub live_delta: PointerDelta,
    pub pending_delete: &'a PendingDelete,
    pub is_drag_source: bool,
}

fn to_screen(origin: Pos2, rect: BlockRect) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(rect.left, rect.top),
        Vec2::new(rect.width, rect.height),
    )
}

fn local_cell(origin: Pos2, pos: Pos2, geometry: &GridGeometry) -> Option<(Day, TimeSlot)> {
    let local = pos - origin;
    geometry.cell_at(local.x, local.y)
}

/// Render one table grid and report what the user did to it.
pub(crate) fn render_table(
    ui: &mut egui::Ui,
    table: &Table,
    view: &TableViewContext<'_>,
) -> Vec<TableAction> {
    let mut actions = Vec::new();
    let geometry = view.geometry;
    let (width, height) = geometry.grid_size();

    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::click());
    let origin = response.rect.min;

    draw_grid(&painter, origin, geometry, view.palette);

    if !view.drag.is_active() {
        if let Some((day, slot)) = response
            .hover_pos()
            .and_then(|pos| local_cell(origin, pos, geometry))
        {
            let cell = to_screen(origin, geometry.cell_rect(day, slot)).shrink(1.0);
            painter.rect_filled(cell, 0.0, view.palette.hover_overlay);
            ui.output_mut(|out| out.cursor_icon = CursorIcon::PointingHand);
        }
    }

    if response.clicked() {
        if let Some((day, slot)) = response
            .interact_pointer_pos()
            .and_then(|pos| local_cell(origin, pos, geometry))
        {
            actions.push(TableAction::Grid(GridEvent::cell_clicked(
                table.id.clone(),
                day,
                slot,
            )));
        }
    }

    let mut lifted: Option<(Rect, &Schedule)> = None;

    for (index, schedule) in table.schedules.iter().enumerate() {
        let drag_id = DragId::new(table.id.clone(), index);
        let resting = to_screen(
            origin,
            geometry.block_rect(schedule.day, &schedule.range),
        );
        let block_response = ui.interact(
            resting,
            ui.id().with(("schedule_block", drag_id.encode())),
            Sense::click_and_drag(),
        );

        if block_response.hovered() {
            ui.output_mut(|out| out.cursor_icon = CursorIcon::Grab);
        }
        if block_response.drag_started() {
            actions.push(TableAction::DragStarted(drag_id.clone()));
        }
        if block_response.dragged() {
            // Measured from the press so the threshold movement and the
            // frame the drag starts on both count
            let press_origin = ui.input(|i| i.pointer.press_origin());
            if let (Some(origin), Some(current)) =
                (press_origin, block_response.interact_pointer_pos())
            {
                let travel = PointerDelta::between((origin.x, origin.y), (current.x, current.y));
                actions.push(TableAction::DragMoved(drag_id.clone(), travel));
            }
            ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
            ui.ctx().request_repaint();
        }
        if block_response.drag_stopped() {
            actions.push(TableAction::DragStopped(drag_id.clone()));
        }
        if block_response.clicked() {
            actions.push(TableAction::BlockClicked {
                table_id: table.id.clone(),
                index,
            });
        }

        if view.drag.is_dragging(&drag_id) {
            let live = view
                .drag
                .live_rect(schedule, &drag_id, geometry, view.live_delta);
            lifted = Some((to_screen(origin, live), schedule));
        } else {
            paint_block(&painter, resting, schedule, view, false);
        }

        if view.pending_delete.is_open_for(&table.id, index) {
            render_delete_confirmation(ui, resting, &drag_id, view.palette, &mut actions);
        }
    }

    // The dragged block is painted last so it floats over its neighbours
    if let Some((rect, schedule)) = lifted {
        paint_block(ui.painter(), rect, schedule, view, true);
    }

    if view.is_drag_source {
        painter.rect_stroke(
            response.rect.shrink(1.5),
            0.0,
            Stroke::new(3.0, view.palette.drag_outline),
        );
    }

    actions
}

fn draw_grid(painter: &Painter, origin: Pos2, geometry: &GridGeometry, palette: &GridPalette) {
    let (width, height) = geometry.grid_size();
    let border = Stroke::new(1.0, palette.border);
    let whole = Rect::from_min_size(origin, Vec2::new(width, height));

    painter.rect_filled(whole, 0.0, palette.cell_bg);

    // Header row
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, geometry.row_base)),
        0.0,
        palette.header_bg,
    );
    painter.text(
        origin + Vec2::new(geometry.column_base / 2.0, geometry.row_base / 2.0),
        Align2::CENTER_CENTER,
        "Period",
        FontId::proportional(HEADER_FONT_SIZE),
        palette.header_text,
    );
    for day in Day::ALL {
        let left = geometry.column_left(day);
        painter.text(
            origin + Vec2::new(left + geometry.column_width / 2.0, geometry.row_base / 2.0),
            Align2::CENTER_CENTER,
            day.label(),
            FontId::proportional(HEADER_FONT_SIZE),
            palette.header_text,
        );
        painter.line_segment(
            [
                origin + Vec2::new(left, 0.0),
                origin + Vec2::new(left, height),
            ],
            border,
        );
    }

    // Slot rows
    for slot in TimeSlot::all() {
        let top = geometry.row_top(slot);
        let label_rect = Rect::from_min_size(
            origin + Vec2::new(0.0, top),
            Vec2::new(geometry.column_base, geometry.row_height),
        );

        if slot.is_evening() {
            painter.rect_filled(label_rect, 0.0, palette.evening_label_bg);
            painter.rect_filled(
                Rect::from_min_size(
                    origin + Vec2::new(geometry.column_base, top),
                    Vec2::new(width - geometry.column_base, geometry.row_height),
                ),
                0.0,
                palette.evening_cell_bg,
            );
        } else {
            painter.rect_filled(label_rect, 0.0, palette.label_bg);
        }

        painter.text(
            label_rect.center(),
            Align2::CENTER_CENTER,
            slot.row_label(),
            FontId::proportional(LABEL_FONT_SIZE),
            palette.label_text,
        );
        painter.line_segment(
            [origin + Vec2::new(0.0, top), origin + Vec2::new(width, top)],
            border,
        );
    }

    painter.rect_stroke(whole, 0.0, border);
}

fn paint_block(
    painter: &Painter,
    rect: Rect,
    schedule: &Schedule,
    view: &TableViewContext<'_>,
    lifted: bool,
) {
    let fill = to_color32(view.colors.color_for(schedule.lecture_id()));
    painter.rect_filled(rect, 2.0, fill);
    if lifted {
        painter.rect_stroke(rect, 2.0, Stroke::new(1.5, view.palette.drag_outline));
    }

    let text = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    let text_origin = rect.left_top() + Vec2::splat(BLOCK_PADDING);
    text.text(
        text_origin,
        Align2::LEFT_TOP,
        &schedule.lecture.title,
        FontId::proportional(TITLE_FONT_SIZE),
        view.palette.block_text,
    );
    text.text(
        text_origin + Vec2::new(0.0, TITLE_FONT_SIZE + 4.0),
        Align2::LEFT_TOP,
        &schedule.room,
        FontId::proportional(ROOM_FONT_SIZE),
        view.palette.block_text,
    );
}

/// Popover next to a clicked block asking whether to delete it
fn render_delete_confirmation(
    ui: &egui::Ui,
    anchor: Rect,
    drag_id: &DragId,
    palette: &GridPalette,
    actions: &mut Vec<TableAction>,
) {
    egui::Area::new(ui.id().with(("delete_confirm", drag_id.encode())))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor.right_top() + Vec2::new(6.0, 0.0))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label("Delete this lecture?");
                ui.horizontal(|ui| {
                    if ui
                        .button(RichText::new("Delete").color(palette.delete_text))
                        .clicked()
                    {
                        actions.push(TableAction::ConfirmDelete);
                    }
                    if ui.button("Cancel").clicked() {
                        actions.push(TableAction::DismissDelete);
                    }
                });
            });
        });
}
