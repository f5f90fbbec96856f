use crate::models::settings::GridSettings;
use crate::models::table::{Table, TableId};
use crate::models::time_grid::{GridGeometry, PointerDelta};
use crate::services::catalog::LectureCatalog;
use crate::services::color::{LectureColorMap, Palette};
use crate::services::drag::{DragId, DragSession};
use crate::services::interaction::{
    GridEvent, InteractionRouter, PendingDelete, PlacementRequest, Routed,
};
use crate::services::tables::TableCollection;
use crate::ui_egui::dialogs::search_dialog::SearchDialogState;
use crate::ui_egui::views::table_view::{render_table, TableAction, TableViewContext};
use crate::ui_egui::views::GridPalette;

const TABLE_SPACING: f32 = 16.0;

pub struct TimetableApp {
    tables: TableCollection,
    /// Block currently following the pointer
    drag: DragSession,
    /// Pointer travel since the press that started the drag
    live_delta: PointerDelta,
    pending_delete: PendingDelete,
    geometry: GridGeometry,
    palette: Palette,
    grid_palette: GridPalette,
    catalog: LectureCatalog,
    search_dialog: SearchDialogState,
}

impl eframe::App for TimetableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("timetable_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Timetables");
                ui.separator();
                if ui.button("New table").clicked() {
                    actions.push(TableAction::AddTable);
                }
                ui.label(format!("{} table(s)", self.tables.len()));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for (position, table) in self.tables.iter().enumerate() {
                            ui.vertical(|ui| {
                                actions.extend(self.render_table_card(ui, position, table));
                            });
                            ui.add_space(TABLE_SPACING);
                        }
                    });
                });
        });

        if let Some(placement) = self.search_dialog.render(ctx, &self.catalog) {
            self.place(placement);
        }

        self.apply_actions(actions);
        self.handle_pointer_fallbacks(ctx);
    }
}

impl TimetableApp {
    pub fn new(settings: &GridSettings, catalog: LectureCatalog) -> Self {
        let palette = Palette::from_settings(settings).unwrap_or_else(|err| {
            log::warn!("Invalid palette in settings: {}. Using the default.", err);
            Palette::default()
        });

        Self {
            tables: TableCollection::new(),
            drag: DragSession::new(),
            live_delta: PointerDelta::ZERO,
            pending_delete: PendingDelete::default(),
            geometry: GridGeometry::from_settings(settings),
            palette,
            grid_palette: GridPalette::default(),
            catalog,
            search_dialog: SearchDialogState::default(),
        }
    }

    fn render_table_card(
        &self,
        ui: &mut egui::Ui,
        position: usize,
        table: &Table,
    ) -> Vec<TableAction> {
        let mut actions = Vec::new();

        ui.horizontal(|ui| {
            ui.strong(format!("Timetable {}", position + 1));
            if ui.small_button("Add lecture").clicked() {
                actions.push(TableAction::Grid(GridEvent::add_button(table.id.clone())));
            }
            if ui.small_button("Duplicate").clicked() {
                actions.push(TableAction::Duplicate(table.id.clone()));
            }
            let remove = ui
                .add_enabled(
                    self.tables.can_remove_table(),
                    egui::Button::new("Remove").small(),
                )
                .on_disabled_hover_text("At least one timetable must remain");
            if remove.clicked() {
                actions.push(TableAction::Remove(table.id.clone()));
            }
        });

        let colors = LectureColorMap::for_schedules(&table.schedules, &self.palette);
        let view = TableViewContext {
            geometry: &self.geometry,
            palette: &self.grid_palette,
            colors: &colors,
            drag: &self.drag,
            live_delta: self.live_delta,
            pending_delete: &self.pending_delete,
            is_drag_source: self.tables.active_table_id(&self.drag) == Some(&table.id),
        };
        ui.push_id(table.id.as_str(), |ui| {
            actions.extend(render_table(ui, table, &view));
        });

        actions
    }

    fn apply_actions(&mut self, actions: Vec<TableAction>) {
        for action in actions {
            match action {
                TableAction::AddTable => {
                    self.tables.add_table();
                }
                TableAction::Duplicate(id) => {
                    if let Err(err) = self.tables.duplicate_table(&id) {
                        log::warn!("Duplicate refused: {}", err);
                    }
                }
                TableAction::Remove(id) => self.remove_table(&id),
                TableAction::Grid(event) => self.route(event),
                TableAction::DragStarted(id) => {
                    if self.drag.begin(id) {
                        self.live_delta = PointerDelta::ZERO;
                        self.pending_delete.dismiss();
                    }
                }
                TableAction::DragMoved(id, travel) => {
                    if self.drag.is_dragging(&id) {
                        self.live_delta = travel;
                    }
                }
                TableAction::DragStopped(id) => self.finish_drag(&id),
                TableAction::BlockClicked { table_id, index } => {
                    if !self.drag.is_active() {
                        self.pending_delete.open(table_id, index);
                    }
                }
                TableAction::ConfirmDelete => {
                    if let Some(event) = self.pending_delete.accept(&self.tables) {
                        self.route(event);
                    }
                }
                TableAction::DismissDelete => self.pending_delete.dismiss(),
            }
        }
    }

    fn route(&mut self, event: GridEvent) {
        let table_id = match &event {
            GridEvent::AddRequested(request) => request.table_id.clone(),
            GridEvent::DeleteRequested { table_id, .. } => table_id.clone(),
        };

        match InteractionRouter::route(event, &mut self.tables, &mut self.search_dialog) {
            Ok(Routed::Forwarded) => {}
            Ok(Routed::Removed(count)) => {
                log::info!("Removed {} block(s) from {}", count, table_id);
                if count > 0 {
                    self.invalidate_drag_for(&table_id);
                }
            }
            Err(err) => log::warn!("Grid event refused: {}", err),
        }
    }

    fn place(&mut self, placement: PlacementRequest) {
        let lecture = placement.lecture.id.clone();
        let table_id = placement.table_id.clone();
        match placement.apply(&mut self.tables) {
            Ok(index) => log::info!("Placed {} in {} at index {}", lecture, table_id, index),
            Err(err) => log::warn!("Placement refused: {}", err),
        }
    }

    fn remove_table(&mut self, id: &TableId) {
        match self.tables.remove_table(id) {
            Ok(_) => self.invalidate_drag_for(id),
            Err(err) => log::warn!("Remove refused: {}", err),
        }
    }

    /// Block indices in `id` may have shifted; drop any drag or confirmation there
    fn invalidate_drag_for(&mut self, id: &TableId) {
        if self.drag.active().is_some_and(|active| &active.table_id == id) {
            self.drag.cancel();
            self.live_delta = PointerDelta::ZERO;
        }
        self.pending_delete.dismiss();
    }

    fn finish_drag(&mut self, id: &DragId) {
        let delta = std::mem::take(&mut self.live_delta);
        if let Some(outcome) = self.drag.end(id, delta, &mut self.tables, &self.geometry) {
            if outcome.moved() {
                log::info!(
                    "Moved {} to {} {:?}",
                    id,
                    outcome.day,
                    outcome.range.to_indices()
                );
            }
        }
    }

    /// Releases that never reached the block (pointer left the window) and
    /// Escape presses
    fn handle_pointer_fallbacks(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.drag.cancel();
            self.live_delta = PointerDelta::ZERO;
            self.pending_delete.dismiss();
            return;
        }

        if let Some(active) = self.drag.active().cloned() {
            if ctx.input(|i| i.pointer.any_released() || !i.pointer.any_down()) {
                self.finish_drag(&active);
            }
        }
    }
}
