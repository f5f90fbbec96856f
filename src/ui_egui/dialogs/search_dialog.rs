//! Lecture search dialog
//!
//! Opened by an add request from a grid cell or a table's "Add lecture"
//! button. The user picks a lecture, day, start slot, span and room; the
//! result is handed back as a [`PlacementRequest`].

use egui::RichText;

use crate::models::schedule::SlotRange;
use crate::models::time_grid::{Day, TimeSlot, SLOT_COUNT};
use crate::services::catalog::LectureCatalog;
use crate::services::interaction::{AddRequest, PlacementRequest, SearchCollaborator};

const DEFAULT_SPAN: u8 = 2;

/// State for the search dialog
pub struct SearchDialogState {
    request: Option<AddRequest>,
    pub query: String,
    pub selected: Option<String>,
    pub day: Day,
    pub start: u8,
    pub span: u8,
    pub room: String,
    error: Option<String>,
}

impl Default for SearchDialogState {
    fn default() -> Self {
        Self {
            request: None,
            query: String::new(),
            selected: None,
            day: Day::Mon,
            start: TimeSlot::FIRST.index(),
            span: DEFAULT_SPAN,
            room: String::new(),
            error: None,
        }
    }
}

impl SearchCollaborator for SearchDialogState {
    fn request_placement(&mut self, request: AddRequest) {
        log::debug!(
            "Search requested for {} at {:?}",
            request.table_id,
            request.cell
        );
        if let Some(cell) = request.cell {
            self.day = cell.day;
            self.start = cell.slot.index();
        }
        self.error = None;
        self.request = Some(request);
    }
}

impl SearchDialogState {
    pub fn is_open(&self) -> bool {
        self.request.is_some()
    }

    pub fn close(&mut self) {
        self.request = None;
        self.error = None;
    }

    /// Turn the current form into a placement for the requesting table
    pub fn build_request(&self, catalog: &LectureCatalog) -> Result<PlacementRequest, String> {
        let request = self
            .request
            .as_ref()
            .ok_or_else(|| "No table is waiting for a lecture".to_string())?;
        let id = self
            .selected
            .as_deref()
            .ok_or_else(|| "Select a lecture first".to_string())?;
        let lecture = catalog
            .get(id)
            .ok_or_else(|| format!("Lecture {} is not in the catalog", id))?;
        let start = TimeSlot::new(self.start).map_err(|err| err.to_string())?;
        let range = SlotRange::new(start, self.span).map_err(|err| err.to_string())?;

        Ok(PlacementRequest {
            table_id: request.table_id.clone(),
            day: self.day,
            range,
            room: self.room.trim().to_string(),
            lecture,
        })
    }

    /// Render the dialog; yields a placement when the user confirms one
    pub fn render(&mut self, ctx: &egui::Context, catalog: &LectureCatalog) -> Option<PlacementRequest> {
        let Some(request) = &self.request else {
            return None;
        };
        let title = format!("Add lecture to {}", request.table_id);

        let mut open = true;
        let mut add_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new(title)
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .min_width(360.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Search:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .hint_text("Title, code or major..."),
                    );
                    if ui.button("Clear").clicked() {
                        self.query.clear();
                    }
                });

                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height(200.0)
                    .show(ui, |ui| {
                        let mut found = 0;
                        for lecture in catalog.search(&self.query) {
                            found += 1;
                            let is_selected = self.selected.as_deref() == Some(lecture.id.as_str());
                            let mut text = format!("{}  {}", lecture.id, lecture.title);
                            if let Some(credits) = &lecture.credits {
                                text.push_str(&format!("  ({} cr)", credits));
                            }
                            if ui.selectable_label(is_selected, text).clicked() {
                                self.selected = Some(lecture.id.clone());
                            }
                        }
                        if found == 0 {
                            ui.label(RichText::new("No lectures found").italics());
                        }
                    });

                ui.separator();

                egui::Grid::new("search_dialog_placement")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Day");
                        egui::ComboBox::from_id_source("search_dialog_day")
                            .selected_text(self.day.label())
                            .show_ui(ui, |ui| {
                                for day in Day::ALL {
                                    ui.selectable_value(&mut self.day, day, day.label());
                                }
                            });
                        ui.end_row();

                        ui.label("Start");
                        let start_label = TimeSlot::new(self.start)
                            .map(|slot| slot.row_label())
                            .unwrap_or_default();
                        ui.horizontal(|ui| {
                            ui.add(egui::Slider::new(&mut self.start, 1..=SLOT_COUNT));
                            ui.label(start_label);
                        });
                        ui.end_row();

                        ui.label("Periods");
                        let max_span = SLOT_COUNT - self.start + 1;
                        ui.add(egui::Slider::new(&mut self.span, 1..=max_span));
                        ui.end_row();

                        ui.label("Room");
                        ui.text_edit_singleline(&mut self.room);
                        ui.end_row();
                    });

                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(197, 48, 48), error);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        add_clicked = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel_clicked = true;
                    }
                });
            });

        if !open || cancel_clicked {
            self.close();
            return None;
        }
        if !add_clicked {
            return None;
        }

        match self.build_request(catalog) {
            Ok(placement) => {
                self.close();
                Some(placement)
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}
