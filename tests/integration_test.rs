// Integration tests for table editing, drag placement and settings
mod fixtures;

use fixtures::{block, lectures, slot};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use timetable_planner::error::TimetableError;
use timetable_planner::models::settings::GridSettings;
use timetable_planner::models::time_grid::{Day, GridGeometry, PointerDelta};
use timetable_planner::services::catalog::LectureCatalog;
use timetable_planner::services::color::Palette;
use timetable_planner::services::drag::{DragId, DragSession};
use timetable_planner::services::interaction::{
    AddRequest, GridEvent, InteractionRouter, PendingDelete, PlacementRequest, Routed,
    SearchCollaborator,
};
use timetable_planner::services::settings::SettingsService;
use timetable_planner::services::tables::TableCollection;

/// Records forwarded add requests
#[derive(Default)]
struct RecordingSearch {
    requests: Vec<AddRequest>,
}

impl SearchCollaborator for RecordingSearch {
    fn request_placement(&mut self, request: AddRequest) {
        self.requests.push(request);
    }
}

#[test]
fn test_duplicate_then_delete_leaves_copy_untouched() {
    let mut tables = TableCollection::new();
    let first = tables.ids()[0].clone();

    let t1 = tables.add_table();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables.ids(), vec![first.clone(), t1.clone()]);

    tables
        .append_schedule(&t1, block(Day::Mon, 1, 2, "101", lectures::algorithms()))
        .expect("append to existing table");
    assert_eq!(tables.len(), 2);
    assert_eq!(tables.schedules(&t1).unwrap().len(), 1);

    let t2 = tables.duplicate_table(&t1).expect("duplicate existing table");
    assert_eq!(tables.len(), 3);
    assert_eq!(tables.ids(), vec![first.clone(), t1.clone(), t2.clone()]);

    let removed = tables
        .remove_schedule_at(&t1, Day::Mon, slot(1))
        .expect("table exists");
    assert_eq!(removed, 1);
    assert_eq!(tables.len(), 3);
    assert!(tables.schedules(&first).unwrap().is_empty());

    assert!(tables.schedules(&t1).unwrap().is_empty());
    let copy = tables.schedules(&t2).unwrap();
    assert_eq!(copy.len(), 1);
    assert_eq!(copy[0].day, Day::Mon);
    assert_eq!(copy[0].range.to_indices(), vec![1, 2]);
    assert_eq!(copy[0].room, "101");
    assert_eq!(copy[0].lecture.title, "Algo");
}

#[test]
fn test_drag_token_round_trip_moves_one_day() {
    let mut tables = TableCollection::new();
    let t1 = tables.ids()[0].clone();
    tables
        .append_schedule(&t1, block(Day::Mon, 3, 2, "101", lectures::algorithms()))
        .unwrap();

    let geometry = GridGeometry::default();
    let token = DragId::new(t1.clone(), 0).encode();
    assert_eq!(token, format!("{}:0", t1));

    let mut session = DragSession::new();
    assert!(session.begin(DragId::decode(&token).unwrap()));
    assert_eq!(tables.active_table_id(&session), Some(&t1));

    let outcome = session
        .end_token(&token, PointerDelta::new(82.0, -4.0), &mut tables, &geometry)
        .expect("drop applies");
    assert!(outcome.moved());
    assert!(!session.is_active());

    let moved = tables.schedule(&t1, 0).unwrap();
    assert_eq!(moved.day, Day::Tue);
    assert_eq!(moved.range.to_indices(), vec![3, 4]);
}

#[test]
fn test_block_geometry_matches_grid() {
    let geometry = GridGeometry::default();
    let placed = block(Day::Wed, 5, 3, "B1", lectures::calculus());
    let rect = geometry.block_rect(placed.day, &placed.range);

    assert_eq!(rect.height, 3.0 * 30.0 - 1.0);
    assert_eq!(rect.top, 40.0 + 4.0 * 30.0 + 1.0);
    assert_eq!(rect.left, 120.0 + 2.0 * 80.0 + 1.0);
    assert_eq!(rect.width, 80.0 - 1.0);
}

#[test]
fn test_cell_click_to_placement_flow() {
    let mut tables = TableCollection::new();
    let t1 = tables.ids()[0].clone();
    let catalog = LectureCatalog::built_in();
    let mut search = RecordingSearch::default();

    let routed = InteractionRouter::route(
        GridEvent::cell_clicked(t1.clone(), Day::Thu, slot(19)),
        &mut tables,
        &mut search,
    )
    .unwrap();
    assert_eq!(routed, Routed::Forwarded);
    assert_eq!(search.requests.len(), 1);

    let request = &search.requests[0];
    let cell = request.cell.expect("cell click carries its cell");
    let placement = PlacementRequest {
        table_id: request.table_id.clone(),
        day: cell.day,
        range: timetable_planner::models::schedule::SlotRange::new(cell.slot, 2).unwrap(),
        room: "Lab 3".to_string(),
        lecture: catalog.get("CS320").unwrap(),
    };
    let index = placement.apply(&mut tables).unwrap();

    let placed = tables.schedule(&t1, index).unwrap();
    assert!(placed.range.start().is_evening());
    assert_eq!(placed.lecture.title, "Operating Systems");
}

#[test]
fn test_confirmed_delete_removes_overlapping_blocks() {
    let mut tables = TableCollection::new();
    let t1 = tables.ids()[0].clone();
    tables
        .append_schedule(&t1, block(Day::Fri, 2, 3, "A", lectures::algorithms()))
        .unwrap();
    tables
        .append_schedule(&t1, block(Day::Fri, 2, 1, "B", lectures::writing()))
        .unwrap();
    tables
        .append_schedule(&t1, block(Day::Sat, 2, 1, "C", lectures::writing()))
        .unwrap();

    let mut pending = PendingDelete::default();
    pending.open(t1.clone(), 0);
    let event = pending.accept(&tables).unwrap();

    let mut search = RecordingSearch::default();
    let routed = InteractionRouter::route(event, &mut tables, &mut search).unwrap();
    assert_eq!(routed, Routed::Removed(2));

    let left = tables.schedules(&t1).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].day, Day::Sat);
}

#[test]
fn test_last_table_cannot_be_removed() {
    let mut tables = TableCollection::new();
    let only = tables.ids()[0].clone();

    assert!(!tables.can_remove_table());
    assert_eq!(tables.remove_table(&only), Err(TimetableError::LastTable));
    assert_eq!(tables.len(), 1);
}

#[test]
fn test_colors_follow_first_appearance() {
    let mut tables = TableCollection::new();
    let t1 = tables.ids()[0].clone();
    for lecture in [lectures::calculus(), lectures::algorithms(), lectures::calculus()] {
        tables
            .append_schedule(&t1, block(Day::Mon, 1, 1, "", lecture))
            .unwrap();
    }

    let colors = tables.color_map(&t1, &Palette::default()).unwrap();
    assert_eq!(colors.len(), 2);
    assert_eq!(colors.color_for("L2").as_str(), "#fdd");
    assert_eq!(colors.color_for("L1").as_str(), "#ffd");
    assert_eq!(colors.color_for("missing").as_str(), "#ddd");
}

#[test]
fn test_settings_persistence_feeds_geometry() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let service = SettingsService::new(dir.path().join("config.toml"));

    let settings = GridSettings {
        cell_width: 100.0,
        cell_height: 24.0,
        ..GridSettings::default()
    };
    service.save(&settings).expect("Failed to save settings");

    let loaded = service.load().expect("Failed to load settings");
    let geometry = GridGeometry::from_settings(&loaded);
    assert_eq!(geometry.column_width, 100.0);
    assert_eq!(geometry.row_height, 24.0);
    assert_eq!(geometry.column_base, 120.0);
}
