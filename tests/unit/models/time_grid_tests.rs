// Unit tests for the weekly time grid
// Slot timing, day parsing and pixel-to-cell resolution

use pretty_assertions::assert_eq;
use test_case::test_case;
use timetable_planner::models::time_grid::{Day, GridGeometry, TimeSlot, DAYTIME_SLOT_COUNT, SLOT_COUNT};

#[test_case(1, "09:00~09:30" ; "first daytime slot")]
#[test_case(2, "09:30~10:00" ; "second daytime slot")]
#[test_case(18, "17:30~18:00" ; "last daytime slot")]
#[test_case(19, "18:00~18:50" ; "first evening slot")]
#[test_case(20, "18:55~19:45" ; "second evening slot")]
#[test_case(24, "22:35~23:25" ; "last evening slot")]
fn test_slot_labels(index: u8, expected: &str) {
    assert_eq!(TimeSlot::new(index).unwrap().label(), expected);
}

#[test_case(0 ; "zero")]
#[test_case(25 ; "past last row")]
fn test_slot_out_of_range_is_rejected(index: u8) {
    assert!(TimeSlot::new(index).is_err());
}

#[test]
fn test_evening_boundary() {
    assert!(!TimeSlot::new(DAYTIME_SLOT_COUNT).unwrap().is_evening());
    assert!(TimeSlot::new(DAYTIME_SLOT_COUNT + 1).unwrap().is_evening());
    assert_eq!(TimeSlot::all().count(), SLOT_COUNT as usize);
}

#[test_case("Mon", Day::Mon ; "short")]
#[test_case("sat", Day::Sat ; "lowercase")]
#[test_case("WED", Day::Wed ; "uppercase")]
fn test_day_parses(input: &str, expected: Day) {
    assert_eq!(input.parse::<Day>().unwrap(), expected);
}

#[test]
fn test_unknown_day_is_rejected() {
    assert!("Sun".parse::<Day>().is_err());
}

#[test_case(-3, Day::Mon ; "clamped to first column")]
#[test_case(2, Day::Thu ; "inside the week")]
#[test_case(9, Day::Sat ; "clamped to last column")]
fn test_day_offset_clamped(delta: i64, expected: Day) {
    assert_eq!(Day::Tue.offset_clamped(delta), expected);
}

#[test_case(121.0, 41.0, Some((Day::Mon, 1)) ; "top left cell")]
#[test_case(599.0, 759.0, Some((Day::Sat, 24)) ; "bottom right cell")]
#[test_case(60.0, 100.0, None ; "label column")]
#[test_case(200.0, 20.0, None ; "header row")]
#[test_case(601.0, 100.0, None ; "past last column")]
#[test_case(200.0, 761.0, None ; "past last row")]
fn test_cell_at(x: f32, y: f32, expected: Option<(Day, u8)>) {
    let geometry = GridGeometry::default();
    let resolved = geometry.cell_at(x, y).map(|(day, slot)| (day, slot.index()));
    assert_eq!(resolved, expected);
}
