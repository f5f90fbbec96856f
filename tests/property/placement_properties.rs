// Property-based tests for table editing and drag placement
// Random blocks and pointer deltas must never break the grid invariants

use std::rc::Rc;

use proptest::prelude::*;
use timetable_planner::models::lecture::Lecture;
use timetable_planner::models::schedule::{Schedule, SlotRange};
use timetable_planner::models::time_grid::{Day, GridGeometry, PointerDelta, TimeSlot, SLOT_COUNT};
use timetable_planner::services::color::{LectureColorMap, Palette};
use timetable_planner::services::drag::{DragId, DragSession};
use timetable_planner::services::tables::TableCollection;

fn arb_day() -> impl Strategy<Value = Day> {
    (0..Day::ALL.len()).prop_map(|i| Day::ALL[i])
}

fn arb_range() -> impl Strategy<Value = SlotRange> {
    (1..=SLOT_COUNT).prop_flat_map(|start| {
        (Just(start), 1..=(SLOT_COUNT - start + 1)).prop_map(|(start, count)| {
            SlotRange::new(TimeSlot::new(start).unwrap(), count).unwrap()
        })
    })
}

fn arb_schedule() -> impl Strategy<Value = Schedule> {
    (arb_day(), arb_range(), 0..5u8).prop_map(|(day, range, lecture)| {
        let lecture = Rc::new(Lecture::new(format!("L{}", lecture), "Lecture"));
        Schedule::new(day, range, "R", lecture)
    })
}

proptest! {
    /// Property: Editing the original never changes its duplicate
    #[test]
    fn prop_duplicate_is_independent(
        schedules in prop::collection::vec(arb_schedule(), 0..8),
        day in arb_day(),
        slot in 1..=SLOT_COUNT,
    ) {
        let mut tables = TableCollection::new();
        let original = tables.ids()[0].clone();
        for schedule in schedules {
            tables.append_schedule(&original, schedule).unwrap();
        }
        let copy = tables.duplicate_table(&original).unwrap();
        let snapshot = tables.schedules(&copy).unwrap().to_vec();

        tables
            .remove_schedule_at(&original, day, TimeSlot::new(slot).unwrap())
            .unwrap();

        prop_assert_eq!(tables.schedules(&copy).unwrap(), snapshot.as_slice());
    }

    /// Property: Removal takes exactly the blocks covering the cell, in order
    #[test]
    fn prop_remove_schedule_at_is_exact(
        schedules in prop::collection::vec(arb_schedule(), 0..10),
        day in arb_day(),
        slot in 1..=SLOT_COUNT,
    ) {
        let slot = TimeSlot::new(slot).unwrap();
        let mut tables = TableCollection::new();
        let id = tables.ids()[0].clone();
        for schedule in &schedules {
            tables.append_schedule(&id, schedule.clone()).unwrap();
        }

        let expected: Vec<Schedule> = schedules
            .iter()
            .filter(|s| !s.occupies(day, slot))
            .cloned()
            .collect();
        let removed = tables.remove_schedule_at(&id, day, slot).unwrap();

        prop_assert_eq!(removed, schedules.len() - expected.len());
        prop_assert_eq!(tables.schedules(&id).unwrap(), expected.as_slice());
    }

    /// Property: A lecture keeps its colour when later blocks are appended
    #[test]
    fn prop_colors_stable_under_append(
        schedules in prop::collection::vec(arb_schedule(), 1..8),
        extra in arb_schedule(),
    ) {
        let palette = Palette::default();
        let before = LectureColorMap::for_schedules(&schedules, &palette);

        let mut extended = schedules.clone();
        extended.push(extra);
        let after = LectureColorMap::for_schedules(&extended, &palette);

        for schedule in &schedules {
            prop_assert_eq!(
                before.color_for(schedule.lecture_id()),
                after.color_for(schedule.lecture_id())
            );
        }
    }

    /// Property: Blocks sit inside their column and scale with their span
    #[test]
    fn prop_block_rect_matches_range(day in arb_day(), range in arb_range()) {
        let geometry = GridGeometry::default();
        let rect = geometry.block_rect(day, &range);
        let first_row = (range.start().index() - 1) as f32;

        prop_assert_eq!(rect.height, range.slot_count() as f32 * 30.0 - 1.0);
        prop_assert_eq!(rect.top, 40.0 + first_row * 30.0 + 1.0);
        prop_assert_eq!(rect.left, 120.0 + day.index() as f32 * 80.0 + 1.0);
        prop_assert!(rect.bottom() <= geometry.grid_size().1);
    }

    /// Property: Any drop keeps the block on the grid with its length intact
    #[test]
    fn prop_drop_stays_on_grid(
        schedule in arb_schedule(),
        dx in prop_oneof![-2000.0f32..2000.0, prop::num::f32::NORMAL],
        dy in prop_oneof![-2000.0f32..2000.0, prop::num::f32::NORMAL],
    ) {
        let geometry = GridGeometry::default();
        let mut tables = TableCollection::new();
        let id = tables.ids()[0].clone();
        let count = schedule.range.slot_count();
        let index = tables.append_schedule(&id, schedule).unwrap();

        let drag = DragId::new(id.clone(), index);
        let mut session = DragSession::new();
        prop_assert!(session.begin(drag.clone()));
        session.end(&drag, PointerDelta::new(dx, dy), &mut tables, &geometry);

        let moved = tables.schedule(&id, index).unwrap();
        prop_assert_eq!(moved.range.slot_count(), count);
        prop_assert!(moved.range.end().index() <= SLOT_COUNT);
        prop_assert!(!session.is_active());
    }

    /// Property: Drag tokens decode back to the id they came from
    #[test]
    fn prop_drag_token_round_trips(n in 1u64..10_000, index in 0usize..500) {
        let mut tables = TableCollection::new();
        for _ in 1..(n % 7) {
            tables.add_table();
        }
        let table_id = tables.ids().last().unwrap().clone();
        let drag = DragId::new(table_id, index);

        prop_assert_eq!(DragId::decode(&drag.encode()).unwrap(), drag);
    }
}
