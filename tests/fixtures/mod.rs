// Test fixtures - reusable test data
// Provides consistent lectures and placed blocks across the integration tests

#![allow(dead_code)]

use std::rc::Rc;

use timetable_planner::models::lecture::Lecture;
use timetable_planner::models::schedule::{Schedule, SlotRange};
use timetable_planner::models::time_grid::{Day, TimeSlot};

/// Sample lectures
pub mod lectures {
    use super::*;

    pub fn algorithms() -> Rc<Lecture> {
        Rc::new(
            Lecture::new("L1", "Algo")
                .with_major("Computer Science")
                .with_credits("3"),
        )
    }

    pub fn calculus() -> Rc<Lecture> {
        Rc::new(Lecture::new("L2", "Calculus").with_major("Mathematics"))
    }

    pub fn writing() -> Rc<Lecture> {
        Rc::new(Lecture::new("L3", "Writing"))
    }
}

/// Slot helper; panics on out-of-range indices
pub fn slot(index: u8) -> TimeSlot {
    TimeSlot::new(index).expect("fixture slot in range")
}

/// Block covering `count` slots from `start`
pub fn block(day: Day, start: u8, count: u8, room: &str, lecture: Rc<Lecture>) -> Schedule {
    Schedule::builder()
        .day(day)
        .span(slot(start), count)
        .expect("fixture range in grid")
        .room(room)
        .lecture(lecture)
        .build()
        .expect("fixture schedule is complete")
}
