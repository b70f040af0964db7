//! Per-sheet builders. The course registry is built first; the slot and
//! enrollment builders validate their course codes against it.

pub mod courses;
pub mod enrollments;
pub mod slots;

pub use courses::{CourseRow, build_courses};
pub use enrollments::{EnrollmentRow, build_enrollments};
pub use slots::{SlotRow, build_slots};
