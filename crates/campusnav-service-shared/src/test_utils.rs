//! Test utilities for handler testing.
//!
//! Every call to [`test_state`] returns an independent state over the
//! reference campus, so tests that mutate constraints never see each other.

use campusnav_lib::reference_campus;

use crate::middleware::RequestId;
use crate::state::AppState;

/// Fresh application state over the reference campus with no constraints.
pub fn test_state() -> AppState {
    AppState::from_graph(reference_campus())
}

/// Location names of the reference campus for use in tests.
pub mod fixture_locations {
    pub const MAIN_GATE: &str = "Main Gate";
    pub const LIBRARY: &str = "Library";
    pub const COMPUTER_LAB: &str = "Computer Lab";
    pub const LECTURE_HALL: &str = "Lecture Hall";
    pub const ADMIN_BLOCK: &str = "Admin Block";
    pub const CAFETERIA: &str = "Cafeteria";
    /// Designated exit.
    pub const SPORTS_COMPLEX: &str = "Sports Complex";
    pub const AUDITORIUM: &str = "Auditorium";
    pub const HOSTEL: &str = "Hostel";
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", RequestId::generate())
}
