//! View state, its reducer, and what the UI sends to the backend.

pub mod events;
pub mod gesture;
pub mod orchestration;
pub mod reducer;
