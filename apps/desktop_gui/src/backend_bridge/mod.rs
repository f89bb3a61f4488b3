//! Bridge between the UI thread and the background dispatch worker.

pub mod commands;
pub mod runtime;
