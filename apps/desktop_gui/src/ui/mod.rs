//! egui rendering of the invitation page.

pub mod app;
pub mod panels;
pub mod particles;
pub mod theme;

pub use app::InvitationApp;
