//! Client-side core of the invitation: the answer session, configuration, and
//! best-effort notification of committed answers.

pub mod channels;
pub mod config;
pub mod dispatcher;
pub mod email_relay;
pub mod error;
pub mod issue;
mod session;

pub use channels::{ClientContext, NotificationChannel};
pub use config::{load_settings, Settings};
pub use dispatcher::{DeliveryReport, NotificationDispatcher};
pub use error::DeliveryError;
pub use session::InvitationSession;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
