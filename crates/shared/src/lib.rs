pub mod domain;
pub mod error;
pub mod format;

pub use domain::{Answer, Response};
