//! Commands queued from the UI to the backend worker.

use shared::domain::Response;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// Forward a freshly committed response to every wired channel.
    Notify { response: Response },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Notify { .. } => "notify",
        }
    }
}
