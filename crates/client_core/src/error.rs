use std::time::Duration;

use thiserror::Error;

/// Why a notification did not reach its channel. Never shown to the user;
/// the dispatcher logs it and moves on.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("{channel}: request failed: {source}")]
    Transport {
        channel: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{channel}: endpoint answered HTTP {status}")]
    Status { channel: &'static str, status: u16 },
    #[error("{channel}: relay rejected submission (HTTP {status}): {body}")]
    Rejected {
        channel: &'static str,
        status: u16,
        body: String,
    },
    #[error("{channel}: no answer within {timeout:?}")]
    TimedOut {
        channel: &'static str,
        timeout: Duration,
    },
}

impl DeliveryError {
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Transport { channel, .. }
            | Self::Status { channel, .. }
            | Self::Rejected { channel, .. }
            | Self::TimedOut { channel, .. } => channel,
        }
    }
}
