//! Backend-to-UI events.

/// Result of one notification attempt as the admin panel shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    BackendReady { channels: Vec<&'static str> },
    BackendUnavailable(String),
    DeliveryReported {
        channel: &'static str,
        status: DeliveryStatus,
    },
}
