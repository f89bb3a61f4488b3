//! The capability every notification backend implements, plus the client
//! metadata both backends attach to their payloads.

use async_trait::async_trait;
use shared::domain::Response;

use crate::error::DeliveryError;

/// Longest client identifier forwarded to the email relay.
pub const CLIENT_ID_MAX_CHARS: usize = 100;

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn dispatch(&self, response: &Response) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub client_id: String,
    pub locale: String,
}

impl ClientContext {
    pub fn new(client_id: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            locale: locale.into(),
        }
    }

    /// Identifies this build and platform, and picks the locale from the
    /// usual POSIX variables.
    pub fn detect() -> Self {
        let client_id = format!(
            "lunch-invitation/{} ({}; {})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        );
        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find_map(|raw| normalize_locale(&raw))
            .unwrap_or_else(|| "es-ES".to_string());
        Self::new(client_id, locale)
    }

    pub fn truncated_client_id(&self) -> String {
        self.client_id.chars().take(CLIENT_ID_MAX_CHARS).collect()
    }
}

/// `es_ES.UTF-8` → `es-ES`; `C` and `POSIX` carry no language.
fn normalize_locale(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next()?.trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}
