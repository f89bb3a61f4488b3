//! Single-slot local persistence for the invitation [`Response`].
//!
//! The slot is one JSON file under the application data directory. Writes go
//! through a sibling temp file and a rename so a crash mid-write leaves either
//! the previous record or the new one, never a torn payload.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use shared::domain::Response;
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed identifier of the persisted slot.
pub const RESPONSE_SLOT_KEY: &str = "lunch-invitation-response";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} response slot '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ResponseStore {
    path: PathBuf,
}

impl ResponseStore {
    /// Opens the slot inside `data_dir`. Nothing touches the disk until the
    /// first read or write.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: slot_path(data_dir.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted record. Missing, unreadable and malformed slots all
    /// come back as `None`.
    pub fn load(&self) -> Option<Response> {
        let raw = self.raw_payload()?;
        match serde_json::from_str::<Response>(&raw) {
            Ok(response) => Some(response),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    "ignoring malformed response slot: {err}"
                );
                None
            }
        }
    }

    /// Exact text currently persisted, as exported by the admin panel.
    pub fn raw_payload(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %self.path.display(), "response slot unreadable: {err}");
                None
            }
        }
    }

    /// Replaces whatever the slot holds with `response`.
    pub fn save(&self, response: &Response) -> Result<(), StoreError> {
        let payload = serde_json::to_string(response)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                action: "prepare directory for",
                path: self.path.clone(),
                source,
            })?;
        }

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload).map_err(|source| StoreError::Io {
            action: "write",
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| StoreError::Io {
            action: "replace",
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            answer = %response.answer(),
            "response slot written"
        );
        Ok(())
    }

    /// Empties the slot. Clearing an already empty slot is a no-op.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "response slot cleared");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                action: "remove",
                path: self.path.clone(),
                source,
            }),
        }
    }
}

fn slot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{RESPONSE_SLOT_KEY}.json"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
