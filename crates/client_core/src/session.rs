use chrono::{DateTime, Utc};
use shared::domain::{Answer, Response};
use storage::ResponseStore;
use tracing::{info, warn};

/// The in-memory copy of the persisted response, kept in step with the store:
/// read on open, written through on record, dropped on clear.
#[derive(Debug)]
pub struct InvitationSession {
    store: ResponseStore,
    current: Option<Response>,
}

impl InvitationSession {
    pub fn open(store: ResponseStore) -> Self {
        let current = store.load();
        info!(
            path = %store.path().display(),
            answered = current.is_some(),
            "invitation session opened"
        );
        Self { store, current }
    }

    pub fn current(&self) -> Option<&Response> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &ResponseStore {
        &self.store
    }

    /// Builds the response for `answer` now and persists it.
    pub fn record(&mut self, answer: Answer) -> Response {
        self.record_at(answer, Utc::now())
    }

    /// A failed save is logged and otherwise ignored: the returned response
    /// still drives this session, it just will not survive a restart.
    pub fn record_at(&mut self, answer: Answer, at: DateTime<Utc>) -> Response {
        let response = Response::new(answer, at);
        match self.store.save(&response) {
            Ok(()) => info!(answer = %answer, "response recorded"),
            Err(err) => warn!(answer = %answer, "response kept in memory only: {err}"),
        }
        self.current = Some(response.clone());
        response
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!("failed to remove persisted response: {err}");
        }
        self.current = None;
        info!("response cleared");
    }

    /// Raw persisted text for the admin export.
    pub fn export_payload(&self) -> Option<String> {
        self.store.raw_payload()
    }
}
