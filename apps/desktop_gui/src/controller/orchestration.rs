//! Command orchestration from UI actions to the session and the backend queue.

use client_core::InvitationSession;
use crossbeam_channel::{Sender, TrySendError};
use shared::domain::Answer;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::{reduce, Phase, ViewAction, ViewState};

/// Queues `cmd` for the backend worker without blocking the UI. A full or
/// closed queue only costs the notification, so it is logged and dropped.
pub fn dispatch_backend_command(cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend queue full; notification dropped");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(
                command = cmd_name,
                "backend worker unavailable; notification dropped"
            );
            false
        }
    }
}

/// Commits `answer`: build and persist the response, move the view to
/// `Committed`, then hand the response to the backend without waiting.
pub fn commit_answer(
    state: ViewState,
    answer: Answer,
    session: &mut InvitationSession,
    cmd_tx: &Sender<BackendCommand>,
) -> ViewState {
    if state.phase != Phase::Prompting {
        tracing::debug!(answer = %answer, "commit ignored outside the prompt");
        return state;
    }

    let response = session.record(answer);
    let next = reduce(state, ViewAction::Commit(response.clone()));
    dispatch_backend_command(cmd_tx, BackendCommand::Notify { response });
    next
}

/// Clears the stored response, but only once the admin has confirmed.
pub fn confirm_clear(state: ViewState, session: &mut InvitationSession) -> ViewState {
    if !state.confirming_clear() {
        return state;
    }
    session.clear();
    reduce(state, ViewAction::Cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::YES_MESSAGE;
    use storage::ResponseStore;

    fn session_in(dir: &tempfile::TempDir) -> InvitationSession {
        InvitationSession::open(ResponseStore::open(dir.path()))
    }

    fn prompting(session: &InvitationSession) -> ViewState {
        reduce(
            ViewState::from_persisted(session.current()),
            ViewAction::OpenPrompt,
        )
    }

    #[test]
    fn commit_persists_updates_view_and_queues_notification() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let (cmd_tx, cmd_rx) = bounded(4);

        let state = commit_answer(prompting(&session), Answer::Yes, &mut session, &cmd_tx);

        let stored = session.store().load().expect("persisted");
        assert_eq!(stored.message(), YES_MESSAGE);
        assert_eq!(state.phase, Phase::Committed(stored.clone()));
        assert!(!state.prompt_open());
        assert_eq!(
            cmd_rx.try_recv().expect("queued"),
            BackendCommand::Notify { response: stored }
        );
    }

    #[test]
    fn commit_outside_prompt_changes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let (cmd_tx, cmd_rx) = bounded(4);
        let idle = ViewState::from_persisted(None);

        let state = commit_answer(idle.clone(), Answer::No, &mut session, &cmd_tx);

        assert_eq!(state, idle);
        assert!(session.store().load().is_none());
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn commit_survives_a_dead_backend() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);

        let state = commit_answer(prompting(&session), Answer::No, &mut session, &cmd_tx);

        assert!(state.response().is_some());
        assert_eq!(session.store().load().as_ref(), state.response());
    }

    #[test]
    fn confirmed_clear_empties_store_and_view() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        session.record(Answer::Yes);
        let state = reduce(
            reduce(
                ViewState::from_persisted(session.current()),
                ViewAction::AdminGesture,
            ),
            ViewAction::RequestClear,
        );

        let state = confirm_clear(state, &mut session);

        assert_eq!(state.phase, Phase::Idle);
        assert!(session.store().load().is_none());
        assert!(session.current().is_none());
    }

    #[test]
    fn cancelled_clear_leaves_record_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let original = session.record(Answer::No);
        let confirming = reduce(
            reduce(
                ViewState::from_persisted(session.current()),
                ViewAction::AdminGesture,
            ),
            ViewAction::RequestClear,
        );

        let state = reduce(confirming, ViewAction::CancelClear);
        let state = confirm_clear(state, &mut session);

        assert_eq!(state.response(), Some(&original));
        assert_eq!(session.store().load(), Some(original));
    }
}
