//! Explicit view state and the pure transition function over it.

use shared::domain::Response;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No answer yet; the call-to-action button is visible.
    Idle,
    /// Confirmation modal open, waiting for YES or NO.
    Prompting,
    /// An answer exists and the result card is shown.
    Committed(Response),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOverlay {
    Hidden,
    Visible { confirming_clear: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub phase: Phase,
    pub admin: AdminOverlay,
    pub info_open: bool,
}

impl ViewState {
    pub fn from_persisted(current: Option<&Response>) -> Self {
        Self {
            phase: match current {
                Some(response) => Phase::Committed(response.clone()),
                None => Phase::Idle,
            },
            admin: AdminOverlay::Hidden,
            info_open: false,
        }
    }

    pub fn response(&self) -> Option<&Response> {
        match &self.phase {
            Phase::Committed(response) => Some(response),
            _ => None,
        }
    }

    pub fn prompt_open(&self) -> bool {
        self.phase == Phase::Prompting
    }

    pub fn admin_visible(&self) -> bool {
        matches!(self.admin, AdminOverlay::Visible { .. })
    }

    pub fn confirming_clear(&self) -> bool {
        self.admin
            == AdminOverlay::Visible {
                confirming_clear: true,
            }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    OpenPrompt,
    Commit(Response),
    OpenInfo,
    CloseInfo,
    AdminGesture,
    CloseAdmin,
    RequestClear,
    CancelClear,
    Cleared,
}

/// Applies `action` to `state`. Actions that are not valid from the current
/// state leave it untouched.
pub fn reduce(state: ViewState, action: ViewAction) -> ViewState {
    let ViewState {
        phase,
        admin,
        info_open,
    } = state;

    match action {
        ViewAction::OpenPrompt => ViewState {
            phase: match phase {
                Phase::Idle => Phase::Prompting,
                other => other,
            },
            admin,
            info_open,
        },
        ViewAction::Commit(response) => ViewState {
            phase: match phase {
                Phase::Prompting => Phase::Committed(response),
                other => other,
            },
            admin,
            info_open,
        },
        ViewAction::OpenInfo => ViewState {
            phase,
            admin,
            info_open: true,
        },
        ViewAction::CloseInfo => ViewState {
            phase,
            admin,
            info_open: false,
        },
        ViewAction::AdminGesture => ViewState {
            phase,
            admin: match admin {
                AdminOverlay::Hidden => AdminOverlay::Visible {
                    confirming_clear: false,
                },
                visible => visible,
            },
            info_open,
        },
        ViewAction::CloseAdmin => ViewState {
            phase,
            admin: AdminOverlay::Hidden,
            info_open,
        },
        ViewAction::RequestClear => ViewState {
            phase,
            admin: match admin {
                AdminOverlay::Visible { .. } => AdminOverlay::Visible {
                    confirming_clear: true,
                },
                hidden => hidden,
            },
            info_open,
        },
        ViewAction::CancelClear => ViewState {
            phase,
            admin: match admin {
                AdminOverlay::Visible { .. } => AdminOverlay::Visible {
                    confirming_clear: false,
                },
                hidden => hidden,
            },
            info_open,
        },
        ViewAction::Cleared => match admin {
            AdminOverlay::Visible {
                confirming_clear: true,
            } => ViewState {
                phase: Phase::Idle,
                admin: AdminOverlay::Visible {
                    confirming_clear: false,
                },
                info_open,
            },
            admin => ViewState {
                phase,
                admin,
                info_open,
            },
        },
    }
}
