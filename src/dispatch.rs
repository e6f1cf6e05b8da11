//! Generic action dispatch (`POST /api/perform_action`)

use std::fmt;

use crate::action::Action;
use crate::api::{ActionRequest, ApiError, GameBackend, Snapshot};
use crate::session::Session;

const REJECTED_FALLBACK: &str = "The action could not be completed.";

#[derive(Debug)]
pub enum DispatchError {
    /// No player is logged in; the request was never sent
    NoSession,
    /// Backend answered without success, or without `new_state`
    Rejected(String),
    Transport(ApiError),
    /// `new_state` was present but not a usable snapshot
    InvalidState(ApiError),
}

impl DispatchError {
    /// Only application-level failures are shown to the player; the rest are logged.
    pub fn alert_text(&self) -> Option<String> {
        match self {
            DispatchError::Rejected(message) => Some(message.clone()),
            DispatchError::NoSession | DispatchError::Transport(_) | DispatchError::InvalidState(_) => None,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoSession => write!(f, "No active session"),
            DispatchError::Rejected(message) => write!(f, "Action rejected: {}", message),
            DispatchError::Transport(e) => write!(f, "{}", e),
            DispatchError::InvalidState(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DispatchError {}

#[derive(Debug)]
pub struct ActionOutcome {
    pub snapshot: Snapshot,
    pub message: Option<String>,
}

/// Actions need a logged-in player. Missing one is a wiring bug, not a user error.
pub fn require_session(session: Option<&Session>) -> Result<&Session, DispatchError> {
    session.ok_or_else(|| {
        log::error!("Action attempted without an active session");
        DispatchError::NoSession
    })
}

pub fn perform_action(
    backend: &dyn GameBackend,
    session: Option<&Session>,
    action: &Action,
) -> Result<ActionOutcome, DispatchError> {
    let session = require_session(session)?;

    let request = ActionRequest {
        action: action.name().to_string(),
        params: action.params(),
        player_name: session.player_name().to_string(),
    };

    log::debug!("Dispatching {} {}", request.action, request.params);

    let resp = backend.perform_action(&request).map_err(|e| {
        log::error!("Action {} failed: {}", request.action, e);
        DispatchError::Transport(e)
    })?;

    let success = resp.is_success();
    let state = match resp.new_state {
        Some(state) if success => state,
        _ => {
            return Err(DispatchError::Rejected(
                resp.message.unwrap_or_else(|| REJECTED_FALLBACK.to_string()),
            ))
        }
    };

    let snapshot = Snapshot::from_value(state).map_err(|e| {
        log::error!("Action {} returned an unusable state: {}", request.action, e);
        DispatchError::InvalidState(e)
    })?;

    Ok(ActionOutcome {
        snapshot,
        message: resp.message,
    })
}
