//! Player session bootstrap (`POST /api/player`)

use std::fmt;

use crate::api::{ApiError, GameBackend, PlayerRequest, Snapshot};

/// Regions the backend knows how to seed a farm for
pub const REGIONS: &[&str] = &["Morogoro", "Arusha", "Dodoma"];

pub const MAX_NAME_LEN: usize = 24;

const EMPTY_NAME_ALERT: &str = "Please enter your name to start.";
const CONNECTIVITY_ALERT: &str = "Could not reach the farm server. Check your connection and try again.";
const REJECTED_FALLBACK: &str = "Could not start your session.";

/// The identity attached to every action request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    player_name: String,
}

impl Session {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }
}

#[derive(Debug)]
pub enum SessionError {
    /// Name was empty after trimming; nothing was sent
    EmptyName,
    /// Backend answered without success, or without a usable state
    Rejected(String),
    Transport(ApiError),
}

impl SessionError {
    /// Text shown to the player
    pub fn alert_text(&self) -> String {
        match self {
            SessionError::EmptyName => EMPTY_NAME_ALERT.to_string(),
            SessionError::Rejected(message) => message.clone(),
            SessionError::Transport(_) => CONNECTIVITY_ALERT.to_string(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyName => write!(f, "Player name is empty"),
            SessionError::Rejected(message) => write!(f, "Session rejected: {}", message),
            SessionError::Transport(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

/// A freshly started session and the state to render first
#[derive(Debug)]
pub struct SessionStart {
    pub session: Session,
    pub snapshot: Snapshot,
    pub message: Option<String>,
}

/// Trimmed player name, or `EmptyName`
pub fn validate_name(name: &str) -> Result<&str, SessionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(SessionError::EmptyName)
    } else {
        Ok(trimmed)
    }
}

/// Create or resume the player's farm
pub fn start_session(
    backend: &dyn GameBackend,
    name: &str,
    region: &str,
) -> Result<SessionStart, SessionError> {
    let name = validate_name(name)?;

    let request = PlayerRequest {
        player_name: name.to_string(),
        region: region.to_string(),
    };

    let resp = backend.create_or_resume(&request).map_err(|e| {
        log::error!("Session request failed: {}", e);
        SessionError::Transport(e)
    })?;

    let success = resp.is_success();
    let message = resp.message;

    let state = match resp.state {
        Some(state) if success => state,
        _ => {
            return Err(SessionError::Rejected(
                message.unwrap_or_else(|| REJECTED_FALLBACK.to_string()),
            ))
        }
    };

    let snapshot = Snapshot::from_value(state).map_err(|e| {
        log::error!("Session state unusable: {}", e);
        SessionError::Rejected(message.clone().unwrap_or_else(|| REJECTED_FALLBACK.to_string()))
    })?;

    let player_name = snapshot
        .player_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| name.to_string());

    log::info!("Session started for {}", player_name);

    Ok(SessionStart {
        session: Session::new(player_name),
        snapshot,
        message,
    })
}

/// Contents of the login form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub name: String,
    region_index: usize,
}

impl LoginForm {
    pub fn new(default_region: &str) -> Self {
        let region_index = REGIONS
            .iter()
            .position(|r| r.eq_ignore_ascii_case(default_region))
            .unwrap_or(0);
        Self {
            name: String::new(),
            region_index,
        }
    }

    pub fn region(&self) -> &'static str {
        REGIONS[self.region_index]
    }

    pub fn region_index(&self) -> usize {
        self.region_index
    }

    pub fn select_region(&mut self, index: usize) {
        if index < REGIONS.len() {
            self.region_index = index;
        }
    }

    pub fn next_region(&mut self) {
        self.region_index = (self.region_index + 1) % REGIONS.len();
    }

    pub fn prev_region(&mut self) {
        self.region_index = (self.region_index + REGIONS.len() - 1) % REGIONS.len();
    }

    /// Append a typed character. Control characters are dropped.
    pub fn push_char(&mut self, c: char) {
        if !c.is_control() && self.name.chars().count() < MAX_NAME_LEN {
            self.name.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeBackend;
    use serde_json::json;

    #[test]
    fn test_blank_name_sends_nothing() {
        let backend = FakeBackend::new();
        for name in ["", "   ", "\t\n"] {
            let err = start_session(&backend, name, "Morogoro").unwrap_err();
            assert!(matches!(err, SessionError::EmptyName));
        }
        assert_eq!(backend.request_count(), 0);
    }

    #[test]
    fn test_success_uses_echoed_name() {
        let backend = FakeBackend::new();
        backend.push_player_json(json!({
            "status": "success",
            "message": "New farm created for Amina in Arusha!",
            "state": {"playerName": "Amina", "region": "Arusha"}
        }));

        let start = start_session(&backend, "  Amina ", "Arusha").unwrap();
        assert_eq!(start.session.player_name(), "Amina");
        assert_eq!(start.snapshot.region.as_deref(), Some("Arusha"));
        assert_eq!(start.message.as_deref(), Some("New farm created for Amina in Arusha!"));

        let sent = backend.player_requests.lock().unwrap();
        assert_eq!(sent[0], PlayerRequest { player_name: "Amina".to_string(), region: "Arusha".to_string() });
    }

    #[test]
    fn test_missing_echo_falls_back_to_submitted_name() {
        let backend = FakeBackend::new();
        backend.push_player_json(json!({"status": "success", "state": {}}));
        let start = start_session(&backend, "Baraka", "Dodoma").unwrap();
        assert_eq!(start.session.player_name(), "Baraka");
    }

    #[test]
    fn test_error_status_surfaces_message() {
        let backend = FakeBackend::new();
        backend.push_player_json(json!({"status": "error", "message": "Invalid region selected."}));
        let err = start_session(&backend, "Amina", "Mars").unwrap_err();
        assert_eq!(err.alert_text(), "Invalid region selected.");
    }

    #[test]
    fn test_success_without_state_is_rejected() {
        let backend = FakeBackend::new();
        backend.push_player_json(json!({"status": "success", "message": "odd"}));
        let err = start_session(&backend, "Amina", "Arusha").unwrap_err();
        assert!(matches!(err, SessionError::Rejected(ref m) if m == "odd"));

        backend.push_player_json(json!({"status": "success", "state": [1, 2, 3]}));
        let err = start_session(&backend, "Amina", "Arusha").unwrap_err();
        assert_eq!(err.alert_text(), REJECTED_FALLBACK);
    }

    #[test]
    fn test_transport_failure_gets_generic_alert() {
        let backend = FakeBackend::new();
        backend.push_player(Err(ApiError::Timeout));
        let err = start_session(&backend, "Amina", "Arusha").unwrap_err();
        assert!(matches!(err, SessionError::Transport(ApiError::Timeout)));
        assert_eq!(err.alert_text(), CONNECTIVITY_ALERT);
    }

    #[test]
    fn test_login_form_region_cycle() {
        let mut form = LoginForm::new("dodoma");
        assert_eq!(form.region(), "Dodoma");
        form.next_region();
        assert_eq!(form.region(), "Morogoro");
        form.prev_region();
        assert_eq!(form.region(), "Dodoma");
        form.select_region(99);
        assert_eq!(form.region(), "Dodoma");

        let form = LoginForm::new("Atlantis");
        assert_eq!(form.region(), "Morogoro");
    }

    #[test]
    fn test_login_form_filters_input() {
        let mut form = LoginForm::new("Morogoro");
        for c in "Dr. A&B\t\u{8}".chars() {
            form.push_char(c);
        }
        assert_eq!(form.name, "Dr. A&B");
        form.backspace();
        assert_eq!(form.name, "Dr. A&");

        for _ in 0..40 {
            form.push_char('x');
        }
        assert_eq!(form.name.chars().count(), MAX_NAME_LEN);
    }
}
