// Application state shared by the frame loop and the screens

use macroquad::prelude::Conf;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::action::Action;
use crate::api::GameBackend;
use crate::config::ClientConfig;
use crate::dispatch;
use crate::session::{self, LoginForm, Session};
use crate::view::GameView;
use crate::worker::{Completion, Request, RequestKind, RequestWorker};

pub fn window_conf(config: &ClientConfig) -> Conf {
    Conf {
        window_title: "Shamba".to_string(),
        window_width: config.window_width,
        window_height: config.window_height,
        fullscreen: false,
        ..Default::default()
    }
}

/// Which screen is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Game,
}

pub struct App {
    worker: RequestWorker,
    view: View,
    session: Option<Session>,
    game: Option<GameView>,
    status: Option<String>,
    alerts: VecDeque<String>,
    pub login: LoginForm,
}

impl App {
    pub fn new(backend: Arc<dyn GameBackend>, default_region: &str) -> Self {
        Self {
            worker: RequestWorker::spawn(backend),
            view: View::Login,
            session: None,
            game: None,
            status: None,
            alerts: VecDeque::new(),
            login: LoginForm::new(default_region),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn game_view(&self) -> Option<&GameView> {
        self.game.as_ref()
    }

    /// Latest server message from a successful request
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.worker.is_busy()
    }

    pub fn pending(&self) -> Option<RequestKind> {
        self.worker.pending()
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    fn alert(&mut self, text: String) {
        log::info!("Alert: {}", text);
        self.alerts.push_back(text);
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Start button / Enter on the login screen
    pub fn submit_login(&mut self) {
        let name = match session::validate_name(&self.login.name) {
            Ok(name) => name.to_string(),
            Err(e) => {
                self.alert(e.alert_text());
                return;
            }
        };

        let region = self.login.region().to_string();
        log::info!("Starting session for {} in {}", name, region);
        self.worker.submit(Request::StartSession { name, region });
    }

    /// Any in-game action button
    pub fn dispatch(&mut self, action: Action) {
        let session = match dispatch::require_session(self.session.as_ref()) {
            Ok(session) => session.clone(),
            Err(_) => return,
        };
        self.worker.submit(Request::PerformAction { session, action });
    }

    pub fn refresh_environment(&mut self) {
        if self.session.is_none() {
            log::warn!("Sensor refresh requested before login");
            return;
        }
        self.worker.submit(Request::RefreshEnvironment);
    }

    /// Drop the session and go back to the login screen
    pub fn end_session(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Ending session for {}", session.player_name());
        }
        self.game = None;
        self.status = None;
        self.view = View::Login;
    }

    // ========================================================================
    // Completions
    // ========================================================================

    /// Apply whatever the worker finished since the last frame
    pub fn poll(&mut self) {
        if let Some(completion) = self.worker.poll() {
            self.apply(completion);
        }
    }

    /// Block until the in-flight request lands and apply it. Returns false on timeout.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.worker.wait(timeout) {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::SessionStarted(Ok(start)) => {
                self.game = Some(GameView::from_snapshot(&start.snapshot));
                self.session = Some(start.session);
                self.status = start.message;
                self.view = View::Game;
            }
            Completion::SessionStarted(Err(e)) => {
                log::warn!("Session start failed: {}", e);
                self.alert(e.alert_text());
            }
            Completion::ActionPerformed(Ok(outcome)) => {
                // Ignore stragglers from a session that has since ended
                if self.view == View::Game {
                    self.game = Some(GameView::from_snapshot(&outcome.snapshot));
                    self.status = outcome.message;
                }
            }
            Completion::ActionPerformed(Err(e)) => {
                if self.view != View::Game {
                    log::debug!("Dropping action error after session ended: {}", e);
                    return;
                }
                if let Some(text) = e.alert_text() {
                    self.alert(text);
                }
            }
            Completion::Environment(Ok(nasa)) => {
                if let Some(game) = self.game.as_mut() {
                    game.set_environment(&nasa);
                }
            }
            Completion::Environment(Err(e)) => {
                log::error!("Sensor refresh failed: {}", e);
            }
        }
    }
}
