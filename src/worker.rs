//! Background thread that runs backend calls so the frame loop never blocks.
//!
//! At most one request is in flight; `submit` refuses new work until the
//! previous completion has been polled.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::action::Action;
use crate::api::{ApiError, GameBackend, NasaData};
use crate::dispatch::{self, ActionOutcome, DispatchError};
use crate::session::{self, Session, SessionError, SessionStart};

pub enum Request {
    StartSession { name: String, region: String },
    PerformAction { session: Session, action: Action },
    RefreshEnvironment,
}

impl Request {
    fn kind(&self) -> RequestKind {
        match self {
            Request::StartSession { .. } => RequestKind::StartSession,
            Request::PerformAction { .. } => RequestKind::PerformAction,
            Request::RefreshEnvironment => RequestKind::RefreshEnvironment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    StartSession,
    PerformAction,
    RefreshEnvironment,
}

#[derive(Debug)]
pub enum Completion {
    SessionStarted(Result<SessionStart, SessionError>),
    ActionPerformed(Result<ActionOutcome, DispatchError>),
    Environment(Result<NasaData, ApiError>),
}

pub struct RequestWorker {
    requests: Sender<Request>,
    completions: Receiver<Completion>,
    pending: Option<RequestKind>,
}

impl RequestWorker {
    pub fn spawn(backend: Arc<dyn GameBackend>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (completion_tx, completion_rx) = mpsc::channel::<Completion>();

        // Exits once the worker handle (and its sender) is dropped
        thread::Builder::new()
            .name("shamba-requests".to_string())
            .spawn(move || {
                for request in request_rx {
                    let completion = execute(backend.as_ref(), request);
                    if completion_tx.send(completion).is_err() {
                        break;
                    }
                }
                log::debug!("Request worker stopped");
            })
            .map_err(|e| log::error!("Failed to spawn request worker: {}", e))
            .ok();

        Self {
            requests: request_tx,
            completions: completion_rx,
            pending: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<RequestKind> {
        self.pending
    }

    /// Queue a request. Returns false if one is already in flight or the
    /// worker is gone.
    pub fn submit(&mut self, request: Request) -> bool {
        if let Some(kind) = self.pending {
            log::debug!("Ignoring request while {:?} is in flight", kind);
            return false;
        }

        let kind = request.kind();
        if self.requests.send(request).is_err() {
            log::error!("Request worker is not running");
            return false;
        }
        self.pending = Some(kind);
        true
    }

    /// Non-blocking; call once per frame
    pub fn poll(&mut self) -> Option<Completion> {
        self.pending?;
        match self.completions.try_recv() {
            Ok(completion) => {
                self.pending = None;
                Some(completion)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Request worker exited with a request in flight");
                self.pending = None;
                None
            }
        }
    }

    /// Block until the in-flight request completes or `timeout` elapses
    pub fn wait(&mut self, timeout: Duration) -> Option<Completion> {
        self.pending?;
        match self.completions.recv_timeout(timeout) {
            Ok(completion) => {
                self.pending = None;
                Some(completion)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.pending = None;
                None
            }
        }
    }
}

fn execute(backend: &dyn GameBackend, request: Request) -> Completion {
    match request {
        Request::StartSession { name, region } => {
            Completion::SessionStarted(session::start_session(backend, &name, &region))
        }
        Request::PerformAction { session, action } => {
            Completion::ActionPerformed(dispatch::perform_action(backend, Some(&session), &action))
        }
        Request::RefreshEnvironment => Completion::Environment(backend.environment()),
    }
}
