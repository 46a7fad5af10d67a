// SPDX-License-Identifier: GPL-3.0-only

//! Camera session
//!
//! A single task owns the [`SessionState`] and runs [`SessionCommand`]s one at a
//! time from a bounded queue. Callers talk to it through a cloneable
//! [`SessionHandle`]; presentation code can watch the state or subscribe to
//! [`SessionEvent`]s and decide how to react.
//!
//! Because commands are serialized, a capture requested while another is in
//! flight waits in the queue behind it.

use crate::constants::workers::{COMMAND_QUEUE_DEPTH, EVENT_CHANNEL_CAPACITY};
use crate::errors::{CaptureError, PersistError, SessionError};
use crate::film::FilmType;
use crate::pipelines::photo::CapturePipeline;
use crate::storage::ImagePair;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// Whether the session is taking a photo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// Session-wide mutable state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Film applied to the next capture
    pub film_type: FilmType,
    /// Current capture activity
    pub capture_state: CaptureState,
}

/// Notifications for a presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The selected film changed
    FilmSelected(FilmType),
    /// A capture started with this film
    CaptureStarted(FilmType),
    /// A capture finished and its pair was recorded
    CaptureCompleted(ImagePair),
    /// A capture was abandoned; the session is idle again
    CaptureFailed(String),
    /// A pair was removed from the gallery
    PairRemoved(ImagePair),
}

/// Commands processed by the session task
#[derive(Debug)]
pub enum SessionCommand {
    /// Change the film for subsequent captures
    SelectFilm(FilmType),
    /// Take a photo with the current film
    Capture(oneshot::Sender<Result<ImagePair, CaptureError>>),
    /// Read the recorded pairs, oldest first
    Pairs(oneshot::Sender<Vec<ImagePair>>),
    /// Remove a pair by insertion index
    RemovePair {
        index: usize,
        reply: oneshot::Sender<Result<Option<ImagePair>, PersistError>>,
    },
    /// Stop the session task
    Shutdown,
}

/// The session task
pub struct Session {
    pipeline: Arc<CapturePipeline>,
    state: watch::Sender<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Start a session task on the current tokio runtime
    pub fn spawn(pipeline: Arc<CapturePipeline>, film_type: FilmType) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (state_tx, state_rx) = watch::channel(SessionState {
            film_type,
            capture_state: CaptureState::Idle,
        });
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let session = Session {
            pipeline,
            state: state_tx,
            events: events_tx.clone(),
        };
        tokio::spawn(session.run(command_rx));

        info!(?film_type, "Session started");
        SessionHandle {
            commands: command_tx,
            state: state_rx,
            events: events_tx,
        }
    }

    async fn run(self, mut commands: mpsc::Receiver<SessionCommand>) {
        while let Some(command) = commands.recv().await {
            if !self.handle(command).await {
                break;
            }
        }
        debug!("Session stopped");
    }

    /// Process one command; returns false to stop
    async fn handle(&self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::SelectFilm(film_type) => {
                self.state.send_modify(|state| state.film_type = film_type);
                debug!(?film_type, "Film selected");
                self.emit(SessionEvent::FilmSelected(film_type));
            }
            SessionCommand::Capture(reply) => {
                let result = self.capture().await;
                let _ = reply.send(result);
            }
            SessionCommand::Pairs(reply) => {
                let _ = reply.send(self.pipeline.store().all().await);
            }
            SessionCommand::RemovePair { index, reply } => {
                let result = self.pipeline.store().remove(index).await;
                if let Ok(Some(pair)) = &result {
                    self.emit(SessionEvent::PairRemoved(pair.clone()));
                }
                let _ = reply.send(result);
            }
            SessionCommand::Shutdown => return false,
        }
        true
    }

    async fn capture(&self) -> Result<ImagePair, CaptureError> {
        let film_type = self.state.borrow().film_type;

        self.state
            .send_modify(|state| state.capture_state = CaptureState::Capturing);
        self.emit(SessionEvent::CaptureStarted(film_type));

        let result = self.pipeline.capture(film_type).await;

        self.state
            .send_modify(|state| state.capture_state = CaptureState::Idle);
        match &result {
            Ok(pair) => self.emit(SessionEvent::CaptureCompleted(pair.clone())),
            Err(e) => {
                warn!(error = %e, "Capture abandoned");
                self.emit(SessionEvent::CaptureFailed(e.to_string()));
            }
        }
        result
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

/// Cloneable front end to a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    state: watch::Receiver<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Select the film for the next captures
    pub async fn select_film(&self, film_type: FilmType) -> Result<(), SessionError> {
        self.send(SessionCommand::SelectFilm(film_type)).await
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Film applied to the next capture
    pub fn film_type(&self) -> FilmType {
        self.state().film_type
    }

    /// Receiver that sees every state change
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Take a photo with the current film
    pub async fn capture(&self) -> Result<ImagePair, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Capture(reply)).await?;
        Ok(response.await.map_err(|_| SessionError::Closed)??)
    }

    /// Recorded pairs, oldest first
    pub async fn pairs(&self) -> Result<Vec<ImagePair>, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Pairs(reply)).await?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Remove the pair at `index` (oldest first)
    pub async fn remove_pair(&self, index: usize) -> Result<Option<ImagePair>, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::RemovePair { index, reply }).await?;
        Ok(response.await.map_err(|_| SessionError::Closed)??)
    }

    /// Stop the session after already queued commands
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Shutdown).await
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }
}
