//! Application state and core logic

use crate::config::OnboardConfig;
use crate::i18n::Catalog;
use crate::platform::COPY_MODIFIER;
use crate::state::application::SubmissionRequest;
use crate::state::{AppState, Notice, StepOutcome, View, WizardPhase};
use crate::store::{FileStore, KeyValueStore, MemoryStore, Session};
use crate::submission::{
    from_config, submit_application, SingleFlight, SubmissionClient, SubmitError, TaskOutcome,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tracing::{info, warn};

type SubmissionTask = SingleFlight<Result<String, SubmitError>>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Message lookup for every rendered string
    pub translator: Catalog,
    /// Persisted applicant session
    session: Session,
    /// Submission endpoint
    client: Arc<dyn SubmissionClient>,
    /// The outstanding submission, if any
    submission: SubmissionTask,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance from user configuration
    pub fn new(config: &OnboardConfig) -> Result<Self> {
        let mut translator = Catalog::english();
        if let Some(path) = &config.messages_path {
            match translator.load_overrides(path) {
                Ok(count) => info!(count, path = %path.display(), "loaded message overrides"),
                Err(e) => warn!("Ignoring message overrides: {e:#}"),
            }
        }

        let client = from_config(config)?;
        Ok(Self::with_parts(open_session(config), translator, client))
    }

    /// Assemble an App from its collaborators
    pub fn with_parts(
        session: Session,
        translator: Catalog,
        client: Arc<dyn SubmissionClient>,
    ) -> Self {
        let state = match session.registered_email() {
            Some(email) => {
                info!("resuming session for registered applicant");
                AppState::for_registered(email)
            }
            None => AppState::default(),
        };

        Self {
            state,
            translator,
            session,
            client,
            submission: SingleFlight::new(),
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Quit, cancelling any outstanding submission
    pub fn request_quit(&mut self) {
        self.submission.cancel();
        self.quit = true;
    }

    /// Cancel any outstanding submission and wait for its task to end
    pub async fn shutdown(&mut self) {
        self.submission.cancel();
        if let Some(outcome) = self.submission.wait().await {
            tracing::debug!(cancelled = outcome == TaskOutcome::Cancelled, "submission task ended");
        }
    }

    /// Whether a submission is outstanding; the submit control is disabled
    pub fn is_submitting(&self) -> bool {
        self.submission.is_in_flight()
    }

    /// Reference of the last accepted application, if any
    pub fn last_reference(&self) -> Option<String> {
        self.session.last_reference()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Register => self.handle_register_key(key),
            View::Wizard => self.handle_wizard_key(key),
            View::Complete => self.handle_complete_key(key),
        }
        Ok(())
    }

    fn handle_register_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.registration_next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.registration_prev_field(),
            KeyCode::Enter => self.register(),
            KeyCode::Esc => self.request_quit(),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            KeyCode::Char(c) => self.state.registration_input_char(c),
            KeyCode::Backspace => self.state.registration_backspace(),
            _ => {}
        }
    }

    fn register(&mut self) {
        let Some(email) = self.state.submit_registration() else {
            return;
        };
        if let Err(e) = self.session.register(&email) {
            warn!("Failed to persist registration: {e}");
            self.state
                .push_error(Notice::with_detail("errors.store", e.to_string()));
        }
        info!("applicant registered");
        self.state.enter_wizard(email);
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc if self.is_submitting() => {
                self.submission.cancel();
            }
            KeyCode::Esc => self.request_quit(),
            KeyCode::Char('s') if ctrl => self.submit_current_step(),
            KeyCode::Char('b') if ctrl => {
                self.state.wizard.retreat();
            }
            KeyCode::Char('a') if ctrl => {
                if self.state.wizard.add_party() {
                    self.state.status_message = Some(Notice::new("status.party_added"));
                }
            }
            KeyCode::Char('x') if ctrl => {
                if self.state.wizard.remove_last_party() {
                    self.state.status_message = Some(Notice::new("status.party_removed"));
                }
            }
            KeyCode::Char('l') if ctrl => self.sign_out(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Enter => self.submit_current_step(),
            KeyCode::Tab | KeyCode::Down => self.state.wizard.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.wizard.prev_field(),
            KeyCode::Char(c) => self.state.wizard.input_char(c),
            KeyCode::Backspace => self.state.wizard.backspace(),
            _ => {}
        }
    }

    fn submit_current_step(&mut self) {
        match self.state.wizard.submit_step() {
            StepOutcome::Invalid { .. } => {
                self.state.status_message = Some(Notice::new("status.step_invalid"));
            }
            StepOutcome::Advanced { .. } => {}
            StepOutcome::ReadyToSubmit(request) => self.start_submission(*request),
            StepOutcome::Incomplete(missing) => {
                warn!(section = missing.0, "application incomplete at final step");
                self.state
                    .push_error(Notice::with_detail("errors.incomplete", missing.0));
            }
            StepOutcome::Ignored => {
                if self.is_submitting() {
                    self.state.status_message = Some(Notice::new("status.submit_in_flight"));
                }
            }
        }
    }

    fn start_submission(&mut self, request: SubmissionRequest) {
        let application_id = request.application_id;
        let started = self
            .submission
            .start(submit_application(Arc::clone(&self.client), request));
        if started {
            info!(%application_id, "submission started");
        } else {
            self.state.status_message = Some(Notice::new("status.submit_in_flight"));
        }
    }

    /// Pick up the outcome of a finished submission, if there is one
    pub fn poll_submission(&mut self) {
        if let Some(outcome) = self.submission.poll() {
            self.resolve_submission(outcome);
        }
    }

    fn resolve_submission(&mut self, outcome: TaskOutcome<Result<String, SubmitError>>) {
        match outcome {
            TaskOutcome::Finished(Ok(reference)) => {
                if let Err(e) = self.session.record_reference(&reference) {
                    warn!("Failed to persist application reference: {e}");
                    self.state
                        .push_error(Notice::with_detail("errors.store", e.to_string()));
                }
                self.state.wizard.finish_submission(Some(reference));
                self.state.current_view = View::Complete;
            }
            TaskOutcome::Finished(Err(err)) => {
                warn!("Submission failed: {err}");
                self.state.wizard.finish_submission(None);
                self.state.push_error(Notice {
                    key: err.message_key().to_string(),
                    detail: err.detail(),
                });
            }
            TaskOutcome::Cancelled => {
                info!("submission cancelled");
                self.state.wizard.finish_submission(None);
                self.state.status_message = Some(Notice::new("status.submission_cancelled"));
            }
        }
    }

    fn sign_out(&mut self) {
        // The session stays, and so does any submission, if the store refuses
        if let Err(e) = self.session.sign_out() {
            warn!("Failed to clear session: {e}");
            self.state
                .push_error(Notice::with_detail("errors.store", e.to_string()));
            return;
        }
        // Dropping the guard cancels anything outstanding
        self.submission = SingleFlight::new();
        info!("applicant signed out");
        self.state = AppState::default();
    }

    fn handle_complete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') if key.modifiers.contains(COPY_MODIFIER) => self.copy_reference(),
            KeyCode::Char('c') => self.copy_reference(),
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => self.request_quit(),
            _ => {}
        }
    }

    fn copy_reference(&mut self) {
        let WizardPhase::Complete { reference } = self.state.wizard.phase() else {
            return;
        };
        let reference = reference.clone();
        match copy_to_clipboard(&reference) {
            Ok(()) => self.state.status_message = Some(Notice::new("status.copied")),
            Err(e) => {
                warn!("Clipboard unavailable: {e}");
                self.state
                    .push_error(Notice::with_detail("errors.clipboard", e.to_string()));
            }
        }
    }
}

/// File-backed session, or an in-memory one when the file cannot be used
fn open_session(config: &OnboardConfig) -> Session {
    let path = config.store_path.clone().or_else(FileStore::default_path);
    let store: Box<dyn KeyValueStore> = match path.map(FileStore::open) {
        Some(Ok(store)) => {
            info!(path = %store.path().display(), "opened session store");
            Box::new(store)
        }
        Some(Err(e)) => {
            warn!("Session store unavailable, using memory: {e}");
            Box::new(MemoryStore::default())
        }
        None => {
            warn!("No data directory, session will not persist");
            Box::new(MemoryStore::default())
        }
    };
    Session::new(store)
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
