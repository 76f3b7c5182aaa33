//! Application state definitions

use super::forms::{Form, RegistrationForm};
use super::validation::{password_strength, FormErrors, PasswordStrength};
use super::wizard::Wizard;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Account registration
    #[default]
    Register,
    /// Institutional onboarding steps
    Wizard,
    /// Submission accepted
    Complete,
}

/// A translatable banner or status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Translator key
    pub key: String,
    /// Untranslated detail appended to the message, if any
    pub detail: Option<String>,
}

impl Notice {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            detail: None,
        }
    }

    pub fn with_detail(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Registration
    pub registration: RegistrationForm,
    pub registration_errors: FormErrors,

    // Onboarding
    pub wizard: Wizard,

    // Feedback
    pub error_queue: VecDeque<Notice>,
    pub status_message: Option<Notice>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::default(),
            registration: RegistrationForm::new(),
            registration_errors: FormErrors::new(),
            wizard: Wizard::institutional(None),
            error_queue: VecDeque::new(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Start directly in the wizard for an already registered applicant
    pub fn for_registered(email: String) -> Self {
        Self {
            current_view: View::Wizard,
            wizard: Wizard::institutional(Some(email)),
            ..Default::default()
        }
    }

    /// Queue an error banner
    pub fn push_error(&mut self, notice: Notice) {
        self.error_queue.push_back(notice);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// The banner currently shown
    pub fn current_error(&self) -> Option<&Notice> {
        self.error_queue.front()
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Handle character input in the registration form
    pub fn registration_input_char(&mut self, c: char) {
        let field = self.registration.get_active_field_mut();
        field.push_char(c);
        let name = field.name.clone();
        self.registration_errors.clear_field(&name);
    }

    /// Handle backspace in the registration form
    pub fn registration_backspace(&mut self) {
        let field = self.registration.get_active_field_mut();
        field.pop_char();
        let name = field.name.clone();
        self.registration_errors.clear_field(&name);
    }

    fn registration_blur(&mut self) {
        let index = self.registration.active_field();
        if let Some(field) = self.registration.get_field(index) {
            let name = field.name.clone();
            let result = self.registration.validate_field(index);
            self.registration_errors.set(&name, result);
        }
    }

    pub fn registration_next_field(&mut self) {
        self.registration_blur();
        self.registration.next_field();
    }

    pub fn registration_prev_field(&mut self) {
        self.registration_blur();
        self.registration.prev_field();
    }

    /// Live strength of the password being typed
    pub fn password_strength(&self) -> PasswordStrength {
        password_strength(self.registration.password.as_text())
    }

    /// Validate registration; returns the email on success, otherwise
    /// focuses the first invalid field
    pub fn submit_registration(&mut self) -> Option<String> {
        let errors = self.registration.validate();
        if let Some(index) = self.registration.first_invalid_field(&errors) {
            self.registration.set_active_field(index);
            self.registration_errors = errors;
            return None;
        }
        self.registration_errors.clear();
        Some(self.registration.email_value())
    }

    /// Leave registration and open the wizard for `email`
    pub fn enter_wizard(&mut self, email: String) {
        self.registration = RegistrationForm::new();
        self.wizard = Wizard::institutional(Some(email));
        self.current_view = View::Wizard;
    }
}
