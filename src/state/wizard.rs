//! Wizard controller
//!
//! Mediates between the step sequence and the per-step forms: runs the
//! active step's validators on submit, merges validated data into the
//! application record, and gates progression on the result.

use super::application::{Application, IncompleteApplication, SubmissionRequest};
use super::forms::StepForm;
use super::steps::{Step, StepSequence};
use super::validation::FormErrors;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WizardPhase {
    #[default]
    Editing,
    /// Final step accepted, waiting on the submission endpoint
    Submitting,
    Complete {
        reference: String,
    },
}

/// Result of a submit-step action
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Validation failed; the user stays on the step
    Invalid {
        error_count: usize,
        focus: Option<usize>,
    },
    Advanced {
        to: &'static str,
    },
    /// Final step accepted; the request goes to the submission endpoint
    ReadyToSubmit(Box<SubmissionRequest>),
    Incomplete(IncompleteApplication),
    /// Nothing to submit: no steps, already submitting, or complete
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    steps: StepSequence,
    forms: Vec<StepForm>,
    errors: FormErrors,
    application: Application,
    phase: WizardPhase,
}

impl Wizard {
    pub fn new(forms: Vec<StepForm>, applicant_email: Option<String>) -> Self {
        let steps = StepSequence::new(forms.iter().map(StepForm::step).collect());
        Self {
            steps,
            forms,
            errors: FormErrors::new(),
            application: Application::new(applicant_email),
            phase: WizardPhase::Editing,
        }
    }

    /// info → address → parties → documents
    pub fn institutional(applicant_email: Option<String>) -> Self {
        Self::new(StepForm::institutional(), applicant_email)
    }

    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.current()
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, WizardPhase::Complete { .. })
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn application(&self) -> &Application {
        &self.application
    }

    pub fn current_form(&self) -> Option<&StepForm> {
        self.steps.current_index().and_then(|i| self.forms.get(i))
    }

    fn current_form_mut(&mut self) -> Option<&mut StepForm> {
        self.steps.current_index().and_then(|i| self.forms.get_mut(i))
    }

    fn editable_form_mut(&mut self) -> Option<&mut StepForm> {
        if self.phase == WizardPhase::Editing {
            self.current_form_mut()
        } else {
            None
        }
    }

    fn active_field_name(&self) -> Option<String> {
        let form = self.current_form()?.as_form();
        form.get_field(form.active_field()).map(|f| f.name.clone())
    }

    /// Type into the active field; clears that field's error
    pub fn input_char(&mut self, c: char) {
        let Some(form) = self.editable_form_mut() else {
            return;
        };
        form.as_form_mut().get_active_field_mut().push_char(c);
        if let Some(name) = self.active_field_name() {
            self.errors.clear_field(&name);
        }
    }

    pub fn backspace(&mut self) {
        let Some(form) = self.editable_form_mut() else {
            return;
        };
        form.as_form_mut().get_active_field_mut().pop_char();
        if let Some(name) = self.active_field_name() {
            self.errors.clear_field(&name);
        }
    }

    /// Re-run the active field's rule as focus leaves it
    fn blur(&mut self) {
        let Some(form) = self.current_form() else {
            return;
        };
        let form = form.as_form();
        let index = form.active_field();
        let Some(field) = form.get_field(index) else {
            return;
        };
        let name = field.name.clone();
        let result = form.validate_field(index);
        self.errors.set(&name, result);
    }

    pub fn next_field(&mut self) {
        if self.phase != WizardPhase::Editing {
            return;
        }
        self.blur();
        if let Some(form) = self.current_form_mut() {
            form.as_form_mut().next_field();
        }
    }

    pub fn prev_field(&mut self) {
        if self.phase != WizardPhase::Editing {
            return;
        }
        self.blur();
        if let Some(form) = self.current_form_mut() {
            form.as_form_mut().prev_field();
        }
    }

    fn reject(&mut self, errors: FormErrors) -> StepOutcome {
        let focus = self
            .current_form()
            .and_then(|f| f.as_form().first_invalid_field(&errors));
        if let (Some(index), Some(form)) = (focus, self.current_form_mut()) {
            form.as_form_mut().set_active_field(index);
        }
        let error_count = errors.len();
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        debug!(error_count, ?fields, "step validation failed");
        self.errors = errors;
        StepOutcome::Invalid { error_count, focus }
    }

    /// Validate the active step and move on, or submit on the last step
    pub fn submit_step(&mut self) -> StepOutcome {
        if self.phase != WizardPhase::Editing {
            return StepOutcome::Ignored;
        }

        // A filled-in party draft is added before the list is checked
        if let Some(StepForm::Parties(parties)) = self.current_form_mut() {
            if parties.has_draft() {
                if let Err(errors) = parties.add_party() {
                    return self.reject(errors);
                }
            }
        }

        let Some(form) = self.current_form() else {
            return StepOutcome::Ignored;
        };
        let errors = form.validate();
        if !errors.is_empty() {
            return self.reject(errors);
        }

        let data = form.to_data();
        self.application.merge(data);
        self.errors.clear();

        if self.steps.is_last() {
            match self.application.to_request() {
                Ok(request) => {
                    info!(application_id = %request.application_id, "application ready to submit");
                    self.phase = WizardPhase::Submitting;
                    StepOutcome::ReadyToSubmit(Box::new(request))
                }
                Err(missing) => StepOutcome::Incomplete(missing),
            }
        } else {
            self.steps.advance();
            let to = self.steps.current().map(|s| s.id).unwrap_or_default();
            debug!(step = to, "advanced to step");
            StepOutcome::Advanced { to }
        }
    }

    /// Go back one step; data entered so far is kept
    pub fn retreat(&mut self) -> bool {
        if self.phase != WizardPhase::Editing {
            return false;
        }
        let moved = self.steps.retreat();
        if moved {
            self.errors.clear();
        }
        moved
    }

    /// Add the drafted key party (parties step only)
    pub fn add_party(&mut self) -> bool {
        let Some(StepForm::Parties(parties)) = self.editable_form_mut() else {
            return false;
        };
        match parties.add_party() {
            Ok(()) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                self.reject(errors);
                false
            }
        }
    }

    pub fn remove_last_party(&mut self) -> bool {
        match self.editable_form_mut() {
            Some(StepForm::Parties(parties)) => parties.remove_last_party().is_some(),
            _ => false,
        }
    }

    /// Resolve an in-flight submission. `Some(reference)` is terminal with
    /// every step completed; `None` returns to editing on the last step.
    pub fn finish_submission(&mut self, reference: Option<String>) {
        if self.phase != WizardPhase::Submitting {
            return;
        }
        match reference {
            Some(reference) => {
                info!(%reference, "application accepted");
                self.steps.complete();
                self.phase = WizardPhase::Complete { reference };
            }
            None => self.phase = WizardPhase::Editing,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::state::forms::PARTIES_FIELD;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_info_yields_three_errors_and_stays() {
        let mut wizard = Wizard::institutional(None);
        type_into(&mut wizard, "institution_name", "");
        type_into(&mut wizard, "lei_code", "TOOSHORT");
        type_into(&mut wizard, "registered_country", "US");
        type_into(&mut wizard, "tax_number", "");
        type_into(&mut wizard, "funding_source", "Retained earnings");

        let outcome = wizard.submit_step();

        assert_eq!(
            outcome,
            StepOutcome::Invalid {
                error_count: 3,
                focus: Some(0)
            }
        );
        assert_eq!(wizard.errors().len(), 3);
        assert_eq!(wizard.current_step().map(|s| s.id), Some("info"));
        assert!(wizard.application().institution.is_none());
    }

    #[test]
    fn test_valid_info_advances_to_address() {
        let mut wizard = Wizard::institutional(None);
        fill_valid_info(&mut wizard);

        let outcome = wizard.submit_step();

        assert_eq!(outcome, StepOutcome::Advanced { to: "address" });
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.current_step().map(|s| s.id), Some("address"));
        assert_eq!(
            wizard
                .application()
                .institution
                .as_ref()
                .map(|i| i.lei_code.as_str()),
            Some("12345678901234567890")
        );
    }

    #[test]
    fn test_focus_moves_to_first_invalid_field() {
        let mut wizard = Wizard::institutional(None);
        fill_valid_info(&mut wizard);
        type_into(&mut wizard, "tax_number", "");
        let form = wizard.current_form_mut().unwrap().as_form_mut();
        let tax_index = form.field_index("tax_number").unwrap();
        form.get_active_field_mut().clear();
        form.set_active_field(0);

        let outcome = wizard.submit_step();

        assert_eq!(
            outcome,
            StepOutcome::Invalid {
                error_count: 1,
                focus: Some(tax_index)
            }
        );
        assert_eq!(wizard.current_form().unwrap().as_form().active_field(), tax_index);
    }

    #[test]
    fn test_editing_clears_field_error() {
        let mut wizard = Wizard::institutional(None);
        wizard.submit_step();
        assert!(wizard.errors().contains("institution_name"));
        type_into(&mut wizard, "institution_name", "A");
        assert!(!wizard.errors().contains("institution_name"));
        assert!(wizard.errors().contains("lei_code"));
    }

    #[test]
    fn test_blur_validates_field_being_left() {
        let mut wizard = Wizard::institutional(None);
        type_into(&mut wizard, "lei_code", "ABC");
        wizard.next_field();
        assert_eq!(
            wizard.errors().get("lei_code").map(|m| m.key),
            Some("validation.lei.length")
        );
    }

    #[test]
    fn test_retreat_keeps_entered_data() {
        let mut wizard = Wizard::institutional(None);
        fill_valid_info(&mut wizard);
        wizard.submit_step();
        assert!(wizard.retreat());
        assert_eq!(wizard.current_step().map(|s| s.id), Some("info"));
        assert!(!wizard.retreat());
        match wizard.current_form() {
            Some(StepForm::Institution(form)) => {
                assert_eq!(form.institution_name.as_text(), "Acme Capital")
            }
            other => panic!("unexpected form {other:?}"),
        }
    }

    #[test]
    fn test_parties_step_requires_a_party() {
        let mut wizard = Wizard::institutional(None);
        fill_valid_info(&mut wizard);
        wizard.submit_step();
        fill_valid_address(&mut wizard);
        wizard.submit_step();

        let outcome = wizard.submit_step();
        assert_eq!(
            outcome,
            StepOutcome::Invalid {
                error_count: 1,
                focus: Some(1)
            }
        );
        assert!(wizard.errors().contains(PARTIES_FIELD));
        assert_eq!(
            wizard.current_form().map(|f| f.as_form().active_field()),
            Some(1)
        );

        fill_party(&mut wizard);
        assert!(wizard.add_party());
        assert_eq!(wizard.submit_step(), StepOutcome::Advanced { to: "documents" });
        assert_eq!(wizard.application().parties.len(), 1);
    }

    #[test]
    fn test_final_step_builds_request_and_blocks_resubmit() {
        let mut wizard = Wizard::institutional(Some("ops@acme.com".to_string()));
        advance_to_documents(&mut wizard);
        fill_documents(&mut wizard);

        let request = match wizard.submit_step() {
            StepOutcome::ReadyToSubmit(request) => request,
            other => panic!("expected request, got {other:?}"),
        };
        assert_eq!(request.applicant_email.as_deref(), Some("ops@acme.com"));
        assert_eq!(request.parties.len(), 1);
        assert!(wizard.is_submitting());

        assert_eq!(wizard.submit_step(), StepOutcome::Ignored);
        assert!(!wizard.retreat());
    }

    #[test]
    fn test_reopen_after_failed_submission() {
        let mut wizard = Wizard::institutional(None);
        advance_to_documents(&mut wizard);
        fill_documents(&mut wizard);
        wizard.submit_step();

        wizard.finish_submission(None);

        assert_eq!(wizard.phase(), &WizardPhase::Editing);
        assert_eq!(wizard.current_step().map(|s| s.id), Some("documents"));
        assert!(matches!(wizard.submit_step(), StepOutcome::ReadyToSubmit(_)));
    }

    #[test]
    fn test_complete_marks_every_step_completed() {
        let mut wizard = Wizard::institutional(None);
        advance_to_documents(&mut wizard);
        fill_documents(&mut wizard);
        wizard.submit_step();

        wizard.finish_submission(Some("KYC-0001".to_string()));

        assert!(wizard.is_complete());
        assert!(wizard.steps().is_complete());
        assert_eq!(wizard.steps().progress(), 1.0);
        assert_eq!(wizard.submit_step(), StepOutcome::Ignored);
        assert_eq!(
            wizard.phase(),
            &WizardPhase::Complete {
                reference: "KYC-0001".to_string()
            }
        );
    }

    #[test]
    fn test_finish_ignored_unless_submitting() {
        let mut wizard = Wizard::institutional(None);
        wizard.finish_submission(Some("KYC-0001".to_string()));
        assert_eq!(wizard.phase(), &WizardPhase::Editing);
        assert!(!wizard.steps().is_complete());
    }

    #[test]
    fn test_empty_wizard_is_inert() {
        let mut wizard = Wizard::new(Vec::new(), None);
        assert!(wizard.current_step().is_none());
        assert_eq!(wizard.submit_step(), StepOutcome::Ignored);
        assert!(!wizard.retreat());
        wizard.input_char('x');
        wizard.next_field();
    }

    #[test]
    fn test_incomplete_sequence_cannot_submit() {
        let mut wizard = Wizard::new(
            vec![StepForm::Institution(Default::default())],
            None,
        );
        fill_valid_info(&mut wizard);
        assert_eq!(
            wizard.submit_step(),
            StepOutcome::Incomplete(IncompleteApplication("address"))
        );
        assert_eq!(wizard.phase(), &WizardPhase::Editing);
    }
}
