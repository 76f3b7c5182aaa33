//! Form domain layer
//!
//! Type-safe editable forms for registration and each onboarding step.

mod field;
mod form_state;

pub use field::{FieldValue, FormField};
pub use form_state::{
    Form, KeyPartiesForm, RegistrationForm, StepForm, PARTIES_FIELD, PARTY_KINDS,
};
