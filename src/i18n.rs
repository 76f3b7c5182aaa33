//! Localized message lookup
//!
//! Every user-facing string is looked up by a stable key. The built-in
//! English catalog can be overridden per key from a flat JSON file; a key
//! missing from both resolves to the key itself.

use crate::state::validation::ValidationMessage;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// `t(key, params)` lookup used by the UI
pub trait Translator {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String;

    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }

    fn message(&self, message: &ValidationMessage) -> String {
        let params: Vec<(&str, String)> = message
            .params
            .iter()
            .map(|(name, value)| (*name, value.clone()))
            .collect();
        self.translate(message.key, &params)
    }
}

const ENGLISH: &[(&str, &str)] = &[
    // Titles
    ("app.title", "Institutional Onboarding"),
    ("register.title", "Create your account"),
    ("register.hint", "Tab: next field  Enter: continue  Esc: quit"),
    ("wizard.hint", "Tab: next field  Space: toggle  Enter/{{submit}}: continue  {{back}}: back  {{sign_out}}: sign out  Esc: quit"),
    ("wizard.parties_hint", "{{add}}: add party  {{remove}}: remove last"),
    ("wizard.submitting", "Submitting application... (Esc to cancel)"),
    ("wizard.continue", "Continue"),
    ("wizard.submit", "Submit application"),
    ("wizard.back", "Back"),
    ("wizard.no_steps", "No onboarding steps are configured"),
    ("complete.title", "Application submitted"),
    ("complete.body", "Your application reference is {{reference}}. We will contact you at {{email}}."),
    ("complete.hint", "c / {{copy}}: copy reference  q: quit"),
    // Steps
    ("steps.info", "Institution"),
    ("steps.address", "Address"),
    ("steps.parties", "Key parties"),
    ("steps.documents", "Documents"),
    // Fields
    ("fields.email", "Email"),
    ("fields.password", "Password"),
    ("fields.confirm_password", "Confirm password"),
    ("fields.institution_name", "Institution name"),
    ("fields.lei_code", "LEI code"),
    ("fields.registered_country", "Registered country"),
    ("fields.tax_number", "Tax number"),
    ("fields.funding_source", "Source of funds"),
    ("fields.website", "Website (optional)"),
    ("fields.contact_email", "Contact email (optional)"),
    ("fields.street", "Street"),
    ("fields.city", "City"),
    ("fields.region", "State / region (optional)"),
    ("fields.postal_code", "Postal code"),
    ("fields.country", "Country"),
    ("fields.phone", "Phone (optional)"),
    ("fields.party_kind", "Party type"),
    ("fields.party_name", "Full name"),
    ("fields.party_id_document", "ID document number"),
    ("fields.party_registration_number", "Registration number"),
    ("fields.party_representative", "Representative"),
    ("fields.party_ownership", "Ownership %"),
    ("fields.certificate_of_incorporation", "Certificate of incorporation"),
    ("fields.articles_of_association", "Articles of association"),
    ("fields.proof_of_address", "Proof of address"),
    ("fields.supplementary", "Supplementary document (optional)"),
    ("fields.declaration", "I confirm the information provided is accurate"),
    ("parties.kind.individual", "Individual"),
    ("parties.kind.entity", "Entity"),
    ("parties.list", "Added parties"),
    ("parties.empty", "No parties added yet"),
    // Password strength
    ("password.strength", "Strength: {{level}}"),
    ("password.strength.weak", "weak"),
    ("password.strength.medium", "medium"),
    ("password.strength.strong", "strong"),
    // Validation
    ("validation.required", "This field is required"),
    ("validation.min_length", "Must be at least {{min}} characters"),
    ("validation.max_length", "Must be at most {{max}} characters"),
    ("validation.email.at_count", "Email must contain exactly one @"),
    ("validation.email.emoji", "Email must not contain emoji"),
    ("validation.email.at_position", "Email cannot start or end with @"),
    ("validation.email.consecutive_dots", "Email cannot contain consecutive dots"),
    ("validation.email.domain_too_long", "Email domain must be at most {{max}} characters"),
    ("validation.email.dot_position", "Email cannot start or end with a dot"),
    ("validation.email.empty_segment", "Email contains an empty segment"),
    ("validation.lei.length", "LEI code must be exactly {{length}} characters"),
    ("validation.lei.charset", "LEI code may only contain letters and digits"),
    ("validation.website", "Enter a URL like https://example.com"),
    ("validation.phone", "Phone may contain digits, spaces, hyphens, parentheses and a leading +"),
    ("validation.ownership.number", "Ownership must be a number"),
    ("validation.ownership.range", "Ownership must be above 0 and at most {{max}}%"),
    ("validation.ownership.total", "Total ownership cannot exceed {{max}}%"),
    ("validation.parties.required", "Add at least one key party"),
    ("validation.document.extension", "Accepted formats: {{allowed}}"),
    ("validation.declaration", "You must accept the declaration"),
    ("validation.password.too_short", "Password must be at least {{min}} characters"),
    ("validation.password.mismatch", "Passwords do not match"),
    // Banners and status
    ("errors.title", "Error"),
    ("errors.submission_failed", "Submission failed. Please try again."),
    ("errors.submission_rejected", "The application was rejected"),
    ("errors.incomplete", "The application is incomplete"),
    ("errors.store", "Could not save your session"),
    ("errors.clipboard", "Could not access the clipboard"),
    ("errors.dismiss", "Press Enter or Esc to dismiss"),
    ("status.step_invalid", "Please fix the highlighted fields"),
    ("status.party_added", "Party added"),
    ("status.party_removed", "Party removed"),
    ("status.submission_cancelled", "Submission cancelled"),
    ("status.copied", "Reference copied to clipboard"),
    ("status.submit_in_flight", "A submission is already in progress"),
];

/// Key/message catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Built-in English messages
    pub fn english() -> Self {
        Self {
            messages: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Override messages from a flat `{ "key": "message" }` JSON file
    pub fn load_overrides(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read messages from {}", path.display()))?;
        let overrides: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid message file {}", path.display()))?;
        let count = overrides.len();
        self.messages.extend(overrides);
        Ok(count)
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        match self.messages.get(key) {
            Some(template) => interpolate(template, params),
            None => {
                tracing::debug!(key, "missing translation");
                key.to_string()
            }
        }
    }
}

/// Replace `{{name}}` placeholders; unknown placeholders are left as-is
fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}
