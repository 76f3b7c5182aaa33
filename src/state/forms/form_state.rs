//! Form state management and per-step form structs

use super::field::FormField;
use crate::state::application::{
    DocumentSet, InstitutionInfo, KeyParty, RegisteredAddress, StepData,
};
use crate::state::steps::Step;
use crate::state::validation::{self, FormErrors, ValidationMessage};

pub const STEP_INFO: Step = Step::new("info", "steps.info");
pub const STEP_ADDRESS: Step = Step::new("address", "steps.address");
pub const STEP_PARTIES: Step = Step::new("parties", "steps.parties");
pub const STEP_DOCUMENTS: Step = Step::new("documents", "steps.documents");

/// Options for the key party kind toggle, in `KeyParty` variant order
pub const PARTY_KINDS: &[&str] = &["parties.kind.individual", "parties.kind.entity"];

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;

    /// Translator key for a field's label
    fn field_label(&self, index: usize) -> Option<&str> {
        self.get_field(index).map(|f| f.label.as_str())
    }

    /// Run the rule for the field at `index`
    fn validate_field(&self, index: usize) -> Option<ValidationMessage>;

    /// Run every field rule, in field order
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        for index in 0..self.field_count() {
            if let (Some(field), Some(message)) = (self.get_field(index), self.validate_field(index))
            {
                errors.insert(field.name.clone(), message);
            }
        }
        errors
    }

    #[cfg(test)]
    fn field_index(&self, name: &str) -> Option<usize> {
        (0..self.field_count()).find(|&i| self.get_field(i).is_some_and(|f| f.name == name))
    }

    /// First field in display order that has an error
    fn first_invalid_field(&self, errors: &FormErrors) -> Option<usize> {
        (0..self.field_count())
            .find(|&i| self.get_field(i).is_some_and(|f| errors.contains(&f.name)))
    }
}

// Registration Form
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub email: FormField,
    pub password: FormField,
    pub confirm_password: FormField,
    pub active_field_index: usize,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "fields.email"),
            password: FormField::secret("password", "fields.password"),
            confirm_password: FormField::secret("confirm_password", "fields.confirm_password"),
            active_field_index: 0,
        }
    }

    pub fn email_value(&self) -> String {
        self.email.as_text().trim().to_string()
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        3
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.email,
            1 => &mut self.password,
            _ => &mut self.confirm_password,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.email),
            1 => Some(&self.password),
            2 => Some(&self.confirm_password),
            _ => None,
        }
    }
    fn validate_field(&self, index: usize) -> Option<ValidationMessage> {
        match index {
            0 => validation::email(self.email.as_text().trim()),
            1 => validation::password(self.password.as_text()),
            2 => validation::password_confirmation(
                self.password.as_text(),
                self.confirm_password.as_text(),
            ),
            _ => None,
        }
    }
}

// Institution Info Form
#[derive(Debug, Clone)]
pub struct InstitutionInfoForm {
    pub institution_name: FormField,
    pub lei_code: FormField,
    pub registered_country: FormField,
    pub tax_number: FormField,
    pub funding_source: FormField,
    pub website: FormField,
    pub contact_email: FormField,
    pub active_field_index: usize,
}

impl InstitutionInfoForm {
    pub fn new() -> Self {
        Self {
            institution_name: FormField::text("institution_name", "fields.institution_name"),
            lei_code: FormField::text("lei_code", "fields.lei_code"),
            registered_country: FormField::text("registered_country", "fields.registered_country"),
            tax_number: FormField::text("tax_number", "fields.tax_number"),
            funding_source: FormField::text("funding_source", "fields.funding_source"),
            website: FormField::text("website", "fields.website"),
            contact_email: FormField::text("contact_email", "fields.contact_email"),
            active_field_index: 0,
        }
    }

    pub fn to_data(&self) -> InstitutionInfo {
        InstitutionInfo {
            institution_name: self.institution_name.as_text().trim().to_string(),
            lei_code: validation::canonical_lei(self.lei_code.as_text()),
            registered_country: self.registered_country.as_text().trim().to_string(),
            tax_number: self.tax_number.as_text().trim().to_string(),
            funding_source: self.funding_source.as_text().trim().to_string(),
            website: self.website.as_optional_text(),
            contact_email: self.contact_email.as_optional_text(),
        }
    }
}

impl Default for InstitutionInfoForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for InstitutionInfoForm {
    fn field_count(&self) -> usize {
        7
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(6);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.institution_name,
            1 => &mut self.lei_code,
            2 => &mut self.registered_country,
            3 => &mut self.tax_number,
            4 => &mut self.funding_source,
            5 => &mut self.website,
            _ => &mut self.contact_email,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.institution_name),
            1 => Some(&self.lei_code),
            2 => Some(&self.registered_country),
            3 => Some(&self.tax_number),
            4 => Some(&self.funding_source),
            5 => Some(&self.website),
            6 => Some(&self.contact_email),
            _ => None,
        }
    }
    fn validate_field(&self, index: usize) -> Option<ValidationMessage> {
        match index {
            0 => validation::institution_name(self.institution_name.as_text()),
            1 => validation::lei_code(self.lei_code.as_text()),
            2 => validation::required(self.registered_country.as_text()),
            3 => validation::required(self.tax_number.as_text()),
            4 => validation::funding_source(self.funding_source.as_text()),
            5 => validation::optional(self.website.as_text(), validation::website),
            6 => validation::optional(self.contact_email.as_text().trim(), validation::email),
            _ => None,
        }
    }
}

// Address Form
#[derive(Debug, Clone)]
pub struct AddressForm {
    pub street: FormField,
    pub city: FormField,
    pub region: FormField,
    pub postal_code: FormField,
    pub country: FormField,
    pub phone: FormField,
    pub active_field_index: usize,
}

impl AddressForm {
    pub fn new() -> Self {
        Self {
            street: FormField::text("street", "fields.street"),
            city: FormField::text("city", "fields.city"),
            region: FormField::text("region", "fields.region"),
            postal_code: FormField::text("postal_code", "fields.postal_code"),
            country: FormField::text("country", "fields.country"),
            phone: FormField::text("phone", "fields.phone"),
            active_field_index: 0,
        }
    }

    pub fn to_data(&self) -> RegisteredAddress {
        RegisteredAddress {
            street: self.street.as_text().trim().to_string(),
            city: self.city.as_text().trim().to_string(),
            region: self.region.as_optional_text(),
            postal_code: self.postal_code.as_text().trim().to_string(),
            country: self.country.as_text().trim().to_string(),
            phone: self.phone.as_optional_text(),
        }
    }
}

impl Default for AddressForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for AddressForm {
    fn field_count(&self) -> usize {
        6
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(5);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.street,
            1 => &mut self.city,
            2 => &mut self.region,
            3 => &mut self.postal_code,
            4 => &mut self.country,
            _ => &mut self.phone,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.street),
            1 => Some(&self.city),
            2 => Some(&self.region),
            3 => Some(&self.postal_code),
            4 => Some(&self.country),
            5 => Some(&self.phone),
            _ => None,
        }
    }
    fn validate_field(&self, index: usize) -> Option<ValidationMessage> {
        match index {
            0 => validation::required(self.street.as_text()),
            1 => validation::required(self.city.as_text()),
            3 => validation::required(self.postal_code.as_text()),
            4 => validation::required(self.country.as_text()),
            5 => validation::optional(self.phone.as_text(), validation::phone),
            _ => None,
        }
    }
}

// Key Parties Form
//
// The fields edit a draft party; `parties` holds the ones already added.
#[derive(Debug, Clone)]
pub struct KeyPartiesForm {
    pub kind: FormField,
    /// Individual name or entity registration number
    pub primary: FormField,
    /// Individual id document or entity representative
    pub secondary: FormField,
    pub ownership: FormField,
    pub parties: Vec<KeyParty>,
    pub active_field_index: usize,
}

/// Error key for the party list as a whole
pub const PARTIES_FIELD: &str = "parties";

impl KeyPartiesForm {
    pub fn new() -> Self {
        Self {
            kind: FormField::choice("kind", "fields.party_kind", PARTY_KINDS),
            primary: FormField::text("primary", "fields.party_name"),
            secondary: FormField::text("secondary", "fields.party_id_document"),
            ownership: FormField::text("ownership", "fields.party_ownership"),
            parties: Vec::new(),
            active_field_index: 0,
        }
    }

    pub fn is_entity(&self) -> bool {
        self.kind.selected_option() == 1
    }

    pub fn total_ownership(&self) -> f64 {
        self.parties.iter().map(KeyParty::ownership_pct).sum()
    }

    /// True when any draft text field has content
    pub fn has_draft(&self) -> bool {
        [&self.primary, &self.secondary, &self.ownership]
            .iter()
            .any(|f| !f.as_text().trim().is_empty())
    }

    /// Validate the draft and append it to the list
    pub fn add_party(&mut self) -> Result<(), FormErrors> {
        let mut errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let ownership_pct = parse_pct(self.ownership.as_text());
        if self.total_ownership() + ownership_pct > validation::OWNERSHIP_MAX_PCT {
            errors.insert(
                self.ownership.name.clone(),
                ValidationMessage::new("validation.ownership.total")
                    .with_param("max", validation::OWNERSHIP_MAX_PCT),
            );
            return Err(errors);
        }

        let primary = self.primary.as_text().trim().to_string();
        let secondary = self.secondary.as_text().trim().to_string();
        let party = if self.is_entity() {
            KeyParty::Entity {
                registration_number: primary,
                representative: secondary,
                ownership_pct,
            }
        } else {
            KeyParty::Individual {
                name: primary,
                id_document: secondary,
                ownership_pct,
            }
        };
        self.parties.push(party);
        self.primary.clear();
        self.secondary.clear();
        self.ownership.clear();
        self.active_field_index = 1;
        Ok(())
    }

    pub fn remove_last_party(&mut self) -> Option<KeyParty> {
        self.parties.pop()
    }

    /// Validate the party list for step submission
    pub fn validate_list(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if self.parties.is_empty() {
            errors.insert(
                PARTIES_FIELD,
                ValidationMessage::new("validation.parties.required"),
            );
        } else if self.total_ownership() > validation::OWNERSHIP_MAX_PCT {
            errors.insert(
                PARTIES_FIELD,
                ValidationMessage::new("validation.ownership.total")
                    .with_param("max", validation::OWNERSHIP_MAX_PCT),
            );
        }
        errors
    }
}

fn parse_pct(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .unwrap_or(0.0)
}

impl Default for KeyPartiesForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for KeyPartiesForm {
    fn field_count(&self) -> usize {
        4
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(3);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.kind,
            1 => &mut self.primary,
            2 => &mut self.secondary,
            _ => &mut self.ownership,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.kind),
            1 => Some(&self.primary),
            2 => Some(&self.secondary),
            3 => Some(&self.ownership),
            _ => None,
        }
    }
    fn field_label(&self, index: usize) -> Option<&str> {
        match (index, self.is_entity()) {
            (1, true) => Some("fields.party_registration_number"),
            (2, true) => Some("fields.party_representative"),
            _ => self.get_field(index).map(|f| f.label.as_str()),
        }
    }
    fn validate_field(&self, index: usize) -> Option<ValidationMessage> {
        match index {
            1 => validation::required(self.primary.as_text()),
            2 => validation::required(self.secondary.as_text()),
            3 => validation::ownership_pct(self.ownership.as_text()),
            _ => None,
        }
    }

    /// List-level errors land on the first draft field
    fn first_invalid_field(&self, errors: &FormErrors) -> Option<usize> {
        (0..self.field_count())
            .find(|&i| self.get_field(i).is_some_and(|f| errors.contains(&f.name)))
            .or_else(|| errors.contains(PARTIES_FIELD).then_some(1))
    }
}

// Documents Form
#[derive(Debug, Clone)]
pub struct DocumentsForm {
    pub certificate_of_incorporation: FormField,
    pub articles_of_association: FormField,
    pub proof_of_address: FormField,
    pub supplementary: FormField,
    pub declaration: FormField,
    pub active_field_index: usize,
}

impl DocumentsForm {
    pub fn new() -> Self {
        Self {
            certificate_of_incorporation: FormField::text(
                "certificate_of_incorporation",
                "fields.certificate_of_incorporation",
            ),
            articles_of_association: FormField::text(
                "articles_of_association",
                "fields.articles_of_association",
            ),
            proof_of_address: FormField::text("proof_of_address", "fields.proof_of_address"),
            supplementary: FormField::text("supplementary", "fields.supplementary"),
            declaration: FormField::flag("declaration", "fields.declaration"),
            active_field_index: 0,
        }
    }

    pub fn to_data(&self) -> DocumentSet {
        DocumentSet {
            certificate_of_incorporation: self
                .certificate_of_incorporation
                .as_text()
                .trim()
                .to_string(),
            articles_of_association: self.articles_of_association.as_text().trim().to_string(),
            proof_of_address: self.proof_of_address.as_text().trim().to_string(),
            supplementary: self.supplementary.as_optional_text(),
            declaration_accepted: self.declaration.as_flag(),
        }
    }
}

impl Default for DocumentsForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for DocumentsForm {
    fn field_count(&self) -> usize {
        5
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(4);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.certificate_of_incorporation,
            1 => &mut self.articles_of_association,
            2 => &mut self.proof_of_address,
            3 => &mut self.supplementary,
            _ => &mut self.declaration,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.certificate_of_incorporation),
            1 => Some(&self.articles_of_association),
            2 => Some(&self.proof_of_address),
            3 => Some(&self.supplementary),
            4 => Some(&self.declaration),
            _ => None,
        }
    }
    fn validate_field(&self, index: usize) -> Option<ValidationMessage> {
        match index {
            0 => validation::document_path(self.certificate_of_incorporation.as_text()),
            1 => validation::document_path(self.articles_of_association.as_text()),
            2 => validation::document_path(self.proof_of_address.as_text()),
            3 => validation::optional(self.supplementary.as_text(), validation::document_path),
            4 if !self.declaration.as_flag() => {
                Some(ValidationMessage::new("validation.declaration"))
            }
            _ => None,
        }
    }
}

/// The editable form behind each wizard step
#[derive(Debug, Clone)]
pub enum StepForm {
    Institution(InstitutionInfoForm),
    Address(AddressForm),
    Parties(KeyPartiesForm),
    Documents(DocumentsForm),
}

impl StepForm {
    /// The default institutional onboarding sequence
    pub fn institutional() -> Vec<StepForm> {
        vec![
            StepForm::Institution(InstitutionInfoForm::new()),
            StepForm::Address(AddressForm::new()),
            StepForm::Parties(KeyPartiesForm::new()),
            StepForm::Documents(DocumentsForm::new()),
        ]
    }

    pub fn step(&self) -> Step {
        match self {
            StepForm::Institution(_) => STEP_INFO,
            StepForm::Address(_) => STEP_ADDRESS,
            StepForm::Parties(_) => STEP_PARTIES,
            StepForm::Documents(_) => STEP_DOCUMENTS,
        }
    }

    pub fn as_form(&self) -> &dyn Form {
        match self {
            StepForm::Institution(f) => f,
            StepForm::Address(f) => f,
            StepForm::Parties(f) => f,
            StepForm::Documents(f) => f,
        }
    }

    pub fn as_form_mut(&mut self) -> &mut dyn Form {
        match self {
            StepForm::Institution(f) => f,
            StepForm::Address(f) => f,
            StepForm::Parties(f) => f,
            StepForm::Documents(f) => f,
        }
    }

    /// Full step validation, including list-level rules for parties
    pub fn validate(&self) -> FormErrors {
        match self {
            StepForm::Parties(f) => f.validate_list(),
            other => other.as_form().validate(),
        }
    }

    /// Typed data for the step. Only meaningful after `validate` passed.
    pub fn to_data(&self) -> StepData {
        match self {
            StepForm::Institution(f) => StepData::Institution(f.to_data()),
            StepForm::Address(f) => StepData::Address(f.to_data()),
            StepForm::Parties(f) => StepData::Parties(f.parties.clone()),
            StepForm::Documents(f) => StepData::Documents(f.to_data()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut dyn Form, values: &[(&str, &str)]) {
        for (name, value) in values {
            let index = form.field_index(name).expect("field exists");
            form.set_active_field(index);
            form.get_active_field_mut().set_text(*value);
        }
        form.set_active_field(0);
    }

    mod form_trait {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_next_field_wraps() {
            let mut form = AddressForm::new();
            for _ in 0..form.field_count() {
                form.next_field();
            }
            assert_eq!(form.active_field(), 0);
        }

        #[test]
        fn test_prev_field_wraps_to_last() {
            let mut form = DocumentsForm::new();
            form.prev_field();
            assert_eq!(form.active_field(), 4);
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = InstitutionInfoForm::new();
            form.set_active_field(100);
            assert_eq!(form.active_field(), 6);
        }

        #[test]
        fn test_first_invalid_field_follows_display_order() {
            let form = InstitutionInfoForm::new();
            let mut errors = FormErrors::new();
            errors.insert("tax_number", ValidationMessage::new("validation.required"));
            errors.insert("lei_code", ValidationMessage::new("validation.required"));
            assert_eq!(form.first_invalid_field(&errors), Some(1));
        }
    }

    mod registration_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_registration() {
            let mut form = RegistrationForm::new();
            fill(
                &mut form,
                &[
                    ("email", " user@example.com "),
                    ("password", "Sup3rSecret!"),
                    ("confirm_password", "Sup3rSecret!"),
                ],
            );
            assert!(form.validate().is_empty());
            assert_eq!(form.email_value(), "user@example.com");
        }

        #[test]
        fn test_mismatched_confirmation() {
            let mut form = RegistrationForm::new();
            fill(
                &mut form,
                &[
                    ("email", "user@example.com"),
                    ("password", "Sup3rSecret!"),
                    ("confirm_password", "Sup3rSecret?"),
                ],
            );
            let errors = form.validate();
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get("confirm_password").map(|m| m.key),
                Some("validation.password.mismatch")
            );
        }
    }

    mod institution_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_three_errors_for_missing_fields() {
            let mut form = InstitutionInfoForm::new();
            fill(
                &mut form,
                &[
                    ("institution_name", ""),
                    ("lei_code", "TOOSHORT"),
                    ("registered_country", "US"),
                    ("tax_number", ""),
                    ("funding_source", "Retained earnings"),
                ],
            );
            let errors = form.validate();
            assert_eq!(errors.len(), 3);
            assert!(errors.contains("institution_name"));
            assert!(errors.contains("lei_code"));
            assert!(errors.contains("tax_number"));
        }

        #[test]
        fn test_to_data_canonicalizes() {
            let mut form = InstitutionInfoForm::new();
            fill(
                &mut form,
                &[
                    ("institution_name", "  Acme Capital "),
                    ("lei_code", "abcdefghij0123456789"),
                    ("website", ""),
                ],
            );
            let data = form.to_data();
            assert_eq!(data.institution_name, "Acme Capital");
            assert_eq!(data.lei_code, "ABCDEFGHIJ0123456789");
            assert_eq!(data.website, None);
        }

        #[test]
        fn test_optional_fields_checked_when_present() {
            let mut form = InstitutionInfoForm::new();
            fill(
                &mut form,
                &[("website", "acme"), ("contact_email", "ops@@acme.com")],
            );
            let errors = form.validate();
            assert!(errors.contains("website"));
            assert!(errors.contains("contact_email"));
        }
    }

    mod address_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_region_and_phone_are_optional() {
            let mut form = AddressForm::new();
            fill(
                &mut form,
                &[
                    ("street", "1 Market St"),
                    ("city", "San Francisco"),
                    ("postal_code", "94105"),
                    ("country", "US"),
                ],
            );
            assert!(form.validate().is_empty());
            assert_eq!(form.to_data().region, None);
        }

        #[test]
        fn test_bad_phone() {
            let mut form = AddressForm::new();
            fill(&mut form, &[("phone", "call me")]);
            assert_eq!(
                form.validate().get("phone").map(|m| m.key),
                Some("validation.phone")
            );
        }
    }

    mod key_parties_form {
        use super::*;
        use pretty_assertions::assert_eq;

        fn draft(form: &mut KeyPartiesForm, primary: &str, secondary: &str, pct: &str) {
            form.primary.set_text(primary);
            form.secondary.set_text(secondary);
            form.ownership.set_text(pct);
        }

        #[test]
        fn test_add_individual_party() {
            let mut form = KeyPartiesForm::new();
            draft(&mut form, "Jane Doe", "P1234567", "60");
            assert!(form.add_party().is_ok());
            assert_eq!(form.parties.len(), 1);
            assert!(!form.has_draft());
            assert!(matches!(form.parties[0], KeyParty::Individual { .. }));
        }

        #[test]
        fn test_add_entity_party() {
            let mut form = KeyPartiesForm::new();
            form.kind.push_char(' ');
            assert!(form.is_entity());
            assert_eq!(form.field_label(1), Some("fields.party_registration_number"));
            draft(&mut form, "HRB 1234", "John Roe", "40%");
            form.add_party().unwrap();
            assert_eq!(
                form.parties[0],
                KeyParty::Entity {
                    registration_number: "HRB 1234".to_string(),
                    representative: "John Roe".to_string(),
                    ownership_pct: 40.0,
                }
            );
        }

        #[test]
        fn test_incomplete_draft_is_rejected() {
            let mut form = KeyPartiesForm::new();
            draft(&mut form, "Jane Doe", "", "abc");
            let errors = form.add_party().unwrap_err();
            assert!(errors.contains("secondary"));
            assert!(errors.contains("ownership"));
            assert!(form.parties.is_empty());
        }

        #[test]
        fn test_total_ownership_capped() {
            let mut form = KeyPartiesForm::new();
            draft(&mut form, "Jane Doe", "P1", "70");
            form.add_party().unwrap();
            draft(&mut form, "John Roe", "P2", "40");
            let errors = form.add_party().unwrap_err();
            assert_eq!(
                errors.get("ownership").map(|m| m.key),
                Some("validation.ownership.total")
            );
            assert_eq!(form.parties.len(), 1);
        }

        #[test]
        fn test_list_requires_a_party() {
            let form = KeyPartiesForm::new();
            let errors = StepForm::Parties(form).validate();
            assert!(errors.contains(PARTIES_FIELD));
        }

        #[test]
        fn test_list_error_focuses_first_draft_field() {
            let form = KeyPartiesForm::new();
            let errors = form.validate_list();
            assert_eq!(form.first_invalid_field(&errors), Some(1));
        }

        #[test]
        fn test_draft_error_wins_over_list_error() {
            let mut form = KeyPartiesForm::new();
            form.primary.set_text("Jane Doe");
            form.ownership.set_text("abc");
            let mut errors = form.validate();
            errors.insert(
                PARTIES_FIELD,
                ValidationMessage::new("validation.parties.required"),
            );
            assert_eq!(form.first_invalid_field(&errors), Some(2));
        }
    }

    mod documents_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_declaration_required() {
            let mut form = DocumentsForm::new();
            fill(
                &mut form,
                &[
                    ("certificate_of_incorporation", "coi.pdf"),
                    ("articles_of_association", "aoa.pdf"),
                    ("proof_of_address", "bill.jpg"),
                ],
            );
            let errors = form.validate();
            assert_eq!(errors.len(), 1);
            assert!(errors.contains("declaration"));

            form.declaration.push_char(' ');
            assert!(form.validate().is_empty());
            assert!(form.to_data().declaration_accepted);
        }
    }

    mod step_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_institutional_sequence_order() {
            let ids: Vec<&str> = StepForm::institutional()
                .iter()
                .map(|f| f.step().id)
                .collect();
            assert_eq!(ids, vec!["info", "address", "parties", "documents"]);
        }
    }
}
