//! Field validators for the onboarding forms
//!
//! Every validator is a pure function from the raw field text to an optional
//! [`ValidationMessage`]. Messages carry a stable lookup key plus parameters;
//! the UI turns them into text through the translator.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Maximum length of the part after `@`
pub const EMAIL_DOMAIN_MAX_LEN: usize = 255;
/// Exact length of a Legal Entity Identifier
pub const LEI_LENGTH: usize = 20;
pub const INSTITUTION_NAME_MIN_LEN: usize = 2;
pub const INSTITUTION_NAME_MAX_LEN: usize = 255;
pub const FUNDING_SOURCE_MAX_LEN: usize = 1024;
/// Hard minimum for passwords; everything else is advisory
pub const PASSWORD_MIN_LEN: usize = 8;
pub const OWNERSHIP_MAX_PCT: f64 = 100.0;

/// Accepted extensions for uploaded documents
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg"];

static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z][A-Za-z0-9+.\-]*://[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}(:\d+)?(/\S*)?$",
    )
    .expect("website pattern compiles")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("phone pattern compiles"));

/// A keyed, parameterised validation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    pub key: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl ValidationMessage {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }
}

/// A validator over a single field value
pub type Rule = fn(&str) -> Option<ValidationMessage>;

/// Per-field error map for one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<String, ValidationMessage>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: ValidationMessage) {
        self.errors.insert(field.into(), message);
    }

    /// Set or clear a field's error from a fresh validation result
    pub fn set(&mut self, field: &str, result: Option<ValidationMessage>) {
        match result {
            Some(message) => self.insert(field, message),
            None => self.clear_field(field),
        }
    }

    pub fn get(&self, field: &str) -> Option<&ValidationMessage> {
        self.errors.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationMessage)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Run `rule` only when the field has content
pub fn optional(value: &str, rule: Rule) -> Option<ValidationMessage> {
    if value.trim().is_empty() {
        None
    } else {
        rule(value)
    }
}

pub fn required(value: &str) -> Option<ValidationMessage> {
    if value.trim().is_empty() {
        Some(ValidationMessage::new("validation.required"))
    } else {
        None
    }
}

/// Pictographic code points, plus the joiners and selectors that build emoji sequences
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x00A9, 0x00A9),
    (0x00AE, 0x00AE),
    (0x200D, 0x200D),
    (0x203C, 0x203C),
    (0x2049, 0x2049),
    (0x20E3, 0x20E3),
    (0x2122, 0x2122),
    (0x2139, 0x2139),
    (0x2194, 0x2199),
    (0x21A9, 0x21AA),
    (0x2300, 0x23FF),
    (0x24C2, 0x24C2),
    (0x25AA, 0x25AB),
    (0x25B6, 0x25B6),
    (0x25C0, 0x25C0),
    (0x25FB, 0x25FE),
    (0x2600, 0x27BF),
    (0x2934, 0x2935),
    (0x2B00, 0x2BFF),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
    (0xFE00, 0xFE0F),
    (0x1F000, 0x1FAFF),
    (0xE0020, 0xE007F),
];

fn is_emoji(c: char) -> bool {
    let c = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}

fn has_empty_segment(part: &str) -> bool {
    part.split('.').any(str::is_empty)
}

/// Email syntax rules used by registration and contact fields
pub fn email(value: &str) -> Option<ValidationMessage> {
    if value.trim().is_empty() {
        return Some(ValidationMessage::new("validation.required"));
    }
    if value.matches('@').count() != 1 {
        return Some(ValidationMessage::new("validation.email.at_count"));
    }
    if value.chars().any(is_emoji) {
        return Some(ValidationMessage::new("validation.email.emoji"));
    }
    if value.starts_with('@') || value.ends_with('@') {
        return Some(ValidationMessage::new("validation.email.at_position"));
    }
    if value.contains("..") {
        return Some(ValidationMessage::new("validation.email.consecutive_dots"));
    }

    let Some((local, domain)) = value.split_once('@') else {
        return Some(ValidationMessage::new("validation.email.at_count"));
    };
    if domain.chars().count() > EMAIL_DOMAIN_MAX_LEN {
        return Some(
            ValidationMessage::new("validation.email.domain_too_long")
                .with_param("max", EMAIL_DOMAIN_MAX_LEN),
        );
    }
    if value.starts_with('.') || value.ends_with('.') {
        return Some(ValidationMessage::new("validation.email.dot_position"));
    }
    if has_empty_segment(local) || has_empty_segment(domain) {
        return Some(ValidationMessage::new("validation.email.empty_segment"));
    }
    None
}

/// Uppercase form of an LEI as it is stored and checked
pub fn canonical_lei(value: &str) -> String {
    value.to_uppercase()
}

/// Legal Entity Identifier: 20 alphanumeric characters, case-insensitive
pub fn lei_code(value: &str) -> Option<ValidationMessage> {
    if value.trim().is_empty() {
        return Some(ValidationMessage::new("validation.required"));
    }
    let canonical = canonical_lei(value);
    if canonical.chars().count() != LEI_LENGTH {
        return Some(ValidationMessage::new("validation.lei.length").with_param("length", LEI_LENGTH));
    }
    if !canonical.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(ValidationMessage::new("validation.lei.charset"));
    }
    None
}

fn length_between(value: &str, min: usize, max: usize) -> Option<ValidationMessage> {
    let len = value.trim().chars().count();
    if len == 0 {
        Some(ValidationMessage::new("validation.required"))
    } else if len < min {
        Some(ValidationMessage::new("validation.min_length").with_param("min", min))
    } else if len > max {
        Some(ValidationMessage::new("validation.max_length").with_param("max", max))
    } else {
        None
    }
}

pub fn institution_name(value: &str) -> Option<ValidationMessage> {
    length_between(value, INSTITUTION_NAME_MIN_LEN, INSTITUTION_NAME_MAX_LEN)
}

pub fn funding_source(value: &str) -> Option<ValidationMessage> {
    length_between(value, 1, FUNDING_SOURCE_MAX_LEN)
}

/// `scheme://host.tld` with optional port and path
pub fn website(value: &str) -> Option<ValidationMessage> {
    if WEBSITE_RE.is_match(value.trim()) {
        None
    } else {
        Some(ValidationMessage::new("validation.website"))
    }
}

pub fn phone(value: &str) -> Option<ValidationMessage> {
    if PHONE_RE.is_match(value.trim()) {
        None
    } else {
        Some(ValidationMessage::new("validation.phone"))
    }
}

/// Ownership percentage in `(0, 100]`
pub fn ownership_pct(value: &str) -> Option<ValidationMessage> {
    if value.trim().is_empty() {
        return Some(ValidationMessage::new("validation.required"));
    }
    match value.trim().trim_end_matches('%').trim().parse::<f64>() {
        Ok(pct) if pct > 0.0 && pct <= OWNERSHIP_MAX_PCT => None,
        Ok(_) => Some(
            ValidationMessage::new("validation.ownership.range").with_param("max", OWNERSHIP_MAX_PCT),
        ),
        Err(_) => Some(ValidationMessage::new("validation.ownership.number")),
    }
}

/// Path to an uploaded document with an accepted extension
pub fn document_path(value: &str) -> Option<ValidationMessage> {
    if value.trim().is_empty() {
        return Some(ValidationMessage::new("validation.required"));
    }
    let extension = std::path::Path::new(value.trim())
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension {
        Some(ext) if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) => None,
        _ => Some(
            ValidationMessage::new("validation.document.extension")
                .with_param("allowed", DOCUMENT_EXTENSIONS.join(", ")),
        ),
    }
}

pub fn password(value: &str) -> Option<ValidationMessage> {
    if value.is_empty() {
        return Some(ValidationMessage::new("validation.required"));
    }
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Some(
            ValidationMessage::new("validation.password.too_short").with_param("min", PASSWORD_MIN_LEN),
        );
    }
    None
}

pub fn password_confirmation(password: &str, confirmation: &str) -> Option<ValidationMessage> {
    if confirmation.is_empty() {
        Some(ValidationMessage::new("validation.required"))
    } else if password != confirmation {
        Some(ValidationMessage::new("validation.password.mismatch"))
    } else {
        None
    }
}

/// Bucketed password strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::Weak => "password.strength.weak",
            Self::Medium => "password.strength.medium",
            Self::Strong => "password.strength.strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub level: StrengthLevel,
}

/// Highest score `password_strength` can return
pub const PASSWORD_MAX_SCORE: u8 = 6;

/// Advisory strength score: one point per satisfied criterion
pub fn password_strength(value: &str) -> PasswordStrength {
    let len = value.chars().count();
    let criteria = [
        len >= 8,
        len >= 12,
        value.chars().any(|c| c.is_ascii_lowercase()),
        value.chars().any(|c| c.is_ascii_uppercase()),
        value.chars().any(|c| c.is_ascii_digit()),
        value.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = criteria.iter().filter(|met| **met).count() as u8;
    let level = match score {
        0..=2 => StrengthLevel::Weak,
        3..=4 => StrengthLevel::Medium,
        _ => StrengthLevel::Strong,
    };
    PasswordStrength { score, level }
}
