//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Checkbox, toggled with space
    Flag(bool),
    /// One of a fixed set of options (translator keys), cycled with space
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    /// Translator key for the field label
    pub label: String,
    pub value: FieldValue,
    /// Render the value as bullets (passwords)
    pub is_masked: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_masked: false,
        }
    }

    /// Create a masked text field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_masked: true,
            ..Self::text(name, label)
        }
    }

    /// Create a new checkbox field
    pub fn flag(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Flag(false),
            is_masked: false,
        }
    }

    /// Create a choice field with the first option selected
    pub fn choice(name: &str, label: &str, options: &'static [&'static str]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Choice {
                options,
                selected: 0,
            },
            is_masked: false,
        }
    }

    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) | FieldValue::Choice { .. } => "",
        }
    }

    /// Trimmed text, `None` when blank
    pub fn as_optional_text(&self) -> Option<String> {
        let value = self.as_text().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Get the flag value (returns false for other fields)
    pub fn as_flag(&self) -> bool {
        matches!(self.value, FieldValue::Flag(true))
    }

    /// Index of the selected option (0 for non-choice fields)
    pub fn selected_option(&self) -> usize {
        match self.value {
            FieldValue::Choice { selected, .. } => selected,
            _ => 0,
        }
    }

    /// Set the text value
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = FieldValue::Text(value.into());
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Flag(f) => {
                if c == ' ' {
                    *f = !*f;
                }
            }
            FieldValue::Choice { options, selected } => {
                if c == ' ' && !options.is_empty() {
                    *selected = (*selected + 1) % options.len();
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Flag(_) | FieldValue::Choice { .. } => {
                // Toggles have nothing to delete
            }
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Flag(f) => *f = false,
            FieldValue::Choice { selected, .. } => *selected = 0,
        }
    }

    /// Get the display value for rendering; choice labels are translator keys
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) if self.is_masked => "•".repeat(s.chars().count()),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(true) => "[x]".to_string(),
            FieldValue::Flag(false) => "[ ]".to_string(),
            FieldValue::Choice { options, selected } => options
                .get(*selected)
                .map(|o| o.to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: &[&str] = &["one", "two", "three"];

    #[test]
    fn test_text_push_and_pop() {
        let mut field = FormField::text("name", "Name");
        field.push_char('h');
        field.push_char('i');
        assert_eq!(field.as_text(), "hi");
        field.pop_char();
        assert_eq!(field.as_text(), "h");
    }

    #[test]
    fn test_optional_text_trims() {
        let mut field = FormField::text("website", "Website");
        field.set_text("   ");
        assert_eq!(field.as_optional_text(), None);
        field.set_text(" https://acme.com ");
        assert_eq!(field.as_optional_text().as_deref(), Some("https://acme.com"));
    }

    #[test]
    fn test_flag_toggles_on_space_only() {
        let mut field = FormField::flag("accept", "Accept");
        field.push_char('x');
        assert!(!field.as_flag());
        field.push_char(' ');
        assert!(field.as_flag());
        assert_eq!(field.display_value(), "[x]");
        field.clear();
        assert!(!field.as_flag());
    }

    #[test]
    fn test_choice_cycles_and_wraps() {
        let mut field = FormField::choice("kind", "Kind", KINDS);
        assert_eq!(field.display_value(), "one");
        for _ in 0..3 {
            field.push_char(' ');
        }
        assert_eq!(field.selected_option(), 0);
        field.push_char(' ');
        assert_eq!(field.display_value(), "two");
    }

    #[test]
    fn test_secret_is_masked() {
        let mut field = FormField::secret("password", "Password");
        field.set_text("hunter22");
        assert_eq!(field.display_value(), "••••••••");
        assert_eq!(field.as_text(), "hunter22");
    }
}
