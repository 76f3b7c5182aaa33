//! Field rendering utilities for forms

use crate::i18n::Translator;
use crate::state::forms::{FieldValue, Form, FormField};
use crate::state::validation::FormErrors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

/// Rows taken by one bordered field
pub const FIELD_HEIGHT: u16 = 3;

/// Value as shown to the user; choice options are translated
fn field_display(translator: &dyn Translator, field: &FormField) -> String {
    match &field.value {
        FieldValue::Choice { .. } => format!("< {} >", translator.t(&field.display_value())),
        _ => field.display_value(),
    }
}

/// Draw a form field; a validation message replaces the bottom border
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    error: Option<&str>,
) {
    let border_style = match (error.is_some(), is_active) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let value_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let cursor = if is_active { "▌" } else { "" };
    let content = Paragraph::new(Line::from(vec![
        Span::styled(value, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let mut block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(content.block(block), area);
}

/// Fields that fit in `capacity` rows of fields, keeping `active` in view
pub fn visible_window(count: usize, active: usize, capacity: usize) -> Range<usize> {
    if capacity == 0 {
        return 0..0;
    }
    if count <= capacity {
        return 0..count;
    }
    let start = (active + 1).saturating_sub(capacity).min(count - capacity);
    start..start + capacity
}

/// Draw every field of `form` that fits in `area`, with inline errors
pub fn draw_form_fields(
    frame: &mut Frame,
    area: Rect,
    translator: &dyn Translator,
    form: &dyn Form,
    errors: &FormErrors,
    is_focused: bool,
) {
    let capacity = (area.height / FIELD_HEIGHT) as usize;
    let window = visible_window(form.field_count(), form.active_field(), capacity);
    if window.is_empty() {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            window
                .clone()
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (row, index) in window.enumerate() {
        let Some(field) = form.get_field(index) else {
            continue;
        };
        let label = form
            .field_label(index)
            .map(|key| translator.t(key))
            .unwrap_or_default();
        let error = errors.get(&field.name).map(|m| translator.message(m));
        draw_field(
            frame,
            rows[row],
            &label,
            &field_display(translator, field),
            is_focused && index == form.active_field(),
            error.as_deref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::state::forms::PARTY_KINDS;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_window_fits_everything() {
        assert_eq!(visible_window(4, 3, 7), 0..4);
    }

    #[test]
    fn test_window_follows_active_field() {
        assert_eq!(visible_window(7, 0, 3), 0..3);
        assert_eq!(visible_window(7, 2, 3), 0..3);
        assert_eq!(visible_window(7, 4, 3), 2..5);
        assert_eq!(visible_window(7, 6, 3), 4..7);
    }

    #[test]
    fn test_window_without_room() {
        assert_eq!(visible_window(7, 2, 0), 0..0);
    }

    #[test]
    fn test_choice_is_translated() {
        let catalog = Catalog::english();
        let mut field = FormField::choice("kind", "fields.party_kind", PARTY_KINDS);
        assert_eq!(field_display(&catalog, &field), "< Individual >");
        field.push_char(' ');
        assert_eq!(field_display(&catalog, &field), "< Entity >");
    }

    #[test]
    fn test_secret_is_masked() {
        let catalog = Catalog::english();
        let mut field = FormField::secret("password", "fields.password");
        field.set_text("hunter22");
        assert_eq!(field_display(&catalog, &field), "••••••••");
    }
}
