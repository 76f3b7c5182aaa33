//! Account registration form

use super::field_renderer::{draw_form_fields, FIELD_HEIGHT};
use crate::app::App;
use crate::i18n::Translator;
use crate::state::validation::{PasswordStrength, StrengthLevel, PASSWORD_MAX_SCORE};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, LineGauge},
    Frame,
};

const FORM_WIDTH: u16 = 64;

fn strength_color(level: StrengthLevel) -> Color {
    match level {
        StrengthLevel::Weak => Color::Red,
        StrengthLevel::Medium => Color::Yellow,
        StrengthLevel::Strong => Color::Green,
    }
}

fn strength_label(translator: &dyn Translator, strength: PasswordStrength) -> String {
    let level = translator.t(strength.level.message_key());
    translator.translate("password.strength", &[("level", level)])
}

pub fn draw_registration(frame: &mut Frame, area: Rect, app: &App) {
    let translator = &app.translator;
    let [column] = Layout::horizontal([Constraint::Length(FORM_WIDTH)])
        .flex(Flex::Center)
        .areas(area);

    let block = Block::default()
        .title(format!(" {} ", translator.t("register.title")))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(column);
    frame.render_widget(block, column);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT * 3), // Fields
            Constraint::Length(1),                // Strength meter
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT), // Continue
            Constraint::Min(0),
        ])
        .split(inner);

    draw_form_fields(
        frame,
        chunks[0],
        translator,
        &app.state.registration,
        &app.state.registration_errors,
        true,
    );

    let strength = app.state.password_strength();
    let meter = LineGauge::default()
        .label(strength_label(translator, strength))
        .filled_style(Style::default().fg(strength_color(strength.level)))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .ratio(f64::from(strength.score) / f64::from(PASSWORD_MAX_SCORE));
    frame.render_widget(meter, chunks[1]);

    let [button] = Layout::horizontal([Constraint::Length(20)])
        .flex(Flex::End)
        .areas(chunks[3]);
    render_button(frame, button, &translator.t("wizard.continue"), true, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::state::validation::password_strength;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strength_label() {
        let catalog = Catalog::english();
        assert_eq!(
            strength_label(&catalog, password_strength("abc")),
            "Strength: weak"
        );
        assert_eq!(
            strength_label(&catalog, password_strength("Abcdefgh1!xy")),
            "Strength: strong"
        );
    }
}
