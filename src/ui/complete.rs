//! Completion screen

use crate::app::App;
use crate::i18n::Translator;
use crate::platform::COPY_SHORTCUT;
use crate::state::WizardPhase;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let translator = &app.translator;
    let reference = match app.state.wizard.phase() {
        WizardPhase::Complete { reference } => reference.clone(),
        _ => app.last_reference().unwrap_or_default(),
    };
    let email = app
        .state
        .wizard
        .application()
        .applicant_email
        .clone()
        .unwrap_or_default();

    let [column] = Layout::horizontal([Constraint::Length(64)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::vertical([Constraint::Length(9)])
        .flex(Flex::Center)
        .areas(column);

    let lines = vec![
        Line::from(Span::styled(
            reference.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(translator.translate(
            "complete.body",
            &[("reference", reference), ("email", email)],
        )),
        Line::from(""),
        Line::from(Span::styled(
            translator.translate("complete.hint", &[("copy", COPY_SHORTCUT.to_string())]),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", translator.t("complete.title")))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(paragraph, card);
}
