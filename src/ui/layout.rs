//! Layout components (header, sidebar, status bar)

use super::components::notice_text;
use crate::app::App;
use crate::i18n::Translator;
use crate::platform::{
    ADD_PARTY_SHORTCUT, BACK_SHORTCUT, REMOVE_PARTY_SHORTCUT, SIGN_OUT_SHORTCUT, SUBMIT_SHORTCUT,
};
use crate::state::forms::StepForm;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the step indicator sidebar
const SIDEBAR_WIDTH: u16 = 24;

/// Regions of the screen
pub struct Regions {
    pub header: Rect,
    pub sidebar: Option<Rect>,
    pub main: Rect,
    pub status: Rect,
}

/// Header, body and status bar; the body gets a sidebar when requested
pub fn create_layout(area: Rect, with_sidebar: bool) -> Regions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let (sidebar, main) = if with_sidebar {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[1]);
        (Some(columns[0]), columns[1])
    } else {
        (None, rows[1])
    };

    Regions {
        header: rows[0],
        sidebar,
        main,
        status: rows[2],
    }
}

/// Draw the title line with the signed-in applicant on the right
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.translator.t("app.title")),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(email) = &app.state.wizard.application().applicant_email {
        if app.state.current_view != View::Register {
            spans.push(Span::styled(
                format!(" {email}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let translator = &app.translator;
    let mut spans = vec![];

    if app.is_submitting() {
        spans.push(Span::styled(
            format!(" {} ", translator.t("wizard.submitting")),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(
            format!(" {}", view_hints(translator, app)),
            Style::default().fg(Color::Gray),
        ));
    }

    if let Some(notice) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            notice_text(translator, notice).replace('\n', " "),
            Style::default().fg(Color::Green),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Get keyboard hints for the current view
fn view_hints(translator: &dyn Translator, app: &App) -> String {
    match app.state.current_view {
        View::Register => translator.t("register.hint"),
        View::Wizard => {
            let hint = translator.translate(
                "wizard.hint",
                &[
                    ("submit", SUBMIT_SHORTCUT.to_string()),
                    ("back", BACK_SHORTCUT.to_string()),
                    ("sign_out", SIGN_OUT_SHORTCUT.to_string()),
                ],
            );
            if matches!(app.state.wizard.current_form(), Some(StepForm::Parties(_))) {
                let parties = translator.translate(
                    "wizard.parties_hint",
                    &[
                        ("add", ADD_PARTY_SHORTCUT.to_string()),
                        ("remove", REMOVE_PARTY_SHORTCUT.to_string()),
                    ],
                );
                format!("{hint}  {parties}")
            } else {
                hint
            }
        }
        View::Complete => String::new(),
    }
}
