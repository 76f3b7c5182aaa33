//! Step indicator sidebar

use super::components::{render_step_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::i18n::Translator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

/// Rows taken by the progress gauge
const GAUGE_HEIGHT: u16 = 3;

/// Draw one box per step plus overall progress
pub fn draw_step_indicator(frame: &mut Frame, area: Rect, app: &App) {
    let translator = &app.translator;
    let steps = app.state.wizard.steps();
    let views = steps.views();

    let constraints: Vec<Constraint> = views
        .iter()
        .map(|_| Constraint::Length(BUTTON_HEIGHT))
        .chain([Constraint::Min(0), Constraint::Length(GAUGE_HEIGHT)])
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for view in &views {
        render_step_button(
            frame,
            chunks[view.index],
            view.index + 1,
            &translator.t(view.step.title),
            view.status,
        );
    }

    let progress = steps.progress().clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));
    frame.render_widget(gauge, chunks[views.len() + 1]);
}
