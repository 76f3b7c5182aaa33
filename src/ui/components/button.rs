//! Button component for TUI

use crate::state::StepStatus;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border. A disabled button is dimmed even
/// when selected.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let (border_style, text_style) = match (is_enabled, is_selected) {
        (false, _) => (
            Style::default().fg(Color::DarkGray),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        ),
        (true, true) => (
            Style::default().fg(Color::Cyan),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        (true, false) => (Style::default().fg(Color::DarkGray), Style::default()),
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Marker shown in front of a step title
fn status_marker(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Completed => "✓",
        StepStatus::Current => "●",
        StepStatus::Pending => "○",
    }
}

/// Render one entry of the step indicator
pub fn render_step_button(
    frame: &mut Frame,
    area: Rect,
    number: usize,
    title: &str,
    status: StepStatus,
) {
    let content = format!("{} {number}. {title}", status_marker(status));
    let block_style = match status {
        StepStatus::Completed => Style::default().fg(Color::Green),
        StepStatus::Current => Style::default().fg(Color::Cyan),
        StepStatus::Pending => Style::default().fg(Color::DarkGray),
    };
    let text_style = if status == StepStatus::Current {
        block_style.add_modifier(Modifier::BOLD)
    } else {
        block_style
    };

    let paragraph = Paragraph::new(content).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(block_style);

    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_distinct() {
        let markers = [
            status_marker(StepStatus::Completed),
            status_marker(StepStatus::Current),
            status_marker(StepStatus::Pending),
        ];
        assert_ne!(markers[0], markers[1]);
        assert_ne!(markers[1], markers[2]);
        assert_ne!(markers[0], markers[2]);
    }
}
