//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Used for both the title and the border
    pub accent: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Hint text shown at the bottom
    pub hint: Option<Line<'a>>,
    pub max_width: u16,
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let padding = 4u16; // 2 chars padding on each side
    let max_line_width = config.max_width.saturating_sub(padding + 2) as usize;

    let wrapped_lines = wrap_text(config.message, max_line_width);
    let content_width = wrapped_lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(config.title.chars().count()))
        .max()
        .unwrap_or(0) as u16;

    // Title + blank + message + (blank + hint) + borders
    let hint_lines = if config.hint.is_some() { 2 } else { 0 };
    let height = (2 + wrapped_lines.len() as u16 + hint_lines + 2).max(5);
    let width = (content_width + padding + 2).min(config.max_width);
    let dialog_area = centered(frame.area(), width, height);

    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped_lines.into_iter().map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(hint);
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.accent)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Greedy word wrap; words longer than the width get a line of their own
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if needed > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("Submission failed. Please try again.", 20);
        assert_eq!(lines, vec!["Submission failed.", "Please try again."]);
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        let lines = wrap_text("first\n\nsecond", 40);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 60, 8), area);
        assert_eq!(centered(Rect::new(0, 0, 20, 10), 10, 4), Rect::new(5, 3, 10, 4));
    }
}
