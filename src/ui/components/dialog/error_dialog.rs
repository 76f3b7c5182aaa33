//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use crate::i18n::Translator;
use crate::state::Notice;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Banner text: the translated message, then any detail on its own line
pub fn notice_text(translator: &dyn Translator, notice: &Notice) -> String {
    let message = translator.t(&notice.key);
    match &notice.detail {
        Some(detail) => format!("{message}\n{detail}"),
        None => message,
    }
}

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, translator: &dyn Translator, notice: &Notice) {
    let message = notice_text(translator, notice);
    let title = translator.t("errors.title");
    let hint = Line::from(Span::styled(
        translator.t("errors.dismiss"),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    render_dialog(
        frame,
        DialogConfig {
            title: &title,
            accent: Color::Red,
            message: &message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_notice_text_with_detail() {
        let catalog = Catalog::english();
        let notice = Notice::with_detail("errors.submission_rejected", "sanctions hit");
        assert_eq!(
            notice_text(&catalog, &notice),
            "The application was rejected\nsanctions hit"
        );
    }

    #[test]
    fn test_notice_text_without_detail() {
        let catalog = Catalog::english();
        assert_eq!(
            notice_text(&catalog, &Notice::new("errors.submission_failed")),
            "Submission failed. Please try again."
        );
    }
}
