//! UI module for rendering the TUI

mod complete;
mod components;
mod forms;
mod layout;
mod steps;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let with_sidebar = app.state.current_view == View::Wizard;
    let regions = layout::create_layout(frame.area(), with_sidebar);

    layout::draw_header(frame, regions.header, app);
    if let Some(sidebar) = regions.sidebar {
        steps::draw_step_indicator(frame, sidebar, app);
    }

    // Draw main content based on current view
    match app.state.current_view {
        View::Register => forms::draw_registration(frame, regions.main, app),
        View::Wizard => forms::draw_step_form(frame, regions.main, app),
        View::Complete => complete::draw(frame, regions.main, app),
    }

    layout::draw_status_bar(frame, regions.status, app);

    // Error banner on top of everything (modal)
    if let Some(notice) = app.state.current_error() {
        components::render_error_dialog(frame, &app.translator, notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::state::{AppState, Notice};
    use crate::store::Session;
    use crate::submission::MockSubmissionClient;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app() -> App {
        App::with_parts(
            Session::in_memory(),
            Catalog::english(),
            Arc::new(MockSubmissionClient::new()),
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_registration_screen() {
        let screen = render(&app());
        assert!(screen.contains("Create your account"));
        assert!(screen.contains("Strength: weak"));
    }

    #[test]
    fn test_wizard_shows_steps_and_progress() {
        let mut app = app();
        app.state = AppState::for_registered("ops@acme.com".to_string());
        let screen = render(&app);
        assert!(screen.contains("1. Institution"));
        assert!(screen.contains("4. Documents"));
        assert!(screen.contains("0%"));
        assert!(screen.contains("ops@acme.com"));
    }

    #[test]
    fn test_error_banner_is_drawn() {
        let mut app = app();
        app.state
            .push_error(Notice::with_detail("errors.submission_rejected", "sanctions"));
        let screen = render(&app);
        assert!(screen.contains("The application was rejected"));
        assert!(screen.contains("Press Enter or Esc to dismiss"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app();
        app.state = AppState::for_registered("ops@acme.com".to_string());
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }
}
