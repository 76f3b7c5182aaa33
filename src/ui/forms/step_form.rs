//! Wizard step forms

use super::field_renderer::{draw_form_fields, FIELD_HEIGHT};
use crate::app::App;
use crate::i18n::Translator;
use crate::state::application::KeyParty;
use crate::state::forms::{KeyPartiesForm, StepForm, PARTIES_FIELD};
use crate::state::validation::FormErrors;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Rows reserved for the added-parties list
const PARTY_LIST_HEIGHT: u16 = 7;

pub fn draw_step_form(frame: &mut Frame, area: Rect, app: &App) {
    let translator = &app.translator;
    let wizard = &app.state.wizard;
    let steps = wizard.steps();

    let (Some(step), Some(form)) = (wizard.current_step(), wizard.current_form()) else {
        let empty = Paragraph::new(translator.t("wizard.no_steps"))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };
    let index = steps.current_index().unwrap_or(0);

    let block = Block::default()
        .title(format!(
            " {}/{} {} ",
            index + 1,
            steps.len(),
            translator.t(step.title)
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let extra_height = match form {
        StepForm::Parties(_) => PARTY_LIST_HEIGHT,
        _ => 0,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(FIELD_HEIGHT),
            Constraint::Length(extra_height),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(inner);

    let editing = !wizard.is_submitting() && !wizard.is_complete();
    draw_form_fields(
        frame,
        chunks[0],
        translator,
        form.as_form(),
        wizard.errors(),
        editing,
    );

    if let StepForm::Parties(parties) = form {
        draw_party_list(frame, chunks[1], translator, parties, wizard.errors());
    }

    draw_step_buttons(frame, chunks[2], app, index > 0 && editing, steps.is_last());
}

fn party_line(translator: &dyn Translator, party: &KeyParty) -> String {
    let kind = match party {
        KeyParty::Individual { .. } => translator.t("parties.kind.individual"),
        KeyParty::Entity { .. } => translator.t("parties.kind.entity"),
    };
    format!(
        "{}  ({kind}, {}%)",
        party.display_name(),
        party.ownership_pct()
    )
}

fn draw_party_list(
    frame: &mut Frame,
    area: Rect,
    translator: &dyn Translator,
    parties: &KeyPartiesForm,
    errors: &FormErrors,
) {
    let error = errors.get(PARTIES_FIELD).map(|m| translator.message(m));
    let border = if error.is_some() { Color::Red } else { Color::DarkGray };

    let mut block = Block::default()
        .title(format!(
            " {} ({}%) ",
            translator.t("parties.list"),
            parties.total_ownership()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    let items: Vec<ListItem> = if parties.parties.is_empty() {
        vec![ListItem::new(Span::styled(
            translator.t("parties.empty"),
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        parties
            .parties
            .iter()
            .map(|p| ListItem::new(party_line(translator, p)))
            .collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_step_buttons(frame: &mut Frame, area: Rect, app: &App, can_go_back: bool, is_last: bool) {
    let translator = &app.translator;
    let [back, next] = Layout::horizontal([Constraint::Length(14), Constraint::Length(30)])
        .flex(Flex::SpaceBetween)
        .areas(area);

    render_button(frame, back, &translator.t("wizard.back"), false, can_go_back);

    // Disabled while a submission is outstanding
    let submitting = app.is_submitting();
    let label = if is_last {
        translator.t("wizard.submit")
    } else {
        translator.t("wizard.continue")
    };
    render_button(frame, next, &label, !submitting, !submitting);
}
