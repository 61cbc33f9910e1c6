use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::event::events::Event;
use crate::ui::{
    components::spinner::Spinner,
    context::AppContext,
    state::{AppState, Workflow},
    traits::{Action, View},
};
use crate::util::colors;

const PLACEHOLDER: &str = "e.g., Bohemian Rhapsody - Queen";

/// The idle and loading screens: one query box, then a spinner while the
/// metadata call is in flight.
#[derive(Default)]
pub struct QueryView;

impl QueryView {
    fn input_area(area: Rect) -> Rect {
        let width = area.width.min(64);
        let x = area.x + (area.width - width) / 2;
        Rect::new(x, area.y + 1, width, 3)
    }
}

#[async_trait]
impl View for QueryView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let loading = matches!(state.workflow, Workflow::LoadingInfo { .. });

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        let input_area = Self::input_area(chunks[0]).intersection(chunks[0]);
        let border_style = if loading {
            Style::default().fg(colors::NEUTRAL)
        } else {
            Style::default().fg(colors::PRIMARY)
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Find Song")
            .border_style(border_style);

        let input_line = if state.query.is_empty() && !loading {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(colors::NEUTRAL),
            ))
        } else {
            let mut spans = vec![Span::raw(state.query.clone())];
            if !loading {
                spans.push(Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
            }
            Line::from(spans)
        };
        f.render_widget(Paragraph::new(input_line).block(input_block), input_area);

        if loading {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Searching for your song...");
            f.render_widget(spinner, chunks[1]);
        } else {
            let hint = Paragraph::new("Your generated card will appear here.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(colors::NEUTRAL))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(colors::NEUTRAL)),
                );
            let width = chunks[1].width.min(48);
            let rect = Rect::new(
                chunks[1].x + (chunks[1].width - width) / 2,
                chunks[1].y + 1,
                width,
                chunks[1].height.saturating_sub(2).clamp(3, 5),
            )
            .intersection(chunks[1]);
            f.render_widget(hint, rect);
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &mut AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        // Input is disabled while the metadata call is in flight.
        if !matches!(state.workflow, Workflow::Idle) {
            return Some(Action::None);
        }

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.query.push(c);
                Some(Action::None)
            }
            KeyCode::Backspace => {
                state.query.pop();
                Some(Action::None)
            }
            KeyCode::Enter => {
                let _ = ctx.event_tx.send(Event::FindSong(state.query.clone()));
                Some(Action::None)
            }
            KeyCode::Esc => Some(Action::Quit),
            _ => Some(Action::None),
        }
    }

    fn handle_paste(&mut self, text: &str, state: &mut AppState) {
        if matches!(state.workflow, Workflow::Idle) {
            state.query.push_str(text);
        }
    }
}
