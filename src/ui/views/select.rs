use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::event::events::Event;
use crate::ui::{
    components::{editor::LyricEditor, spinner::Spinner},
    context::AppContext,
    state::{AppState, Workflow},
    traits::{Action, View},
};
use crate::util::colors;

/// The lyric-selection screen: the excerpt is editable the moment metadata
/// lands, while the art call is still in flight. Creating the card stays
/// unavailable until the image has resolved.
#[derive(Default)]
pub struct SelectLyricsView {
    pub editor: LyricEditor,
    seeded_attempt: u64,
}

#[async_trait]
impl View for SelectLyricsView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let Workflow::SelectingLyrics {
            song,
            excerpt,
            art,
            art_failed,
        } = &state.workflow
        else {
            return;
        };

        if self.seeded_attempt != state.attempt() {
            self.seeded_attempt = state.attempt();
            self.editor.reset(excerpt);
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                song.song_title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                song.artist.clone(),
                Style::default().fg(colors::MUTED),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(heading, chunks[0]);

        let border_style = if self.editor.is_editing {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let editor_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Edit your favorite lyrics")
            .border_style(border_style);
        let inner_height = editor_block.inner(chunks[1]).height;
        let scroll = self
            .editor
            .cursor_row(excerpt)
            .saturating_sub(inner_height.saturating_sub(1) as usize) as u16;
        let editor_text = Paragraph::new(self.editor.styled_lines(excerpt))
            .block(editor_block)
            .scroll((scroll, 0));
        f.render_widget(editor_text, chunks[1]);

        match (art, art_failed) {
            (Some(_), _) => {
                let hint = if self.editor.is_editing {
                    "Art ready. Press Esc, then Enter to create the card."
                } else {
                    "Press Enter to create the card."
                };
                f.render_widget(
                    Paragraph::new(hint)
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(colors::PRIMARY)),
                    chunks[2],
                );
            }
            (None, false) => {
                let spinner = Spinner::default()
                    .with_style(Style::default().fg(colors::SECONDARY))
                    .with_label("Generating art...");
                f.render_widget(spinner, chunks[2]);
            }
            (None, true) => {
                f.render_widget(
                    Paragraph::new("Art generation failed. Card creation is unavailable.")
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(colors::ERROR)),
                    chunks[2],
                );
            }
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &mut AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if let Some(excerpt) = state.excerpt_mut() {
            if self.editor.handle_key(key, excerpt) {
                return Some(Action::None);
            }
        }

        match key.code {
            KeyCode::Esc => {
                self.editor.is_editing = !self.editor.is_editing;
                Some(Action::None)
            }
            KeyCode::Char('e') | KeyCode::Char('/') => {
                self.editor.is_editing = true;
                Some(Action::None)
            }
            KeyCode::Enter => {
                let _ = ctx.event_tx.send(Event::CreateCard);
                Some(Action::None)
            }
            _ => Some(Action::None),
        }
    }

    fn handle_paste(&mut self, text: &str, state: &mut AppState) {
        if let Some(excerpt) = state.excerpt_mut() {
            self.editor.paste(excerpt, text);
        }
    }
}
