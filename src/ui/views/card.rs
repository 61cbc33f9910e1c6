use async_trait::async_trait;
use image::RgbaImage;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::card::style::{CardStyle, FontChoice, TextEffect};
use crate::event::events::Event;
use crate::ui::{
    components::preview,
    context::AppContext,
    state::{AppState, Workflow},
    traits::{Action, View},
};
use crate::util::colors;

/// The finished-card screen: a terminal approximation of the panel next to
/// the style pickers. Styling only mutates configuration; download and
/// start-over go through the event channel.
#[derive(Default)]
pub struct CardReadyView {
    decoded_attempt: u64,
    decoded: Option<RgbaImage>,
    art_cache: Option<((u16, u16), Vec<Line<'static>>)>,
}

impl CardReadyView {
    fn art_for(&mut self, state: &AppState, bytes: &[u8], cols: u16, rows: u16) -> Vec<Line<'static>> {
        if self.decoded_attempt != state.attempt() {
            self.decoded_attempt = state.attempt();
            self.decoded = image::load_from_memory(bytes)
                .ok()
                .map(|img| img.to_rgba8());
            self.art_cache = None;
        }

        let Some(img) = &self.decoded else {
            return Vec::new();
        };
        match &self.art_cache {
            Some((size, lines)) if *size == (cols, rows) => lines.clone(),
            _ => {
                let lines = preview::art_lines(img, cols, rows);
                self.art_cache = Some(((cols, rows), lines.clone()));
                lines
            }
        }
    }
}

#[async_trait]
impl View for CardReadyView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let Workflow::CardReady {
            song,
            art,
            excerpt,
            style,
        } = &state.workflow
        else {
            return;
        };

        // Cell aspect is roughly 1:2, so a 9:16 panel is close to square in
        // columns-by-rows terms.
        let panel_rows = area.height.saturating_sub(2).max(8);
        let panel_cols = ((panel_rows as f32) * 1.125) as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(panel_cols.min(area.width / 2)),
                Constraint::Min(20),
            ])
            .split(area);

        self.render_panel(f, chunks[0], state, song, art, excerpt, *style);
        render_controls(f, chunks[1], *style);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &mut AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Char('f') => state.cycle_font(true),
            KeyCode::Char('F') => state.cycle_font(false),
            KeyCode::Char('e') => state.cycle_effect(true),
            KeyCode::Char('E') => state.cycle_effect(false),
            KeyCode::Char('d') => {
                let _ = ctx.event_tx.send(Event::Download);
            }
            KeyCode::Char('r') | KeyCode::Esc => {
                let _ = ctx.event_tx.send(Event::Reset);
            }
            KeyCode::Char('q') => return Some(Action::Quit),
            _ => {}
        }
        Some(Action::None)
    }
}

impl CardReadyView {
    #[allow(clippy::too_many_arguments)]
    fn render_panel(
        &mut self,
        f: &mut Frame,
        area: Rect,
        state: &AppState,
        song: &crate::http::models::SongInfo,
        art: &crate::http::models::AlbumArt,
        excerpt: &str,
        style: CardStyle,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors::NEUTRAL));
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let art_rows = (inner.height as f32 * 0.45) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(art_rows),
                Constraint::Min(1),
                Constraint::Length(2),
            ])
            .split(inner);

        let lines = self.art_for(state, &art.bytes, chunks[0].width, chunks[0].height);
        if lines.is_empty() {
            f.render_widget(
                Paragraph::new("(album art)")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(colors::NEUTRAL)),
                chunks[0],
            );
        } else {
            f.render_widget(Paragraph::new(lines), chunks[0]);
        }

        let excerpt_style = preview_text_style(style);
        let excerpt_block = Paragraph::new(excerpt.to_string())
            .style(excerpt_style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        f.render_widget(excerpt_block, chunks[1]);

        let footer = Paragraph::new(vec![
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
        f.render_widget(footer, chunks[2]);
    }
}

fn render_controls(f: &mut Frame, area: Rect, style: CardStyle) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Style")
        .border_style(Style::default().fg(colors::NEUTRAL));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let value_style = Style::default()
        .fg(colors::PRIMARY)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(colors::MUTED);
    let lines = vec![
        Line::from(vec![
            Span::styled("Lyrics font:  ", label_style),
            Span::styled(format!("< {} >", style.font.label()), value_style),
        ]),
        Line::from(vec![
            Span::styled("Text effect:  ", label_style),
            Span::styled(format!("< {} >", style.effect.label()), value_style),
        ]),
        Line::default(),
        Line::from(Span::styled("f/F cycle font", label_style)),
        Line::from(Span::styled("e/E cycle effect", label_style)),
        Line::default(),
        Line::from(vec![
            Span::styled("d ", value_style),
            Span::styled("download", label_style),
        ]),
        Line::from(vec![
            Span::styled("r ", value_style),
            Span::styled("start over", label_style),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

/// Terminal stand-in for the selected face and effect; the exporter renders
/// the real thing.
fn preview_text_style(style: CardStyle) -> Style {
    let mut out = Style::default().fg(ratatui::style::Color::White);
    out = match style.font {
        FontChoice::Inter => out,
        FontChoice::Lora | FontChoice::DancingScript => out.add_modifier(Modifier::ITALIC),
        FontChoice::PlayfairDisplay | FontChoice::RobotoSlab => out.add_modifier(Modifier::BOLD),
    };
    match style.effect {
        TextEffect::Glow => out.add_modifier(Modifier::BOLD),
        TextEffect::Outline => out.add_modifier(Modifier::UNDERLINED),
        TextEffect::Shadow | TextEffect::None => out,
    }
}
