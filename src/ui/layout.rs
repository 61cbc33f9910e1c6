use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{app::App, state::Workflow, traits::View};
use crate::util::colors;

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame) {
        let area = f.area();
        f.buffer_mut()
            .set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Lyrics Card Generator",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Turn your favorite song lyrics into shareable art.",
                Style::default().fg(colors::MUTED),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(header, chunks[0]);

        let app = self.app;
        let state = &app.state;
        let status = if let Some(error) = &state.error {
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(colors::ERROR),
            ))
        } else if let Some(notice) = &state.notice {
            Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(colors::PRIMARY),
            ))
        } else {
            Line::default()
        };
        f.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[2]);

        let hints = match &state.workflow {
            Workflow::Idle => "Enter find song   Ctrl+C quit",
            Workflow::LoadingInfo { .. } => "Ctrl+C quit",
            Workflow::SelectingLyrics { .. } => {
                if app.views.select.editor.is_editing {
                    "Esc stop editing   Ctrl+R start over   Ctrl+C quit"
                } else {
                    "Enter create card   e edit lyrics   Ctrl+R start over   Ctrl+C quit"
                }
            }
            Workflow::CardReady { .. } => {
                "f/F font   e/E effect   d download   r start over   Ctrl+C quit"
            }
        };
        f.render_widget(
            Paragraph::new(Span::styled(hints, Style::default().fg(colors::NEUTRAL)))
                .alignment(Alignment::Center),
            chunks[3],
        );

        let content = chunks[1];
        match &app.state.workflow {
            Workflow::Idle | Workflow::LoadingInfo { .. } => {
                app.views.query.render(f, content, &app.state, &app.ctx)
            }
            Workflow::SelectingLyrics { .. } => {
                app.views.select.render(f, content, &app.state, &app.ctx)
            }
            Workflow::CardReady { .. } => app.views.card.render(f, content, &app.state, &app.ctx),
        }
    }
}
