use std::sync::Arc;

use flume::{Receiver, Sender};

use crate::{
    event::events::Event, export::Exporter, http::GeminiClient, util::task::TaskManager,
};

use super::{
    context::AppContext,
    layout::AppLayout,
    state::AppState,
    tui,
    util::handler::EventHandler,
    views::{CardReadyView, QueryView, SelectLyricsView},
};

/// One view per workflow phase; the phase decides which one is active.
#[derive(Default)]
pub struct PhaseViews {
    pub query: QueryView,
    pub select: SelectLyricsView,
    pub card: CardReadyView,
}

pub struct App {
    pub event_rx: Receiver<Event>,
    pub state: AppState,
    pub ctx: AppContext,
    pub views: PhaseViews,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> color_eyre::Result<Self> {
        let (event_tx, event_rx): (Sender<Event>, Receiver<Event>) = flume::unbounded();
        let ctx = AppContext {
            api: Arc::new(GeminiClient::new()?),
            exporter: Arc::new(Exporter::new()),
            event_tx,
        };

        Ok(Self {
            event_rx,
            state: AppState::default(),
            ctx,
            views: PhaseViews::default(),
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        while !self.should_quit {
            if self.has_focus {
                tui.draw(|f| {
                    AppLayout::new(self).render(f);
                })?;
            }

            EventHandler::handle_events(self, &mut tui).await?;
        }

        tui.exit()?;
        Ok(())
    }
}
