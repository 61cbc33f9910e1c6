use tracing::{error, info};

use crate::{
    card::CardSpec,
    event::events::Event,
    http::build_art_prompt,
    ui::{
        app::{App, PhaseViews},
        input::InputHandler,
        state::{MSG_EXPORT_FAILED, Workflow},
        traits::{Action, View},
        tui::{TerminalEvent, Tui},
    },
};
use ratatui::crossterm::event::KeyEvent;

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<()> {
        if let Some(evt) = tui.next().await {
            Self::handle_terminal_event(app, evt, tui).await?;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_app_event(app, evt).await;
        }

        Ok(())
    }

    async fn handle_terminal_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<()> {
        match evt {
            TerminalEvent::Init | TerminalEvent::Tick | TerminalEvent::Resize(..) => {}
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Paste(text) => Self::handle_paste(app, &text),
        }

        Ok(())
    }

    async fn handle_key_event(app: &mut App, key: KeyEvent) {
        if let Some(event) = InputHandler::handle_key(key) {
            let _ = app.ctx.event_tx.send(event);
            return;
        }

        let view = Self::active_view(&mut app.views, &app.state.workflow);
        let action = view.handle_input(key, &mut app.state, &app.ctx).await;
        if action == Some(Action::Quit) {
            app.should_quit = true;
        }
    }

    fn handle_paste(app: &mut App, text: &str) {
        let view = Self::active_view(&mut app.views, &app.state.workflow);
        view.handle_paste(text, &mut app.state);
    }

    fn active_view<'a>(views: &'a mut PhaseViews, workflow: &Workflow) -> &'a mut dyn View {
        match workflow {
            Workflow::Idle | Workflow::LoadingInfo { .. } => &mut views.query,
            Workflow::SelectingLyrics { .. } => &mut views.select,
            Workflow::CardReady { .. } => &mut views.card,
        }
    }

    pub async fn handle_app_event(app: &mut App, evt: Event) {
        match evt {
            Event::FindSong(query) => {
                app.state.query = query;
                if let Some((attempt, query)) = app.state.submit_query() {
                    let api = app.ctx.api.clone();
                    let tx = app.ctx.event_tx.clone();

                    app.task_manager.spawn(
                        "fetch_info",
                        tokio::spawn(async move {
                            match api.fetch_song_info(&query).await {
                                Ok(info) => {
                                    let _ = tx.send(Event::SongInfoFetched(attempt, info));
                                }
                                Err(e) => {
                                    let _ = tx.send(Event::SongInfoFailed(attempt, e.to_string()));
                                }
                            }
                        }),
                    );
                }
            }
            Event::SongInfoFetched(attempt, info) => {
                info!("song found: {} - {}", info.artist, info.song_title);
                if let Some((attempt, description)) = app.state.song_info_fetched(attempt, info) {
                    let prompt = build_art_prompt(&description);
                    let api = app.ctx.api.clone();
                    let tx = app.ctx.event_tx.clone();

                    app.task_manager.spawn(
                        "fetch_art",
                        tokio::spawn(async move {
                            match api.generate_album_art(&prompt).await {
                                Ok(art) => {
                                    let _ = tx.send(Event::ArtReady(attempt, art));
                                }
                                Err(e) => {
                                    let _ = tx.send(Event::ArtFailed(attempt, e.to_string()));
                                }
                            }
                        }),
                    );
                }
            }
            Event::SongInfoFailed(attempt, reason) => {
                error!("song lookup failed: {reason}");
                app.state.song_info_failed(attempt);
            }
            Event::ArtReady(attempt, art) => {
                info!("album art ready ({} bytes)", art.bytes.len());
                app.state.art_ready(attempt, art);
            }
            Event::ArtFailed(attempt, reason) => {
                error!("art generation failed: {reason}");
                app.state.art_failed(attempt);
            }
            Event::CreateCard => {
                app.state.create_card();
            }
            Event::Download => Self::download(app),
            Event::Reset => {
                app.task_manager.abort_all();
                app.state.reset();
            }
            Event::Quit => app.should_quit = true,
        }
    }

    /// Export runs synchronously relative to the triggering key press; a
    /// failure surfaces one generic message and changes nothing else.
    fn download(app: &mut App) {
        let Workflow::CardReady {
            song,
            art,
            excerpt,
            style,
        } = &app.state.workflow
        else {
            return;
        };

        let card = CardSpec {
            song,
            excerpt,
            style: *style,
            art,
        };
        match app.ctx.exporter.download(&card) {
            Ok(path) => {
                app.state.error = None;
                app.state.notice = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                error!("export failed: {e}");
                app.state.error = Some(MSG_EXPORT_FAILED.to_string());
            }
        }
    }
}
