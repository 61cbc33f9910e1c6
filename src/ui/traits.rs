use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::ui::{context::AppContext, state::AppState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    None,
}

/// One screen per workflow phase. Views own only ephemeral UI state (cursor,
/// edit mode); everything the card is made of lives in [`AppState`].
#[async_trait]
pub trait View: Send {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &mut AppState,
        ctx: &AppContext,
    ) -> Option<Action>;

    fn handle_paste(&mut self, _text: &str, _state: &mut AppState) {}
}
