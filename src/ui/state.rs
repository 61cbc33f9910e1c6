use crate::card::style::CardStyle;
use crate::http::models::{AlbumArt, SongInfo};

pub const MSG_EMPTY_QUERY: &str = "Please enter a song title and artist.";
pub const MSG_FETCH_FAILED: &str =
    "Failed to find song details. Please try a different song or check the log.";
pub const MSG_EMPTY_EXCERPT: &str = "Please select some lyrics first.";
pub const MSG_EXPORT_FAILED: &str = "Could not save the image. Please try again.";

/// Screen state as a tagged union: each phase carries only the fields valid
/// in it, so combinations like a ready card without art cannot exist.
#[derive(Debug, Clone, Default)]
#[allow(clippy::large_enum_variant)]
pub enum Workflow {
    #[default]
    Idle,
    LoadingInfo {
        query: String,
    },
    SelectingLyrics {
        song: SongInfo,
        excerpt: String,
        art: Option<AlbumArt>,
        art_failed: bool,
    },
    CardReady {
        song: SongInfo,
        art: AlbumArt,
        excerpt: String,
        style: CardStyle,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub workflow: Workflow,
    /// Contents of the query input box.
    pub query: String,
    pub error: Option<String>,
    pub notice: Option<String>,
    attempt: u64,
}

impl AppState {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Submit the query box. Returns the (attempt, query) pair to fetch for,
    /// or `None` when nothing should be spawned.
    pub fn submit_query(&mut self) -> Option<(u64, String)> {
        if !matches!(self.workflow, Workflow::Idle) {
            return None;
        }
        let query = self.query.trim().to_string();
        if query.is_empty() {
            self.error = Some(MSG_EMPTY_QUERY.to_string());
            return None;
        }

        self.error = None;
        self.notice = None;
        self.attempt += 1;
        self.workflow = Workflow::LoadingInfo {
            query: query.clone(),
        };
        Some((self.attempt, query))
    }

    /// Metadata arrived. Seeds the excerpt with the full lyrics and returns
    /// the art description to generate for, or `None` when the completion is
    /// stale or the phase moved on.
    pub fn song_info_fetched(&mut self, attempt: u64, song: SongInfo) -> Option<(u64, String)> {
        if attempt != self.attempt || !matches!(self.workflow, Workflow::LoadingInfo { .. }) {
            return None;
        }
        let description = song.album_art_description.clone();
        let excerpt = song.full_lyrics.clone();
        self.workflow = Workflow::SelectingLyrics {
            song,
            excerpt,
            art: None,
            art_failed: false,
        };
        Some((attempt, description))
    }

    pub fn song_info_failed(&mut self, attempt: u64) {
        if attempt != self.attempt || !matches!(self.workflow, Workflow::LoadingInfo { .. }) {
            return;
        }
        self.error = Some(MSG_FETCH_FAILED.to_string());
        self.workflow = Workflow::Idle;
    }

    pub fn art_ready(&mut self, attempt: u64, image: AlbumArt) {
        if attempt != self.attempt {
            return;
        }
        if let Workflow::SelectingLyrics {
            art, art_failed, ..
        } = &mut self.workflow
        {
            *art = Some(image);
            *art_failed = false;
        }
    }

    pub fn art_failed(&mut self, attempt: u64) {
        if attempt != self.attempt {
            return;
        }
        if let Workflow::SelectingLyrics { art, art_failed, .. } = &mut self.workflow {
            if art.is_none() {
                *art_failed = true;
            }
        }
    }

    pub fn can_create_card(&self) -> bool {
        matches!(
            &self.workflow,
            Workflow::SelectingLyrics {
                art: Some(_),
                excerpt,
                ..
            } if !excerpt.trim().is_empty()
        )
    }

    /// The create-card action. Only succeeds with a resolved image and a
    /// non-blank excerpt; a blank excerpt sets the validation error.
    pub fn create_card(&mut self) -> bool {
        match std::mem::take(&mut self.workflow) {
            Workflow::SelectingLyrics {
                song,
                excerpt,
                art: Some(art),
                ..
            } if !excerpt.trim().is_empty() => {
                self.error = None;
                self.workflow = Workflow::CardReady {
                    song,
                    art,
                    excerpt,
                    style: CardStyle::default(),
                };
                true
            }
            other => {
                if let Workflow::SelectingLyrics { excerpt, .. } = &other {
                    if excerpt.trim().is_empty() {
                        self.error = Some(MSG_EMPTY_EXCERPT.to_string());
                    }
                }
                self.workflow = other;
                false
            }
        }
    }

    pub fn excerpt_mut(&mut self) -> Option<&mut String> {
        match &mut self.workflow {
            Workflow::SelectingLyrics { excerpt, .. } => Some(excerpt),
            _ => None,
        }
    }

    pub fn cycle_font(&mut self, forward: bool) {
        if let Workflow::CardReady { style, .. } = &mut self.workflow {
            style.font = if forward {
                style.font.next()
            } else {
                style.font.prev()
            };
        }
    }

    pub fn cycle_effect(&mut self, forward: bool) {
        if let Workflow::CardReady { style, .. } = &mut self.workflow {
            style.effect = if forward {
                style.effect.next()
            } else {
                style.effect.prev()
            };
        }
    }

    /// Back to the initial tuple. Bumping the attempt fences out anything
    /// still in flight for the superseded query.
    pub fn reset(&mut self) {
        self.query.clear();
        self.error = None;
        self.notice = None;
        self.attempt += 1;
        self.workflow = Workflow::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::style::{FontChoice, TextEffect};

    fn song() -> SongInfo {
        SongInfo {
            song_title: "Imagine".to_string(),
            artist: "John Lennon".to_string(),
            full_lyrics: "Imagine there's no heaven...".to_string(),
            album_art_description: "A cloudy sky over a white piano".to_string(),
        }
    }

    fn art() -> AlbumArt {
        AlbumArt {
            mime_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn state_selecting() -> AppState {
        let mut state = AppState::default();
        state.query = "Imagine - John Lennon".to_string();
        let (attempt, _) = state.submit_query().unwrap();
        state.song_info_fetched(attempt, song()).unwrap();
        state
    }

    #[test]
    fn blank_query_sets_error_and_stays_idle() {
        for raw in ["", "   ", "\t\n"] {
            let mut state = AppState::default();
            state.query = raw.to_string();
            assert!(state.submit_query().is_none());
            assert!(matches!(state.workflow, Workflow::Idle));
            assert_eq!(state.error.as_deref(), Some(MSG_EMPTY_QUERY));
            assert_eq!(state.attempt(), 0);
        }
    }

    #[test]
    fn submit_trims_and_enters_loading() {
        let mut state = AppState::default();
        state.query = "  Imagine - John Lennon  ".to_string();
        let (attempt, query) = state.submit_query().unwrap();
        assert_eq!(attempt, 1);
        assert_eq!(query, "Imagine - John Lennon");
        assert!(matches!(state.workflow, Workflow::LoadingInfo { .. }));
        assert!(state.error.is_none());
    }

    #[test]
    fn metadata_success_seeds_excerpt_with_full_lyrics() {
        let state = state_selecting();
        match &state.workflow {
            Workflow::SelectingLyrics { excerpt, art, .. } => {
                assert_eq!(excerpt, "Imagine there's no heaven...");
                assert!(art.is_none());
            }
            other => panic!("unexpected workflow: {other:?}"),
        }
    }

    #[test]
    fn metadata_success_requests_art_for_description() {
        let mut state = AppState::default();
        state.query = "Imagine".to_string();
        let (attempt, _) = state.submit_query().unwrap();
        let (art_attempt, description) = state.song_info_fetched(attempt, song()).unwrap();
        assert_eq!(art_attempt, attempt);
        assert_eq!(description, "A cloudy sky over a white piano");
    }

    #[test]
    fn metadata_failure_rolls_back_to_idle() {
        let mut state = AppState::default();
        state.query = "Imagine".to_string();
        let (attempt, _) = state.submit_query().unwrap();
        state.song_info_failed(attempt);
        assert!(matches!(state.workflow, Workflow::Idle));
        assert_eq!(state.error.as_deref(), Some(MSG_FETCH_FAILED));
    }

    #[test]
    fn stale_metadata_completion_is_discarded() {
        let mut state = AppState::default();
        state.query = "Imagine".to_string();
        let (attempt, _) = state.submit_query().unwrap();
        state.reset();
        assert!(state.song_info_fetched(attempt, song()).is_none());
        assert!(matches!(state.workflow, Workflow::Idle));
    }

    #[test]
    fn stale_art_completion_is_discarded() {
        let mut state = state_selecting();
        let stale = state.attempt() - 1;
        state.art_ready(stale, art());
        assert!(!state.can_create_card());
    }

    #[test]
    fn late_art_after_reset_does_not_resurrect_state() {
        let mut state = state_selecting();
        let attempt = state.attempt();
        state.reset();
        state.art_ready(attempt, art());
        assert!(matches!(state.workflow, Workflow::Idle));
    }

    #[test]
    fn create_is_blocked_until_art_arrives() {
        let mut state = state_selecting();
        assert!(!state.can_create_card());
        assert!(!state.create_card());
        assert!(matches!(state.workflow, Workflow::SelectingLyrics { .. }));

        state.art_ready(state.attempt(), art());
        assert!(state.can_create_card());
    }

    #[test]
    fn create_with_blank_excerpt_sets_error() {
        let mut state = state_selecting();
        state.art_ready(state.attempt(), art());
        state.excerpt_mut().unwrap().clear();
        assert!(!state.create_card());
        assert_eq!(state.error.as_deref(), Some(MSG_EMPTY_EXCERPT));
        assert!(matches!(state.workflow, Workflow::SelectingLyrics { .. }));
    }

    #[test]
    fn create_card_carries_the_edited_excerpt() {
        let mut state = state_selecting();
        state.art_ready(state.attempt(), art());
        *state.excerpt_mut().unwrap() = "Imagine there's no heaven".to_string();
        assert!(state.create_card());
        match &state.workflow {
            Workflow::CardReady { excerpt, style, .. } => {
                assert_eq!(excerpt, "Imagine there's no heaven");
                assert_eq!(*style, CardStyle::default());
            }
            other => panic!("unexpected workflow: {other:?}"),
        }
    }

    #[test]
    fn art_failure_marks_the_phase_without_rollback() {
        let mut state = state_selecting();
        state.art_failed(state.attempt());
        match &state.workflow {
            Workflow::SelectingLyrics { art_failed, .. } => assert!(art_failed),
            other => panic!("unexpected workflow: {other:?}"),
        }
        assert!(state.error.is_none());
        assert!(!state.can_create_card());
    }

    #[test]
    fn style_cycles_only_apply_when_card_is_ready() {
        let mut state = state_selecting();
        state.cycle_font(true);
        state.art_ready(state.attempt(), art());
        assert!(state.create_card());

        state.cycle_font(true);
        state.cycle_effect(true);
        match &state.workflow {
            Workflow::CardReady { style, .. } => {
                assert_eq!(style.font, FontChoice::Lora);
                assert_eq!(style.effect, TextEffect::Outline);
            }
            other => panic!("unexpected workflow: {other:?}"),
        }
    }

    #[test]
    fn reset_restores_the_initial_tuple_from_any_state() {
        let mut state = state_selecting();
        state.art_ready(state.attempt(), art());
        state.create_card();
        state.error = Some("stale".to_string());
        state.reset();

        assert!(matches!(state.workflow, Workflow::Idle));
        assert!(state.query.is_empty());
        assert!(state.error.is_none());
        assert!(state.notice.is_none());
    }
}
