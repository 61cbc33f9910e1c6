use crate::http::models::{AlbumArt, SongInfo};

/// Fetch completions carry the attempt id they were spawned under; the
/// handler drops anything that no longer matches the current attempt.
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Event {
    // Events
    SongInfoFetched(u64, SongInfo),
    SongInfoFailed(u64, String),
    ArtReady(u64, AlbumArt),
    ArtFailed(u64, String),

    // Commands
    FindSong(String),
    CreateCard,
    Download,
    Reset,
    Quit,
}
