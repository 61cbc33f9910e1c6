use serde::Deserialize;

/// Structured song metadata, produced once per query by the metadata call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfo {
    pub song_title: String,
    pub artist: String,
    pub full_lyrics: String,
    #[serde(default)]
    pub album_art_description: String,
}

impl SongInfo {
    /// Title, artist and lyrics are all required; a response missing any of
    /// them is treated as a failed call, never exposed partially.
    pub fn is_complete(&self) -> bool {
        !self.song_title.trim().is_empty()
            && !self.artist.trim().is_empty()
            && !self.full_lyrics.trim().is_empty()
    }
}

/// A generated album image, decoded from the inline response payload.
#[derive(Clone)]
pub struct AlbumArt {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for AlbumArt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlbumArt")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
