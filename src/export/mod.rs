use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;
use tracing::info;

use crate::card::{CardError, CardSpec, PanelRasterizer, Rasterizer};
use crate::http::models::SongInfo;

const FALLBACK_FILE_NAME: &str = "lyrics-card.png";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not render the card: {0}")]
    Render(#[from] CardError),

    #[error("Could not write the image: {0}")]
    Write(#[from] image::ImageError),
}

/// Rasterizes the finished panel and saves it as a PNG named after the song,
/// into the platform download directory.
pub struct Exporter {
    rasterizer: Box<dyn Rasterizer>,
    out_dir: PathBuf,
}

impl Exporter {
    pub fn new() -> Self {
        Self {
            rasterizer: Box::new(PanelRasterizer::default()),
            out_dir: download_dir(),
        }
    }

    pub fn with_rasterizer(rasterizer: Box<dyn Rasterizer>, out_dir: PathBuf) -> Self {
        Self {
            rasterizer,
            out_dir,
        }
    }

    pub fn download(&self, card: &CardSpec) -> Result<PathBuf, ExportError> {
        let bitmap = self.rasterizer.render(card)?;
        let path = self.out_dir.join(file_name(Some(card.song)));
        bitmap.save_with_format(&path, ImageFormat::Png)?;
        info!("card saved to {}", path.display());
        Ok(path)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

/// `{artist}-{title}-lyrics.png` with whitespace runs collapsed to `_`, or a
/// fixed name when metadata is absent.
pub fn file_name(song: Option<&SongInfo>) -> String {
    match song {
        Some(song) => format!(
            "{}-{}-lyrics.png",
            sanitize(&song.artist),
            sanitize(&song.song_title)
        ),
        None => FALLBACK_FILE_NAME.to_string(),
    }
}

fn sanitize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("_")
}

fn download_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, artist: &str) -> SongInfo {
        SongInfo {
            song_title: title.to_string(),
            artist: artist.to_string(),
            full_lyrics: "la la la".to_string(),
            album_art_description: String::new(),
        }
    }

    #[test]
    fn file_name_joins_artist_and_title() {
        let song = song("Imagine", "John Lennon");
        assert_eq!(file_name(Some(&song)), "John_Lennon-Imagine-lyrics.png");
    }

    #[test]
    fn file_name_collapses_whitespace_runs() {
        let song = song("The  Sound\tof Silence", " Simon  & Garfunkel ");
        assert_eq!(
            file_name(Some(&song)),
            "Simon_&_Garfunkel-The_Sound_of_Silence-lyrics.png"
        );
    }

    #[test]
    fn file_name_without_metadata_uses_fallback() {
        assert_eq!(file_name(None), "lyrics-card.png");
    }
}
