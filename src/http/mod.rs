pub mod error;
pub mod models;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use error::ApiError;
use models::{AlbumArt, SongInfo};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Builds the fixed art prompt from the metadata call's art description.
pub fn build_art_prompt(description: &str) -> String {
    format!(
        "A vibrant, high-resolution, vertical (9:16 aspect ratio) phone wallpaper \
         inspired by this description: {description}. \
         Style: digital painting, cinematic lighting, atmospheric."
    )
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new() -> Result<Self, ApiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| ApiError::MissingCredential)?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            text_model: std::env::var("LYRICARD_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            image_model: std::env::var("LYRICARD_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }

    /// Resolves a free-text query into song metadata. One attempt, no retry.
    pub async fn fetch_song_info(&self, query: &str) -> Result<SongInfo, ApiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": format!(
                "Based on the song query \"{query}\", provide the official song title, \
                 artist name, the full lyrics, and a detailed visual description of the \
                 original album cover art."
            ) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": song_info_schema(),
            },
        });

        let response = self.generate(&self.text_model, body).await?;
        let text = response.first_text().ok_or(ApiError::EmptyResponse)?;
        debug!("song info response: {} bytes", text.len());

        let info: SongInfo = serde_json::from_str(text.trim())?;
        if !info.is_complete() {
            return Err(ApiError::IncompleteSong);
        }
        Ok(info)
    }

    /// Turns a prompt into a single generated image. One attempt, no retry.
    pub async fn generate_album_art(&self, prompt: &str) -> Result<AlbumArt, ApiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseModalities": ["IMAGE"] },
        });

        let response = self.generate(&self.image_model, body).await?;
        let inline = response.first_inline_data().ok_or(ApiError::NoImage)?;
        let bytes = BASE64.decode(inline.data.as_bytes())?;
        debug!(
            "generated {} image, {} bytes decoded",
            inline.mime_type,
            bytes.len()
        );

        Ok(AlbumArt {
            mime_type: inline.mime_type.clone(),
            bytes,
        })
    }

    async fn generate(&self, model: &str, body: Value) -> Result<GenerateContentResponse, ApiError> {
        let url = format!("{API_BASE}/{model}:generateContent");
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            message.truncate(500);
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

fn song_info_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "songTitle": {
                "type": "STRING",
                "description": "The official title of the song."
            },
            "artist": {
                "type": "STRING",
                "description": "The name of the primary artist or band."
            },
            "fullLyrics": {
                "type": "STRING",
                "description": "The full, complete lyrics of the song. Include line breaks between verses and chorus."
            },
            "albumArtDescription": {
                "type": "STRING",
                "description": "A vivid and detailed visual description of the original album cover art associated with the song."
            }
        },
        "required": ["songTitle", "artist", "fullLyrics", "albumArtDescription"]
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }

    fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_response(payload: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": payload }] } }]
        }))
        .unwrap()
    }

    #[test]
    fn parses_song_info_from_candidate_text() {
        let response = text_response(
            r#"{"songTitle":"Imagine","artist":"John Lennon","fullLyrics":"Imagine there's no heaven...","albumArtDescription":"A cloudy sky"}"#,
        );
        let info: SongInfo = serde_json::from_str(response.first_text().unwrap()).unwrap();
        assert_eq!(info.song_title, "Imagine");
        assert_eq!(info.artist, "John Lennon");
        assert!(info.is_complete());
    }

    #[test]
    fn blank_required_field_is_incomplete() {
        let info: SongInfo = serde_json::from_str(
            r#"{"songTitle":"Imagine","artist":"  ","fullLyrics":"...","albumArtDescription":""}"#,
        )
        .unwrap();
        assert!(!info.is_complete());
    }

    #[test]
    fn missing_lyrics_field_fails_to_parse() {
        let parsed: Result<SongInfo, _> =
            serde_json::from_str(r#"{"songTitle":"Imagine","artist":"John Lennon"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn finds_inline_image_part_after_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Here is your image." },
                { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
            ] } }]
        }))
        .unwrap();
        let inline = response.first_inline_data().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(BASE64.decode(inline.data.as_bytes()).unwrap(), b"hello");
    }

    #[test]
    fn response_without_image_part_yields_none() {
        let response = text_response("no image here");
        assert!(response.first_inline_data().is_none());
    }

    #[test]
    fn art_prompt_interpolates_description() {
        let prompt = build_art_prompt("a red sunburst over water");
        assert!(prompt.contains("a red sunburst over water"));
        assert!(prompt.contains("9:16"));
    }
}
