use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("GEMINI_API_KEY environment variable must be set")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {code}): {message}")]
    Status { code: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Response contained no text part")]
    EmptyResponse,

    #[error("Received incomplete song data")]
    IncompleteSong,

    #[error("No image was generated")]
    NoImage,

    #[error("Invalid image payload: {0}")]
    ImagePayload(#[from] base64::DecodeError),
}
