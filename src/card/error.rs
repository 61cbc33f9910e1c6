use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("No usable font found for {0}; set LYRICARD_FONT_DIR")]
    NoFont(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
