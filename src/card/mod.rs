pub mod compose;
pub mod error;
pub mod fonts;
pub mod style;

pub use error::CardError;

use image::RgbaImage;

use crate::config::CardConfig;
use crate::http::models::{AlbumArt, SongInfo};
use style::CardStyle;

/// Everything the renderer needs to draw one panel.
pub struct CardSpec<'a> {
    pub song: &'a SongInfo,
    pub excerpt: &'a str,
    pub style: CardStyle,
    pub art: &'a AlbumArt,
}

/// Narrow seam over the concrete raster backend, so the workflow never
/// depends on how a panel becomes pixels.
pub trait Rasterizer: Send + Sync {
    fn render(&self, card: &CardSpec) -> Result<RgbaImage, CardError>;
}

/// Default backend: the CPU compositor at `export_scale` pixel density.
#[derive(Default)]
pub struct PanelRasterizer {
    config: CardConfig,
}

impl PanelRasterizer {
    pub fn new(config: CardConfig) -> Self {
        Self { config }
    }
}

impl Rasterizer for PanelRasterizer {
    fn render(&self, card: &CardSpec) -> Result<RgbaImage, CardError> {
        let fonts = fonts::FontLibrary::load()?;
        compose::compose(card, &self.config, &fonts, self.config.export_scale)
    }
}
