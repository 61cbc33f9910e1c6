/// Panel geometry and type sizes, in logical pixels. The exporter multiplies
/// everything by `export_scale`.
#[derive(Debug, Clone)]
pub struct CardConfig {
    pub panel_width: u32,
    pub panel_height: u32,
    pub export_scale: u32,
    pub padding: u32,
    pub lyrics_px: f32,
    pub title_px: f32,
    pub artist_px: f32,
    pub line_spacing: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            panel_width: 540,
            panel_height: 960,
            export_scale: 2,
            padding: 24,
            lyrics_px: 30.0,
            title_px: 24.0,
            artist_px: 18.0,
            line_spacing: 1.25,
        }
    }
}
