use image::{
    Rgba, RgbaImage,
    imageops::{self, FilterType},
};
use rusttype::{Font, Scale, point};

use super::CardSpec;
use super::error::CardError;
use super::fonts::FontLibrary;
use super::style::{FontChoice, TextEffect};
use crate::config::CardConfig;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];
const ARTIST_GRAY: [u8; 3] = [209, 213, 219];

/// Composites one panel: cover-fit art, darkening gradient, the excerpt
/// centered in the free band, title and artist at the bottom. `scale` is the
/// pixel-density multiplier on the logical panel size.
pub fn compose(
    card: &CardSpec,
    config: &CardConfig,
    fonts: &FontLibrary,
    scale: u32,
) -> Result<RgbaImage, CardError> {
    let sf = scale.max(1) as f32;
    let w = config.panel_width * scale.max(1);
    let h = config.panel_height * scale.max(1);

    let art = image::load_from_memory(&card.art.bytes)?.to_rgba8();
    let mut panel = cover_fit(&art, w, h);
    apply_gradient(&mut panel);

    let pad = (config.padding as f32 * sf) as i32;
    let max_text_w = (w as i32 - 2 * pad) as f32;

    let title_font = fonts.face(FontChoice::default());
    let title_px = config.title_px * sf;
    let artist_px = config.artist_px * sf;
    let title_lh = (title_px * config.line_spacing) as i32;
    let artist_lh = (artist_px * config.line_spacing) as i32;
    let artist_top = h as i32 - pad - artist_lh;
    let title_top = artist_top - title_lh;

    // Excerpt block, centered in the band between the top padding and the
    // title. Anything past the panel edges just clips.
    let lyric_font = fonts.face(card.style.font);
    let lyric_px = config.lyrics_px * sf;
    let measure = |text: &str| line_width(lyric_font, lyric_px, text);
    let lines = wrap_text(card.excerpt, max_text_w, &measure);
    let lyric_lh = (lyric_px * config.line_spacing) as i32;

    let band = title_top - pad;
    let block_h = lines.len() as i32 * lyric_lh;
    let y0 = pad + ((band - block_h) / 2).max(0);

    let passes = effect_passes(card.style.effect);
    for (i, line) in lines.iter().enumerate() {
        let x = ((w as f32 - measure(line)) / 2.0) as i32;
        let y = y0 + i as i32 * lyric_lh;
        for (dx, dy, color, alpha) in &passes {
            draw_line(
                &mut panel,
                lyric_font,
                lyric_px,
                x + (dx * sf) as i32,
                y + (dy * sf) as i32,
                *color,
                *alpha,
                line,
            );
        }
        draw_line(&mut panel, lyric_font, lyric_px, x, y, WHITE, 1.0, line);
    }

    // Title and artist carry a fixed shadow independent of the user's choice.
    let shadow = (2.0 * sf) as i32;
    for (text, px, top, color) in [
        (card.song.song_title.as_str(), title_px, title_top, WHITE),
        (card.song.artist.as_str(), artist_px, artist_top, ARTIST_GRAY),
    ] {
        let x = ((w as f32 - line_width(title_font, px, text)) / 2.0) as i32;
        draw_line(&mut panel, title_font, px, x, top + shadow, BLACK, 0.7, text);
        draw_line(&mut panel, title_font, px, x, top, color, 1.0, text);
    }

    Ok(panel)
}

pub(crate) fn cover_fit(src: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    let (rw, rh, cx, cy) = cover_fit_dims(src.width(), src.height(), w, h);
    let resized = imageops::resize(src, rw, rh, FilterType::Triangle);
    imageops::crop_imm(&resized, cx, cy, w, h).to_image()
}

/// Scale-to-fill dimensions plus the centered crop offset.
pub(crate) fn cover_fit_dims(sw: u32, sh: u32, dw: u32, dh: u32) -> (u32, u32, u32, u32) {
    if sw == 0 || sh == 0 {
        return (dw, dh, 0, 0);
    }
    let scale = f64::max(dw as f64 / sw as f64, dh as f64 / sh as f64);
    let rw = ((sw as f64 * scale).round() as u32).max(dw);
    let rh = ((sh as f64 * scale).round() as u32).max(dh);
    (rw, rh, (rw - dw) / 2, (rh - dh) / 2)
}

/// Black overlay strength down the panel: light at the top, heavy at the
/// bottom where the title sits.
pub(crate) fn gradient_alpha(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        0.20 + (0.30 - 0.20) * (t / 0.5)
    } else {
        0.30 + (0.80 - 0.30) * ((t - 0.5) / 0.5)
    }
}

fn apply_gradient(img: &mut RgbaImage) {
    let rows = img.height().max(2) - 1;
    for y in 0..img.height() {
        let alpha = gradient_alpha(y as f32 / rows as f32);
        for x in 0..img.width() {
            blend_px(img.get_pixel_mut(x, y), BLACK, alpha);
        }
    }
}

fn blend_px(dst: &mut Rgba<u8>, color: [u8; 3], alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    let inv = 1.0 - a;
    for i in 0..3 {
        dst.0[i] = (color[i] as f32 * a + dst.0[i] as f32 * inv).round() as u8;
    }
    dst.0[3] = 255;
}

/// Greedy word wrap. Explicit newlines in the excerpt are preserved, blank
/// lines included; a word wider than the panel stands alone and clips.
pub(crate) fn wrap_text(
    text: &str,
    max_width: f32,
    measure: &impl Fn(&str) -> f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        wrap_line_into(raw.trim_end(), max_width, measure, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_line_into(
    line: &str,
    max_width: f32,
    measure: &impl Fn(&str) -> f32,
    out: &mut Vec<String>,
) {
    if line.trim().is_empty() {
        out.push(String::new());
        return;
    }
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if !current.is_empty() && measure(&candidate) > max_width {
            out.push(std::mem::take(&mut current));
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Extra draw passes under the main text, in logical pixels.
fn effect_passes(effect: TextEffect) -> Vec<(f32, f32, [u8; 3], f32)> {
    match effect {
        TextEffect::Shadow => vec![(0.0, 2.0, BLACK, 0.8), (0.0, 4.0, BLACK, 0.3)],
        TextEffect::Outline => [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)]
            .into_iter()
            .map(|(dx, dy)| (dx, dy, BLACK, 1.0))
            .collect(),
        TextEffect::Glow => {
            let mut passes = Vec::new();
            for (radius, alpha) in [(1.0, 0.5), (2.0, 0.25)] {
                for dy in [-1.0, 0.0, 1.0] {
                    for dx in [-1.0, 0.0, 1.0] {
                        if dx == 0.0 && dy == 0.0 {
                            continue;
                        }
                        passes.push((dx * radius, dy * radius, WHITE, alpha));
                    }
                }
            }
            passes
        }
        TextEffect::None => Vec::new(),
    }
}

fn line_width(font: &Font, px: f32, text: &str) -> f32 {
    let scale = Scale::uniform(px);
    font.layout(text, scale, point(0.0, 0.0))
        .map(|g| g.unpositioned().h_metrics().advance_width)
        .sum()
}

fn draw_line(
    img: &mut RgbaImage,
    font: &Font,
    px: f32,
    x: i32,
    y_top: i32,
    color: [u8; 3],
    alpha: f32,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let ascent = font.v_metrics(scale).ascent;
    for glyph in font.layout(text, scale, point(x as f32, y_top as f32 + ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px_x = gx as i32 + bb.min.x;
                let px_y = gy as i32 + bb.min.y;
                if px_x < 0 || px_y < 0 {
                    return;
                }
                let (px_x, px_y) = (px_x as u32, px_y as u32);
                if px_x >= img.width() || px_y >= img.height() {
                    return;
                }
                let a = coverage * alpha;
                if a > 0.0 {
                    blend_px(img.get_pixel_mut(px_x, px_y), color, a);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_fit_scales_up_narrow_source() {
        // 100x100 into 540x960: height drives the scale.
        let (rw, rh, cx, cy) = cover_fit_dims(100, 100, 540, 960);
        assert_eq!((rw, rh), (960, 960));
        assert_eq!((cx, cy), (210, 0));
    }

    #[test]
    fn cover_fit_crops_wide_source_horizontally() {
        let (rw, rh, cx, cy) = cover_fit_dims(1920, 1080, 540, 960);
        assert_eq!(rh, 960);
        assert!(rw > 540);
        assert_eq!(cx, (rw - 540) / 2);
        assert_eq!(cy, 0);
    }

    #[test]
    fn cover_fit_exact_match_is_identity() {
        assert_eq!(cover_fit_dims(540, 960, 540, 960), (540, 960, 0, 0));
    }

    #[test]
    fn gradient_is_light_on_top_heavy_below() {
        assert!((gradient_alpha(0.0) - 0.20).abs() < 1e-6);
        assert!((gradient_alpha(0.5) - 0.30).abs() < 1e-6);
        assert!((gradient_alpha(1.0) - 0.80).abs() < 1e-6);
        assert!(gradient_alpha(0.25) < gradient_alpha(0.75));
    }

    #[test]
    fn blend_full_alpha_replaces_pixel() {
        let mut px = Rgba([10, 20, 30, 255]);
        blend_px(&mut px, WHITE, 1.0);
        assert_eq!(px, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn blend_zero_alpha_keeps_pixel() {
        let mut px = Rgba([10, 20, 30, 255]);
        blend_px(&mut px, WHITE, 0.0);
        assert_eq!(px, Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn wrap_respects_explicit_newlines_and_width() {
        let measure = |s: &str| s.chars().count() as f32;
        let lines = wrap_text("one two three\n\nfour", 9.0, &measure);
        assert_eq!(lines, vec!["one two", "three", "", "four"]);
    }

    #[test]
    fn wrap_keeps_overlong_word_on_its_own_line() {
        let measure = |s: &str| s.chars().count() as f32;
        let lines = wrap_text("a incomprehensibilities b", 10.0, &measure);
        assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn empty_excerpt_still_yields_one_line() {
        let measure = |s: &str| s.chars().count() as f32;
        assert_eq!(wrap_text("", 10.0, &measure), vec![String::new()]);
    }

    #[test]
    fn outline_is_four_black_passes() {
        let passes = effect_passes(TextEffect::Outline);
        assert_eq!(passes.len(), 4);
        assert!(passes.iter().all(|(_, _, c, a)| *c == BLACK && *a == 1.0));
    }

    #[test]
    fn effect_none_adds_no_passes() {
        assert!(effect_passes(TextEffect::None).is_empty());
    }
}
