use image::{
    RgbaImage,
    imageops::{self, FilterType},
};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Renders an image as `▀` cells, upper pixel as foreground and lower as
/// background, two image rows per terminal row.
pub fn art_lines(img: &RgbaImage, cols: u16, rows: u16) -> Vec<Line<'static>> {
    let target_w = cols.max(1) as u32;
    let target_h = rows.max(1) as u32 * 2;
    let resized = imageops::resize(img, target_w, target_h, FilterType::Triangle);

    let mut lines = Vec::with_capacity(rows as usize);
    for y in (0..resized.height()).step_by(2) {
        let mut spans = Vec::with_capacity(resized.width() as usize);
        for x in 0..resized.width() {
            let top = resized.get_pixel(x, y);
            let bottom = if y + 1 < resized.height() {
                resized.get_pixel(x, y + 1)
            } else {
                top
            };
            spans.push(Span::styled(
                "▀",
                Style::default()
                    .fg(Color::Rgb(top[0], top[1], top[2]))
                    .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn produces_one_line_per_terminal_row() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        let lines = art_lines(&img, 4, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans.len(), 4);
    }
}
