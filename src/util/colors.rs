use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x0022c55e);
pub const SECONDARY: Color = Color::from_u32(0x003b82f6);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x00111827);
pub const ERROR: Color = Color::from_u32(0x00f87171);
pub const MUTED: Color = Color::from_u32(0x009ca3af);
