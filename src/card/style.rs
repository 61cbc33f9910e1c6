/// The faces offered by the style picker. Rendering resolves each to an
/// installed file and falls back when the face is not present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontChoice {
    #[default]
    Inter,
    Lora,
    PlayfairDisplay,
    RobotoSlab,
    DancingScript,
}

impl FontChoice {
    pub const ALL: [FontChoice; 5] = [
        FontChoice::Inter,
        FontChoice::Lora,
        FontChoice::PlayfairDisplay,
        FontChoice::RobotoSlab,
        FontChoice::DancingScript,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FontChoice::Inter => "Inter",
            FontChoice::Lora => "Lora",
            FontChoice::PlayfairDisplay => "Playfair Display",
            FontChoice::RobotoSlab => "Roboto Slab",
            FontChoice::DancingScript => "Dancing Script",
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::ALL, *self, 1)
    }

    pub fn prev(&self) -> Self {
        cycle(&Self::ALL, *self, -1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEffect {
    #[default]
    Shadow,
    Outline,
    Glow,
    None,
}

impl TextEffect {
    pub const ALL: [TextEffect; 4] = [
        TextEffect::Shadow,
        TextEffect::Outline,
        TextEffect::Glow,
        TextEffect::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TextEffect::Shadow => "Shadow",
            TextEffect::Outline => "Outline",
            TextEffect::Glow => "Glow",
            TextEffect::None => "None",
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::ALL, *self, 1)
    }

    pub fn prev(&self) -> Self {
        cycle(&Self::ALL, *self, -1)
    }
}

fn cycle<T: Copy + PartialEq, const N: usize>(all: &[T; N], current: T, step: isize) -> T {
    let index = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(index + step).rem_euclid(N as isize) as usize]
}

/// The user's two style choices, reset to defaults on start-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardStyle {
    pub font: FontChoice,
    pub effect: TextEffect,
}
