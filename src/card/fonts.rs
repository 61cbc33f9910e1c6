use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusttype::Font;
use tracing::debug;

use super::error::CardError;
use super::style::FontChoice;

const FALLBACK_FILES: &[&str] = &[
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "NotoSans-Regular.ttf",
    "FreeSans.ttf",
    "Arial.ttf",
    "arial.ttf",
];

fn candidates(choice: FontChoice) -> &'static [&'static str] {
    match choice {
        FontChoice::Inter => &["Inter-Regular.ttf", "Inter.ttf", "InterVariable.ttf"],
        FontChoice::Lora => &["Lora-Regular.ttf", "Lora.ttf", "Lora-VariableFont_wght.ttf"],
        FontChoice::PlayfairDisplay => &[
            "PlayfairDisplay-Regular.ttf",
            "PlayfairDisplay.ttf",
            "PlayfairDisplay-VariableFont_wght.ttf",
        ],
        FontChoice::RobotoSlab => &[
            "RobotoSlab-Regular.ttf",
            "RobotoSlab.ttf",
            "RobotoSlab-VariableFont_wght.ttf",
        ],
        FontChoice::DancingScript => &[
            "DancingScript-Regular.ttf",
            "DancingScript.ttf",
            "DancingScript-VariableFont_wght.ttf",
        ],
    }
}

/// Faces resolved from installed font files. Missing faces fall back to the
/// first usable sans file on the system, so a panel renders with whatever is
/// available rather than failing per face.
pub struct FontLibrary {
    faces: HashMap<FontChoice, Font<'static>>,
    fallback: Font<'static>,
}

impl FontLibrary {
    pub fn load() -> Result<Self, CardError> {
        let mut faces = HashMap::new();
        for choice in FontChoice::ALL {
            if let Some(font) = load_first(candidates(choice)) {
                faces.insert(choice, font);
            } else {
                debug!("face {:?} not installed, will fall back", choice);
            }
        }

        let fallback = load_first(FALLBACK_FILES)
            .or_else(|| faces.values().next().cloned())
            .ok_or_else(|| CardError::NoFont("any face".to_string()))?;

        Ok(Self { faces, fallback })
    }

    pub fn face(&self, choice: FontChoice) -> &Font<'static> {
        self.faces.get(&choice).unwrap_or(&self.fallback)
    }
}

fn load_first(names: &[&str]) -> Option<Font<'static>> {
    names
        .iter()
        .find_map(|name| find_font_file(name))
        .and_then(|path| std::fs::read(&path).ok())
        .and_then(Font::try_from_vec)
}

fn find_font_file(name: &str) -> Option<PathBuf> {
    font_dirs().iter().find_map(|dir| find_in(dir, name))
}

fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(dir) = std::env::var("LYRICARD_FONT_DIR") {
        dirs.push(PathBuf::from(dir));
    }
    if let Some(base) = directories::BaseDirs::new() {
        dirs.push(base.home_dir().join(".fonts"));
        dirs.push(base.home_dir().join(".local/share/fonts"));
    }
    for dir in [
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/System/Library/Fonts",
        "/Library/Fonts",
        "C:\\Windows\\Fonts",
    ] {
        dirs.push(PathBuf::from(dir));
    }
    dirs
}

fn find_in(dir: &Path, name: &str) -> Option<PathBuf> {
    for entry in std::fs::read_dir(dir).ok()?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = find_in(&path, name) {
                return Some(found);
            }
        } else if path
            .file_name()
            .is_some_and(|f| f.eq_ignore_ascii_case(name))
        {
            return Some(path);
        }
    }
    None
}
