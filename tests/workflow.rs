use image::RgbaImage;

use lyricard::card::style::{CardStyle, FontChoice, TextEffect};
use lyricard::card::{CardError, CardSpec, Rasterizer};
use lyricard::export::{Exporter, file_name};
use lyricard::http::models::{AlbumArt, SongInfo};
use lyricard::ui::state::{AppState, Workflow};

fn imagine() -> SongInfo {
    SongInfo {
        song_title: "Imagine".to_string(),
        artist: "John Lennon".to_string(),
        full_lyrics: "Imagine there's no heaven...".to_string(),
        album_art_description: "A pale blue sky over a white piano".to_string(),
    }
}

fn art() -> AlbumArt {
    AlbumArt {
        mime_type: "image/png".to_string(),
        bytes: vec![0u8; 16],
    }
}

#[test]
fn find_edit_create_download_scenario() {
    let mut state = AppState::default();

    // Find the song.
    state.query = "Imagine - John Lennon".to_string();
    let (attempt, query) = state.submit_query().expect("query should spawn a fetch");
    assert_eq!(query, "Imagine - John Lennon");
    assert!(matches!(state.workflow, Workflow::LoadingInfo { .. }));

    // Metadata lands: lyrics prefilled, art requested for the description.
    let (art_attempt, description) = state
        .song_info_fetched(attempt, imagine())
        .expect("fresh metadata should advance the workflow");
    assert_eq!(art_attempt, attempt);
    assert_eq!(description, "A pale blue sky over a white piano");
    match &state.workflow {
        Workflow::SelectingLyrics { excerpt, .. } => {
            assert_eq!(excerpt, "Imagine there's no heaven...");
        }
        other => panic!("unexpected workflow: {other:?}"),
    }

    // Creating before the art resolves is refused.
    assert!(!state.create_card());

    // Art resolves, the excerpt gets trimmed down, and the card is created.
    state.art_ready(attempt, art());
    *state.excerpt_mut().unwrap() = "Imagine there's no heaven".to_string();
    assert!(state.create_card());
    match &state.workflow {
        Workflow::CardReady {
            song,
            excerpt,
            style,
            ..
        } => {
            assert_eq!(excerpt, "Imagine there's no heaven");
            assert_eq!(*style, CardStyle::default());
            assert_eq!(file_name(Some(song)), "John_Lennon-Imagine-lyrics.png");
        }
        other => panic!("unexpected workflow: {other:?}"),
    }

    // Styling mutates configuration without leaving the phase.
    state.cycle_font(true);
    state.cycle_effect(true);
    state.cycle_effect(true);
    match &state.workflow {
        Workflow::CardReady { style, .. } => {
            assert_eq!(style.font, FontChoice::Lora);
            assert_eq!(style.effect, TextEffect::Glow);
        }
        other => panic!("unexpected workflow: {other:?}"),
    }

    // Start over restores the initial tuple.
    state.reset();
    assert!(matches!(state.workflow, Workflow::Idle));
    assert!(state.query.is_empty());
    assert!(state.error.is_none());
}

struct FlatRasterizer;

impl Rasterizer for FlatRasterizer {
    fn render(&self, _card: &CardSpec) -> Result<RgbaImage, CardError> {
        Ok(RgbaImage::from_pixel(9, 16, image::Rgba([0, 0, 0, 255])))
    }
}

#[test]
fn exporter_writes_a_png_named_after_the_song() {
    let out_dir = std::env::temp_dir().join(format!("lyricard-test-{}", std::process::id()));
    std::fs::create_dir_all(&out_dir).unwrap();

    let song = imagine();
    let art = art();
    let card = CardSpec {
        song: &song,
        excerpt: "Imagine there's no heaven",
        style: CardStyle::default(),
        art: &art,
    };

    let exporter = Exporter::with_rasterizer(Box::new(FlatRasterizer), out_dir.clone());
    let path = exporter.download(&card).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "John_Lennon-Imagine-lyrics.png"
    );
    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (9, 16));

    std::fs::remove_dir_all(&out_dir).unwrap();
}
