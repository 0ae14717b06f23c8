//! Panel titles drawn with the system's sans-serif font.
//!
//! The font is looked up once per process through `font_kit`. Machines
//! without any usable font still render figures, just without titles.
use ab_glyph::{FontVec, PxScale};
use font_kit::family_name::FamilyName;
use font_kit::handle::Handle;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::{debug, warn};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Height of the strip reserved above the panels when titles are drawn.
pub const TITLE_STRIP: u32 = 24;
/// Glyph height in pixels.
pub const TITLE_SCALE: f32 = 16.0;

const TITLE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Parsed font plus the scale titles are drawn at.
pub struct TitleFont {
    font: FontVec,
    scale: PxScale,
}

impl fmt::Debug for TitleFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleFont")
            .field("scale", &self.scale.y)
            .finish()
    }
}

impl TitleFont {
    /// Parse TrueType/OpenType data; `index` selects a face in a collection.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Option<Self> {
        let font = FontVec::try_from_vec_and_index(data, index).ok()?;
        Some(Self {
            font,
            scale: PxScale::from(TITLE_SCALE),
        })
    }

    /// Best sans-serif match of the system font source, loaded on first use.
    pub fn system() -> Option<Arc<TitleFont>> {
        static SYSTEM: OnceLock<Option<Arc<TitleFont>>> = OnceLock::new();
        SYSTEM.get_or_init(load_system_font).clone()
    }

    /// Width and height of `text` in pixels.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, text)
    }

    /// Longest prefix of `text` (on a char boundary) no wider than `max_width`.
    pub fn fit<'t>(&self, text: &'t str, max_width: u32) -> &'t str {
        let mut end = text.len();
        while end > 0 && self.measure(&text[..end]).0 > max_width {
            end = text[..end]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
        &text[..end]
    }

    /// Draw `text` with its top-left corner at `(x, y)`, cut to `max_width`.
    pub fn draw(&self, canvas: &mut RgbImage, x: u32, y: u32, max_width: u32, text: &str) {
        let fitted = self.fit(text, max_width);
        if fitted.is_empty() {
            return;
        }
        draw_text_mut(
            canvas,
            TITLE_COLOR,
            x as i32,
            y as i32,
            self.scale,
            &self.font,
            fitted,
        );
    }
}

fn load_system_font() -> Option<Arc<TitleFont>> {
    let handle = match SystemSource::new()
        .select_best_match(&[FamilyName::SansSerif], &Properties::new())
    {
        Ok(handle) => handle,
        Err(err) => {
            warn!("no system sans-serif font ({err:?}); panel titles are skipped");
            return None;
        }
    };
    let index = match &handle {
        Handle::Path { font_index, .. } | Handle::Memory { font_index, .. } => *font_index,
    };
    let data = match handle.load().map(|font| font.copy_font_data()) {
        Ok(Some(data)) => Arc::try_unwrap(data).unwrap_or_else(|shared| (*shared).clone()),
        Ok(None) | Err(_) => {
            warn!("system font could not be loaded; panel titles are skipped");
            return None;
        }
    };
    let font = TitleFont::from_bytes(data, index);
    match &font {
        Some(_) => debug!("title font loaded from {handle:?}"),
        None => warn!("system font could not be parsed; panel titles are skipped"),
    }
    font.map(Arc::new)
}
