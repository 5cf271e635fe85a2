use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};

use crate::foundation::{
    config::FontConfig,
    error::{MemeError, MemeResult},
};

/// Measures rendered text extents.
pub trait TextMeasure {
    /// Width and height in pixels of `text` drawn at `size_px`.
    fn measure(&self, text: &str, size_px: f32) -> (u32, u32);
}

/// Draws a single line of text onto a frame.
pub trait GlyphRasterizer: TextMeasure {
    /// Draw `text` with its top-left corner at (`x`, `y`). Pixels outside the canvas are clipped.
    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        size_px: f32,
        color: Rgba<u8>,
    );
}

/// Glyph rasterizer backed by an outline font.
pub struct FontRasterizer {
    font: FontVec,
    family: String,
}

impl std::fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRasterizer")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl FontRasterizer {
    /// Parse font bytes; `index` selects a face inside collections.
    pub fn from_bytes(bytes: Vec<u8>, index: u32, family: impl Into<String>) -> MemeResult<Self> {
        let font = FontVec::try_from_vec_and_index(bytes, index)
            .map_err(|e| MemeError::font(format!("parse font data: {e}")))?;
        Ok(Self {
            font,
            family: family.into(),
        })
    }

    /// Load a `ttf`/`otf` file.
    pub fn from_file(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| MemeError::font(format!("read font '{}': {e}", path.display())))?;
        let family = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string());
        Self::from_bytes(bytes, 0, family)
    }

    /// Use `cfg.path` when set, otherwise search system fonts and `cfg.dirs` for the preferred
    /// families, falling back to any sans-serif face and then to any face at all.
    pub fn discover(cfg: &FontConfig) -> MemeResult<Self> {
        if let Some(path) = &cfg.path {
            return Self::from_file(path);
        }

        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in &cfg.dirs {
            load_fonts_from_dir(&mut db, dir);
        }

        let mut families: Vec<usvg::fontdb::Family<'_>> = cfg
            .families
            .iter()
            .map(|name| usvg::fontdb::Family::Name(name.as_str()))
            .collect();
        families.push(usvg::fontdb::Family::SansSerif);

        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight::NORMAL,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| MemeError::font("no fonts found on this system"))?;

        let family = db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| MemeError::font(format!("font face for '{family}' is unreadable")))?;

        tracing::debug!(%family, "selected caption font");
        Self::from_bytes(bytes, index, family)
    }

    /// Primary family name of the loaded face.
    pub fn family(&self) -> &str {
        &self.family
    }
}

impl TextMeasure for FontRasterizer {
    fn measure(&self, text: &str, size_px: f32) -> (u32, u32) {
        imageproc::drawing::text_size(PxScale::from(size_px), &self.font, text)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        size_px: f32,
        color: Rgba<u8>,
    ) {
        imageproc::drawing::draw_text_mut(
            canvas,
            color,
            x,
            y,
            PxScale::from(size_px),
            &self.font,
            text,
        );
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
