use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use image::{AnimationDecoder, Delay, ImageFormat, ImageReader, RgbaImage, codecs::gif::GifDecoder};

use crate::foundation::error::{MemeError, MemeResult};

/// One raster of a template together with how long it is shown.
#[derive(Clone, Debug)]
pub struct TemplateFrame {
    /// Frame pixels.
    pub image: RgbaImage,
    /// Display time; zero for still images.
    pub delay: Delay,
}

/// Whether a template renders to a still image or an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    /// Single raster written in the source format.
    Still,
    /// Frame sequence written as a GIF.
    Animated,
}

/// A decoded template. Never mutated after loading.
#[derive(Clone, Debug)]
pub struct Template {
    /// Source file.
    pub path: PathBuf,
    /// Lowercase output extension including the dot, e.g. `.jpg`; always `.gif` when animated.
    pub extension: String,
    /// Still or animated.
    pub kind: TemplateKind,
    /// Frames in display order; never empty.
    pub frames: Vec<TemplateFrame>,
    /// Whether the animation repeats forever.
    pub loop_forever: bool,
}

impl Template {
    /// Width and height of the first frame.
    pub fn dimensions(&self) -> (u32, u32) {
        self.frames
            .first()
            .map(|f| f.image.dimensions())
            .unwrap_or((0, 0))
    }
}

/// Open and decode a template file. GIFs keep every frame and its delay.
#[tracing::instrument]
pub fn load_template(path: &Path) -> MemeResult<Template> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| MemeError::template_load(format!("open '{}': {e}", path.display())))?;
    let format = reader.format();

    // Animated output is always GIF-encoded, whatever the file was named.
    let (kind, frames, extension) = if format == Some(ImageFormat::Gif) {
        let frames = decode_gif_frames(path)?;
        (TemplateKind::Animated, frames, ".gif".to_string())
    } else {
        let extension = extension_for(path, format);
        let image = reader
            .decode()
            .map_err(|e| MemeError::template_load(format!("decode '{}': {e}", path.display())))?
            .to_rgba8();
        let still = TemplateFrame {
            image,
            delay: Delay::from_numer_denom_ms(0, 1),
        };
        (TemplateKind::Still, vec![still], extension)
    };

    tracing::debug!(?kind, frames = frames.len(), %extension, "loaded template");
    Ok(Template {
        path: path.to_path_buf(),
        extension,
        kind,
        frames,
        loop_forever: true,
    })
}

fn decode_gif_frames(path: &Path) -> MemeResult<Vec<TemplateFrame>> {
    let load_err = |e: image::ImageError| {
        MemeError::template_load(format!("decode gif '{}': {e}", path.display()))
    };
    let file = File::open(path)
        .map_err(|e| MemeError::template_load(format!("open '{}': {e}", path.display())))?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(load_err)?;
    let frames = decoder.into_frames().collect_frames().map_err(load_err)?;
    if frames.is_empty() {
        return Err(MemeError::template_load(format!(
            "gif '{}' has no frames",
            path.display()
        )));
    }
    Ok(frames
        .into_iter()
        .map(|f| TemplateFrame {
            delay: f.delay(),
            image: f.into_buffer(),
        })
        .collect())
}

fn extension_for(path: &Path, format: Option<ImageFormat>) -> String {
    let from_path = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let ext = from_path
        .or_else(|| format.and_then(|f| f.extensions_str().first().map(|e| e.to_string())))
        .unwrap_or_else(|| "png".to_string());
    format!(".{ext}")
}

#[cfg(test)]
#[path = "../../tests/unit/template/source.rs"]
mod tests;
