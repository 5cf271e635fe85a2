use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::{
    DynamicImage, Frame, ImageFormat,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    foundation::error::{MemeError, MemeResult},
    foundation::fs::write_atomic,
    render::frame::{CaptionRenderer, RenderedFrame},
    render::style::{Style, apply_style},
    template::source::{Template, TemplateKind},
};

const GIF_ENCODE_SPEED: i32 = 10;

/// One written meme file and the frames it was encoded from.
#[derive(Clone, Debug)]
pub struct MemeOutput {
    /// Written file.
    pub path: PathBuf,
    /// Position of the source prompt in its batch.
    pub prompt_index: usize,
    /// Position of the caption variant for that prompt.
    pub variant_index: usize,
    /// Caption text that was rendered.
    pub caption: String,
    /// Rendered frames in display order.
    pub frames: Vec<RenderedFrame>,
}

/// File name for variant `variant_index` of prompt `prompt_index`, e.g. `meme_0_2.gif`.
pub fn output_file_name(prompt_index: usize, variant_index: usize, extension: &str) -> String {
    format!("meme_{prompt_index}_{variant_index}{extension}")
}

/// Render `caption` onto every frame of `template` and write the result to `dest`.
///
/// Still templates are rendered once, styled, and encoded in the format named by `dest`'s
/// extension. Animated templates render each frame with the same caption and are written as a
/// GIF keeping per-frame delays and the loop setting; `style` does not apply to them. The file is
/// encoded in memory first, so an error never leaves a partial file behind.
#[tracing::instrument(skip(template, renderer), fields(template = %template.path.display()))]
pub fn assemble(
    template: &Template,
    caption: &str,
    style: Style,
    watermark: Option<&str>,
    renderer: &CaptionRenderer<'_>,
    dest: &Path,
) -> MemeResult<Vec<RenderedFrame>> {
    let (frames, bytes) = match template.kind {
        TemplateKind::Still => {
            let first = template
                .frames
                .first()
                .ok_or_else(|| MemeError::template_load("template has no frames"))?;
            let mut frame = renderer.render(first, caption, watermark);
            frame.image = apply_style(&frame.image, style);
            let bytes = encode_still(&frame, dest)?;
            (vec![frame], bytes)
        }
        TemplateKind::Animated => {
            let frames: Vec<RenderedFrame> = template
                .frames
                .iter()
                .map(|f| renderer.render(f, caption, watermark))
                .collect();
            let bytes = encode_gif(&frames, template.loop_forever)?;
            (frames, bytes)
        }
    };

    write_atomic(dest, &bytes)?;
    tracing::debug!(frames = frames.len(), bytes = bytes.len(), "wrote meme");
    Ok(frames)
}

fn encode_still(frame: &RenderedFrame, dest: &Path) -> MemeResult<Vec<u8>> {
    let format = ImageFormat::from_path(dest).map_err(|e| {
        MemeError::validation(format!("unsupported output '{}': {e}", dest.display()))
    })?;
    let rgb = DynamicImage::ImageRgba8(frame.image.clone()).to_rgb8();
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut buf), format)
        .with_context(|| format!("encode {format:?} for '{}'", dest.display()))?;
    Ok(buf)
}

fn encode_gif(frames: &[RenderedFrame], loop_forever: bool) -> MemeResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new_with_speed(&mut buf, GIF_ENCODE_SPEED);
        if loop_forever {
            enc.set_repeat(Repeat::Infinite)
                .context("set gif repeat")?;
        }
        enc.encode_frames(
            frames
                .iter()
                .map(|f| Frame::from_parts(f.image.clone(), 0, 0, f.delay)),
        )
        .context("encode gif frames")?;
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/output/assemble.rs"]
mod tests;
