use image::{Delay, Rgba, RgbaImage};

use crate::{
    caption::synth::Caption,
    foundation::config::LayoutParams,
    layout::placement::{PlacedLine, layout_caption, place_watermark},
    render::text::GlyphRasterizer,
    template::source::TemplateFrame,
};

/// A template frame with the caption burned in.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    /// Captioned pixels.
    pub image: RgbaImage,
    /// Display time copied from the source frame.
    pub delay: Delay,
}

/// Draws outlined captions and the watermark onto copies of template frames.
pub struct CaptionRenderer<'a> {
    rasterizer: &'a dyn GlyphRasterizer,
    params: &'a LayoutParams,
}

impl<'a> CaptionRenderer<'a> {
    /// Bind a rasterizer to a set of layout parameters.
    pub fn new(rasterizer: &'a dyn GlyphRasterizer, params: &'a LayoutParams) -> Self {
        Self { rasterizer, params }
    }

    /// Render `caption` (and `watermark`) onto a copy of `frame`, keeping its delay.
    pub fn render(
        &self,
        frame: &TemplateFrame,
        caption: &str,
        watermark: Option<&str>,
    ) -> RenderedFrame {
        RenderedFrame {
            image: self.render_image(&frame.image, caption, watermark),
            delay: frame.delay,
        }
    }

    /// Render onto a copy of `source`; `source` itself is left untouched.
    pub fn render_image(
        &self,
        source: &RgbaImage,
        caption: &str,
        watermark: Option<&str>,
    ) -> RgbaImage {
        let mut canvas = source.clone();
        let (width, height) = canvas.dimensions();

        let layout = layout_caption(
            &Caption::parse(caption),
            width,
            height,
            self.params,
            self.rasterizer,
        );
        let outline = Rgba(self.params.outline_rgba);
        let fill = Rgba(self.params.fill_rgba);
        for line in layout.lines() {
            self.draw_outlined(&mut canvas, line, outline, fill);
        }

        if let Some(line) =
            watermark.and_then(|wm| place_watermark(wm, height, self.params, self.rasterizer))
        {
            self.rasterizer.draw(
                &mut canvas,
                &line.text,
                line.x,
                line.y,
                line.size_px,
                Rgba(self.params.watermark_rgba),
            );
        }

        canvas
    }

    fn draw_outlined(
        &self,
        canvas: &mut RgbaImage,
        line: &PlacedLine,
        outline: Rgba<u8>,
        fill: Rgba<u8>,
    ) {
        let r = self.params.outline_radius;
        for dy in -r..=r {
            for dx in -r..=r {
                self.rasterizer.draw(
                    canvas,
                    &line.text,
                    line.x + dx,
                    line.y + dy,
                    line.size_px,
                    outline,
                );
            }
        }
        self.rasterizer
            .draw(canvas, &line.text, line.x, line.y, line.size_px, fill);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
