use image::{DynamicImage, Rgba, RgbaImage};

const CARTOON_BLUR_SIGMA: f32 = 1.0;

/// Post-process filter applied after the caption is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// Leave pixels as rendered.
    #[default]
    None,
    /// Desaturate to gray.
    Grayscale,
    /// Soften, then keep only contour lines.
    Cartoon,
}

impl Style {
    /// Parse user input case-insensitively; anything unrecognized is [`Style::None`].
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => Self::Grayscale,
            "cartoon" => Self::Cartoon,
            _ => Self::None,
        }
    }
}

/// Apply `style` to `img`, returning a new buffer of the same dimensions.
pub fn apply_style(img: &RgbaImage, style: Style) -> RgbaImage {
    match style {
        Style::None => img.clone(),
        Style::Grayscale => DynamicImage::ImageRgba8(img.clone()).grayscale().to_rgba8(),
        Style::Cartoon => contour(&image::imageops::blur(img, CARTOON_BLUR_SIGMA)),
    }
}

// 3x3 kernel: 8 at the center, -1 around it, offset by 255. Flat areas go white, edges go dark.
fn contour(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w, h);
    let (wi, hi) = (w as i64, h as i64);

    for y in 0..hi {
        for x in 0..wi {
            let center = src.get_pixel(x as u32, y as u32);
            let mut acc = [0i64; 3];
            for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let sx = (x + dx).clamp(0, wi - 1) as u32;
                    let sy = (y + dy).clamp(0, hi - 1) as u32;
                    let p = src.get_pixel(sx, sy);
                    for c in 0..3 {
                        acc[c] -= i64::from(p[c]);
                    }
                }
            }
            let mut px = [0u8; 4];
            for c in 0..3 {
                px[c] = (255 + 8 * i64::from(center[c]) + acc[c]).clamp(0, 255) as u8;
            }
            px[3] = center[3];
            out.put_pixel(x as u32, y as u32, Rgba(px));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
