use crate::{
    caption::synth::Caption, foundation::config::LayoutParams, layout::wrap::wrap_words,
    render::text::TextMeasure,
};

/// One measured line of text at its final pixel position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Line text.
    pub text: String,
    /// Left edge in pixels; negative when a single long word is wider than the frame.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Measured width in pixels.
    pub width: u32,
    /// Measured height in pixels.
    pub height: u32,
    /// Font size used for measuring and drawing.
    pub size_px: f32,
}

/// Positioned caption lines for one frame size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptionLayout {
    /// Lines of the top block, top to bottom.
    pub top: Vec<PlacedLine>,
    /// Lines of the bottom block, top to bottom.
    pub bottom: Vec<PlacedLine>,
}

impl CaptionLayout {
    /// All lines in draw order (top block first).
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.top.iter().chain(self.bottom.iter())
    }
}

/// Caption font size for a frame of `height` pixels; never below 1 px.
pub fn caption_font_px(height: u32, params: &LayoutParams) -> f32 {
    (height as f32 * params.font_scale).round().max(1.0)
}

/// Wrap, center and stack `caption` for a `width` x `height` frame.
///
/// The top block hangs from the top margin; the bottom block sits on the bottom margin. Blank
/// halves produce no lines. Blocks taller than the frame are laid out anyway and clip on draw.
pub fn layout_caption(
    caption: &Caption,
    width: u32,
    height: u32,
    params: &LayoutParams,
    measure: &dyn TextMeasure,
) -> CaptionLayout {
    let size_px = caption_font_px(height, params);

    let mut top = measure_block(caption.top.trim(), width, size_px, params, measure);
    stack_from(&mut top, params.margin_px, params.line_spacing_px);

    let mut bottom = measure_block(caption.bottom.trim(), width, size_px, params, measure);
    let block_h = block_height(&bottom, params.line_spacing_px);
    stack_from(
        &mut bottom,
        height as i32 - params.margin_px - block_h,
        params.line_spacing_px,
    );

    CaptionLayout { top, bottom }
}

/// Place `text` as a single small line in the bottom-left corner.
pub fn place_watermark(
    text: &str,
    height: u32,
    params: &LayoutParams,
    measure: &dyn TextMeasure,
) -> Option<PlacedLine> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let size_px = (height as f32 * params.watermark_scale).round().max(1.0);
    let (w, h) = measure.measure(text, size_px);
    Some(PlacedLine {
        text: text.to_string(),
        x: params.margin_px,
        y: height as i32 - params.margin_px - h as i32,
        width: w,
        height: h,
        size_px,
    })
}

fn measure_block(
    text: &str,
    frame_width: u32,
    size_px: f32,
    params: &LayoutParams,
    measure: &dyn TextMeasure,
) -> Vec<PlacedLine> {
    if text.is_empty() {
        return Vec::new();
    }
    wrap_words(text, params.wrap_width)
        .into_iter()
        .map(|line| {
            let (w, h) = measure.measure(&line, size_px);
            PlacedLine {
                x: (frame_width as i32 - w as i32) / 2,
                y: 0,
                width: w,
                height: h,
                size_px,
                text: line,
            }
        })
        .collect()
}

fn block_height(lines: &[PlacedLine], spacing: i32) -> i32 {
    let glyphs: i32 = lines.iter().map(|l| l.height as i32).sum();
    glyphs + spacing * (lines.len().saturating_sub(1) as i32)
}

fn stack_from(lines: &mut [PlacedLine], y0: i32, spacing: i32) {
    let mut y = y0;
    for line in lines {
        line.y = y;
        y += line.height as i32 + spacing;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
