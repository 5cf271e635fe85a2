use super::*;
use crate::test_support::BlockRasterizer;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn blue(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([20, 40, 200, 255]))
}

#[test]
fn each_line_is_outlined_then_filled() {
    let raster = BlockRasterizer::new();
    let params = LayoutParams::default();
    let renderer = CaptionRenderer::new(&raster, &params);
    renderer.render_image(&blue(200, 100), "hi", None);

    let calls = raster.calls();
    assert_eq!(calls.len(), 25 + 1);
    assert!(calls[..25].iter().all(|c| c.color == BLACK && c.text == "hi"));
    let offsets: std::collections::BTreeSet<(i32, i32)> = calls[..25]
        .iter()
        .map(|c| (c.x - calls[25].x, c.y - calls[25].y))
        .collect();
    assert_eq!(offsets.len(), 25);
    assert!(offsets.iter().all(|(dx, dy)| dx.abs() <= 2 && dy.abs() <= 2));
    assert_eq!(calls[25].color, WHITE);
}

#[test]
fn top_and_bottom_each_get_drawn() {
    let raster = BlockRasterizer::new();
    let params = LayoutParams::default();
    let renderer = CaptionRenderer::new(&raster, &params);
    renderer.render_image(&blue(400, 300), "up :: down", None);

    let fills: Vec<_> = raster
        .calls()
        .into_iter()
        .filter(|c| c.color == WHITE)
        .collect();
    assert_eq!(fills.len(), 2);
    assert_eq!(fills[0].text, "up");
    assert_eq!(fills[1].text, "down");
    assert!(fills[0].y < fills[1].y);
}

#[test]
fn blank_caption_draws_nothing() {
    let raster = BlockRasterizer::new();
    let params = LayoutParams::default();
    let renderer = CaptionRenderer::new(&raster, &params);
    let src = blue(50, 50);
    let out = renderer.render_image(&src, "  ::  ", None);
    assert!(raster.calls().is_empty());
    assert_eq!(out, src);
}

#[test]
fn watermark_is_a_single_gray_draw() {
    let raster = BlockRasterizer::new();
    let params = LayoutParams::default();
    let renderer = CaptionRenderer::new(&raster, &params);
    renderer.render_image(&blue(300, 300), "", Some("AI MemeGen"));

    let calls = raster.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "AI MemeGen");
    assert_eq!(calls[0].color, Rgba(params.watermark_rgba));
    assert_eq!(calls[0].x, params.margin_px);
}

#[test]
fn source_frame_is_not_mutated() {
    let raster = BlockRasterizer::new();
    let params = LayoutParams::default();
    let renderer = CaptionRenderer::new(&raster, &params);
    let src = blue(200, 200);
    let before = src.clone();
    let out = renderer.render_image(&src, "caption :: here", Some("wm"));
    assert_eq!(src, before);
    assert_ne!(out, src);
    assert_eq!(out.dimensions(), src.dimensions());
}

#[test]
fn render_keeps_frame_delay() {
    let raster = BlockRasterizer::new();
    let params = LayoutParams::default();
    let renderer = CaptionRenderer::new(&raster, &params);
    let frame = TemplateFrame {
        image: blue(64, 64),
        delay: Delay::from_numer_denom_ms(70, 1),
    };
    let out = renderer.render(&frame, "x", None);
    assert_eq!(out.delay, frame.delay);
}
