use std::io::Cursor;

use image::{Frame, Rgba, codecs::gif::GifEncoder};

use super::*;
use crate::test_support::temp_dir;

fn write_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

fn write_gif(path: &Path, frames: u32, delay_ms: u32) {
    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new(&mut buf);
        for i in 0..frames {
            let img = RgbaImage::from_pixel(16, 12, Rgba([(i * 60) as u8, 0, 0, 255]));
            enc.encode_frame(Frame::from_parts(
                img,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            ))
            .unwrap();
        }
    }
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn png_loads_as_single_still_frame() {
    let dir = temp_dir("load_png");
    let path = dir.join("Drake.PNG");
    write_png(&path, 20, 10);

    let t = load_template(&path).unwrap();
    assert_eq!(t.kind, TemplateKind::Still);
    assert_eq!(t.frames.len(), 1);
    assert_eq!(t.dimensions(), (20, 10));
    assert_eq!(t.extension, ".png");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn gif_keeps_every_frame_and_delay() {
    let dir = temp_dir("load_gif");
    let path = dir.join("dance.gif");
    write_gif(&path, 4, 100);

    let t = load_template(&path).unwrap();
    assert_eq!(t.kind, TemplateKind::Animated);
    assert_eq!(t.frames.len(), 4);
    assert!(t.loop_forever);
    for f in &t.frames {
        let (n, d) = f.delay.numer_denom_ms();
        assert_eq!(n / d, 100);
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn corrupt_and_missing_files_are_template_load_errors() {
    let dir = temp_dir("load_bad");
    let path = dir.join("broken.jpg");
    std::fs::write(&path, b"definitely not a jpeg").unwrap();
    assert!(matches!(
        load_template(&path).unwrap_err(),
        MemeError::TemplateLoad(_)
    ));
    assert!(matches!(
        load_template(&dir.join("missing.png")).unwrap_err(),
        MemeError::TemplateLoad(_)
    ));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn extension_falls_back_to_detected_format() {
    assert_eq!(
        extension_for(Path::new("a/b"), Some(ImageFormat::Gif)),
        ".gif"
    );
    assert_eq!(extension_for(Path::new("x.JPEG"), None), ".jpeg");
}

#[test]
fn gif_named_as_jpeg_still_outputs_gif_extension() {
    let dir = temp_dir("load_gif_as_jpg");
    let path = dir.join("t.jpg");
    write_gif(&path, 2, 80);

    let t = load_template(&path).unwrap();
    assert_eq!(t.kind, TemplateKind::Animated);
    assert_eq!(t.extension, ".gif");

    std::fs::remove_dir_all(&dir).ok();
}
