use super::*;

fn colorful(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 200, 255])
    })
}

#[test]
fn parse_is_lenient() {
    assert_eq!(Style::parse("Grayscale"), Style::Grayscale);
    assert_eq!(Style::parse(" cartoon "), Style::Cartoon);
    assert_eq!(Style::parse("none"), Style::None);
    assert_eq!(Style::parse(""), Style::None);
    assert_eq!(Style::parse("sepia"), Style::None);
}

#[test]
fn grayscale_has_zero_saturation_and_same_size() {
    let src = colorful(32, 24);
    let out = apply_style(&src, Style::Grayscale);
    assert_eq!(out.dimensions(), src.dimensions());
    for px in out.pixels() {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn none_is_identity() {
    let src = colorful(8, 8);
    assert_eq!(apply_style(&src, Style::None), src);
}

#[test]
fn cartoon_whitens_flat_areas_and_darkens_edges() {
    let src = RgbaImage::from_fn(40, 40, |x, _| {
        if x < 20 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    let out = apply_style(&src, Style::Cartoon);
    assert_eq!(out.dimensions(), (40, 40));

    let flat = out.get_pixel(5, 20);
    assert_eq!(flat.0, [255, 255, 255, 255]);

    let darkest = (0..40).map(|x| out.get_pixel(x, 20)[0]).min().unwrap();
    assert!(darkest < 128, "no edge pixel darkened: min {darkest}");
}
