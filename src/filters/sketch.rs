/// Pencil sketches
///
/// The tone of each pixel is `shade_factor * (horizontal + vertical window
/// width)` from the first iteration of the domain transform. Wide windows
/// (flat regions) saturate to white, narrow windows (texture, edges) stay
/// dark and read as pencil strokes.
///
/// The colored variant keeps the chroma of the photo and swaps its luma
/// for the sketch tone.
use image::{Luma, Rgb, RgbImage};

use super::domain::{box_radius, to_u8, DomainTransform, FloatImage};

/// Unclamped sketch tone, row-major
fn sketch_tone(src: &FloatImage, sigma_s: f32, sigma_r: f32, shade_factor: f32) -> Vec<f32> {
    let transform = DomainTransform::new(src, sigma_s, sigma_r);
    transform
        .window_widths(box_radius(sigma_s, 0))
        .into_iter()
        .map(|width| shade_factor * width)
        .collect()
}

/// Grayscale pencil sketch
pub fn pencil_sketch_gray(img: &RgbImage, sigma_s: f32, sigma_r: f32, shade_factor: f32) -> image::GrayImage {
    let src = FloatImage::from_rgb(img);
    let tone = sketch_tone(&src, sigma_s, sigma_r, shade_factor);
    image::GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([to_u8(tone[(y * img.width() + x) as usize])])
    })
}

/// Grayscale pencil sketch, replicated into the three channels
pub fn pencil_sketch(img: &RgbImage, sigma_s: f32, sigma_r: f32, shade_factor: f32) -> RgbImage {
    let gray = pencil_sketch_gray(img, sigma_s, sigma_r, shade_factor);
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

/// Pencil sketch that keeps the photo's colors
pub fn colored_pencil_sketch(img: &RgbImage, sigma_s: f32, sigma_r: f32, shade_factor: f32) -> RgbImage {
    let src = FloatImage::from_rgb(img);
    let tone = sketch_tone(&src, sigma_s, sigma_r, shade_factor);

    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b] = src.pixel(x as usize, y as usize);
        let (_, cr, cb) = rgb_to_ycrcb(r, g, b);
        let [r, g, b] = ycrcb_to_rgb(tone[(y * img.width() + x) as usize], cr, cb);
        Rgb([to_u8(r), to_u8(g), to_u8(b)])
    })
}

/// Chroma offset for float images
const DELTA: f32 = 0.5;

fn rgb_to_ycrcb(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cr = (r - y) * 0.713 + DELTA;
    let cb = (b - y) * 0.564 + DELTA;
    (y, cr, cb)
}

fn ycrcb_to_rgb(y: f32, cr: f32, cb: f32) -> [f32; 3] {
    let (cr, cb) = (cr - DELTA, cb - DELTA);
    [
        y + 1.403 * cr,
        y - 0.714 * cr - 0.344 * cb,
        y + 1.773 * cb,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGMA_S: f32 = 60.0;
    const SIGMA_R: f32 = 0.07;
    const SHADE: f32 = 0.05;

    fn checkerboard(a: Rgb<u8>, b: Rgb<u8>) -> RgbImage {
        RgbImage::from_fn(24, 24, |x, y| if (x + y) % 2 == 0 { a } else { b })
    }

    #[test]
    fn test_flat_image_is_blank_paper() {
        let img = RgbImage::from_pixel(20, 20, Rgb([120, 80, 40]));
        let out = pencil_sketch(&img, SIGMA_S, SIGMA_R, SHADE);
        assert!(out.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_sketch_is_gray() {
        let img = RgbImage::from_fn(30, 20, |x, y| Rgb([(x * 8) as u8, (y * 12) as u8, 90]));
        let out = pencil_sketch(&img, SIGMA_S, SIGMA_R, SHADE);
        assert_eq!(out.dimensions(), (30, 20));
        assert!(out.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn test_busy_texture_is_dark() {
        let img = checkerboard(Rgb([0, 0, 0]), Rgb([255, 255, 255]));
        let gray = pencil_sketch_gray(&img, SIGMA_S, SIGMA_R, SHADE);
        // every window holds a single pixel: 0.05 * (1 + 1) = 0.1
        assert!(gray.pixels().all(|p| p[0] == 26));
    }

    #[test]
    fn test_colored_sketch_keeps_hue() {
        let img = checkerboard(Rgb([255, 0, 0]), Rgb([0, 0, 255]));
        let out = colored_pencil_sketch(&img, SIGMA_S, SIGMA_R, SHADE);
        let red = out.get_pixel(0, 0);
        let blue = out.get_pixel(1, 0);
        assert!(red[0] > red[1] && red[0] > red[2]);
        assert!(blue[2] > blue[0] && blue[2] > blue[1]);
    }

    #[test]
    fn test_ycrcb_round_trip() {
        let (y, cr, cb) = rgb_to_ycrcb(0.2, 0.5, 0.8);
        let [r, g, b] = ycrcb_to_rgb(y, cr, cb);
        assert!((r - 0.2).abs() < 0.01);
        assert!((g - 0.5).abs() < 0.01);
        assert!((b - 0.8).abs() < 0.01);
    }
}
