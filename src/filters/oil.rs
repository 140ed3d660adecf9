/// Oil painting look
///
/// A grayscale morphological opening (erode, then dilate) with an
/// elliptical brush flattens fine detail into blotches of paint. The
/// result is then stretched so its darkest value lands on 20 and its
/// brightest on 255.
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::{blue_channel, green_channel, red_channel};
use imageproc::morphology::{grayscale_open, Mask};

/// Brush diameter in pixels
pub const KERNEL_SIZE: usize = 7;
/// Output range after normalization
pub const NORM_MIN: f64 = 20.0;
pub const NORM_MAX: f64 = 255.0;

/// Offsets `(dx, dy)` covered by an elliptical structuring element
///
/// Row `dy` spans `round(c * sqrt(1 - dy^2 / r^2))` pixels either side of
/// the centre, which reproduces the usual 7x7 ellipse:
///
/// ```text
/// ...#...
/// .#####.
/// #######
/// #######
/// #######
/// .#####.
/// ...#...
/// ```
pub fn elliptical_kernel(size: usize) -> Vec<(isize, isize)> {
    let r = (size / 2) as isize;
    let c = (size / 2) as f64;
    let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };

    let mut offsets = Vec::new();
    for dy in -r..=r {
        let dx = (c * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as isize;
        for x in -dx..=dx {
            offsets.push((x, dy));
        }
    }
    offsets
}

/// The elliptical kernel as an imageproc mask centred on the brush
pub fn elliptical_mask(size: usize) -> Mask {
    let r = (size / 2) as isize;
    let side = size.max(1) as u32;
    let mut brush = GrayImage::new(side, side);
    for (dx, dy) in elliptical_kernel(size) {
        brush.put_pixel((dx + r) as u32, (dy + r) as u32, Luma([u8::MAX]));
    }
    Mask::from_image(&brush, r as u8, r as u8)
}

/// Per-channel morphological opening with the elliptical kernel
///
/// Pixels outside the image are ignored by the mask reduction.
pub fn open(img: &RgbImage, size: usize) -> RgbImage {
    let mask = elliptical_mask(size);
    let [r, g, b] = [red_channel(img), green_channel(img), blue_channel(img)]
        .map(|channel| grayscale_open(&channel, &mask));
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        Rgb([r.get_pixel(x, y)[0], g.get_pixel(x, y)[0], b.get_pixel(x, y)[0]])
    })
}

/// Min-max stretch over all channels into `[lo, hi]`
///
/// A flat image has no range to stretch and maps entirely to `lo`.
pub fn normalize(img: &RgbImage, lo: f64, hi: f64) -> RgbImage {
    let raw = img.as_raw();
    let (min, max) = raw
        .iter()
        .fold((u8::MAX, u8::MIN), |(mn, mx), &v| (mn.min(v), mx.max(v)));

    let scale = if max > min {
        (hi - lo) / (max - min) as f64
    } else {
        0.0
    };
    let shift = lo - min as f64 * scale;

    let out: Vec<u8> = raw
        .iter()
        .map(|&v| (v as f64 * scale + shift).round().clamp(0.0, 255.0) as u8)
        .collect();
    RgbImage::from_raw(img.width(), img.height(), out).unwrap_or_else(|| img.clone())
}

pub fn oil_painting(img: &RgbImage) -> RgbImage {
    if img.width() == 0 || img.height() == 0 {
        return img.clone();
    }
    let opened = open(img, KERNEL_SIZE);
    normalize(&opened, NORM_MIN, NORM_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_shape() {
        let kernel = elliptical_kernel(7);
        let row_len = |dy: isize| kernel.iter().filter(|(_, y)| *y == dy).count();
        assert_eq!(row_len(-3), 1);
        assert_eq!(row_len(-2), 5);
        assert_eq!(row_len(-1), 7);
        assert_eq!(row_len(0), 7);
        assert_eq!(row_len(1), 7);
        assert_eq!(row_len(2), 5);
        assert_eq!(row_len(3), 1);
        assert_eq!(kernel.len(), 33);
    }

    #[test]
    fn test_opening_ignores_pixels_outside_the_image() {
        // A bright block in the corner is wider than the brush, so it survives
        let img = RgbImage::from_fn(12, 12, |x, y| {
            if x < 7 && y < 7 {
                Rgb([200, 120, 40])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let opened = open(&img, KERNEL_SIZE);
        assert_eq!(opened.get_pixel(0, 0), &Rgb([200, 120, 40]));
        assert_eq!(opened.get_pixel(11, 11), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_opening_removes_specks() {
        let mut img = RgbImage::new(20, 20);
        img.put_pixel(10, 10, Rgb([255, 255, 255]));
        let opened = open(&img, KERNEL_SIZE);
        assert!(opened.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_flat_image_maps_to_lower_bound() {
        let img = RgbImage::from_pixel(8, 8, Rgb([77, 77, 77]));
        let out = oil_painting(&img);
        assert!(out.pixels().all(|p| *p == Rgb([20, 20, 20])));
    }

    #[test]
    fn test_output_range() {
        let img = RgbImage::from_fn(40, 30, |x, y| {
            if x < 20 {
                Rgb([10, (y * 3) as u8, 60])
            } else {
                Rgb([200, 150, (x * 2) as u8])
            }
        });
        let out = oil_painting(&img);
        assert_eq!(out.dimensions(), (40, 30));
        let min = out.as_raw().iter().min().copied().unwrap();
        let max = out.as_raw().iter().max().copied().unwrap();
        assert_eq!(min, 20);
        assert_eq!(max, 255);
    }

    #[test]
    fn test_normalize_stretches_linearly() {
        let img = RgbImage::from_raw(1, 2, vec![0, 50, 100, 100, 100, 100]).unwrap();
        let out = normalize(&img, 20.0, 255.0);
        assert_eq!(out.as_raw(), &vec![20, 138, 255, 255, 255, 255]);
    }
}
