/// Cartoon look: edge-preserving smoothing with darkened edges
///
/// The smoothed image is multiplied by `1 - edge strength`, where edge
/// strength is the sum over channels of the 3x3 Sobel gradient magnitude.
use image::RgbImage;

use super::domain::{DomainTransform, FloatImage};

pub fn stylization(img: &RgbImage, sigma_s: f32, sigma_r: f32) -> RgbImage {
    let src = FloatImage::from_rgb(img);
    if src.is_empty() {
        return img.clone();
    }

    let mut smoothed = DomainTransform::new(&src, sigma_s, sigma_r).filter(&src, sigma_s);
    let magnitude = edge_magnitude(&smoothed);

    for (px, mag) in smoothed.data.chunks_mut(3).zip(&magnitude) {
        let keep = 1.0 - mag;
        px.iter_mut().for_each(|v| *v *= keep);
    }

    smoothed.to_rgb()
}

/// Index mirrored at the borders without repeating the edge sample
fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let last = n as isize - 1;
    let mirrored = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    mirrored.clamp(0, last) as usize
}

/// Per-pixel sum over channels of the Sobel gradient magnitude
fn edge_magnitude(img: &FloatImage) -> Vec<f32> {
    let (w, h) = (img.width, img.height);
    let mut out = vec![0.0; w * h];

    for y in 0..h {
        let ys = [
            reflect101(y as isize - 1, h),
            y,
            reflect101(y as isize + 1, h),
        ];
        for x in 0..w {
            let xs = [
                reflect101(x as isize - 1, w),
                x,
                reflect101(x as isize + 1, w),
            ];

            let mut total = 0.0;
            for c in 0..3 {
                let at = |xi: usize, yi: usize| img.pixel(xs[xi], ys[yi])[c];
                let gx = (at(2, 0) + 2.0 * at(2, 1) + at(2, 2)) - (at(0, 0) + 2.0 * at(0, 1) + at(0, 2));
                let gy = (at(0, 2) + 2.0 * at(1, 2) + at(2, 2)) - (at(0, 0) + 2.0 * at(1, 0) + at(2, 0));
                total += (gx * gx + gy * gy).sqrt();
            }
            out[y * w + x] = total;
        }
    }
    out
}
