/// Pointillist painting
///
/// The photo is re-painted as a staggered grid of round dots on white
/// paper. Each dot takes the mean color of the photo underneath it.
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

/// Dot radius scales with the smaller image side
pub fn dot_radius(width: u32, height: u32) -> u32 {
    (width.min(height) / 150).max(2)
}

/// Mean color of the square of side `2r + 1` around `(cx, cy)`, clipped
fn mean_color(img: &RgbImage, cx: i64, cy: i64, r: i64) -> Rgb<u8> {
    let x0 = (cx - r).max(0);
    let y0 = (cy - r).max(0);
    let x1 = (cx + r).min(img.width() as i64 - 1);
    let y1 = (cy + r).min(img.height() as i64 - 1);

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = img.get_pixel(x as u32, y as u32);
            for c in 0..3 {
                sum[c] += p[c] as u64;
            }
            count += 1;
        }
    }
    if count == 0 {
        return PAPER;
    }
    Rgb([
        ((sum[0] + count / 2) / count) as u8,
        ((sum[1] + count / 2) / count) as u8,
        ((sum[2] + count / 2) / count) as u8,
    ])
}

pub fn pointillism(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }

    let radius = dot_radius(w, h) as i64;
    let col_step = 2 * radius;
    // rows closer than the dot diameter so neighbouring rows interlock
    let row_step = (radius * 7 / 4).max(1);

    let mut canvas = RgbImage::from_pixel(w, h, PAPER);
    let mut row = 0;
    let mut cy = 0;
    while cy < h as i64 + radius {
        let offset = if row % 2 == 0 { 0 } else { radius };
        let mut cx = offset;
        while cx < w as i64 + radius {
            if cx < w as i64 && cy < h as i64 {
                let color = mean_color(img, cx, cy, radius);
                draw_filled_circle_mut(&mut canvas, (cx as i32, cy as i32), radius as i32, color);
            }
            cx += col_step;
        }
        cy += row_step;
        row += 1;
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_radius() {
        assert_eq!(dot_radius(100, 100), 2);
        assert_eq!(dot_radius(3000, 1500), 10);
    }

    #[test]
    fn test_flat_image_uses_only_its_color_and_paper() {
        let color = Rgb([30, 120, 200]);
        let img = RgbImage::from_pixel(64, 48, color);
        let out = pointillism(&img);
        assert_eq!(out.dimensions(), (64, 48));
        assert!(out.pixels().all(|p| *p == color || *p == PAPER));
        let painted = out.pixels().filter(|p| **p == color).count();
        assert!(painted > (64 * 48) / 2);
    }

    #[test]
    fn test_deterministic() {
        let img = RgbImage::from_fn(50, 40, |x, y| Rgb([(x * 5) as u8, (y * 6) as u8, 128]));
        assert_eq!(pointillism(&img), pointillism(&img));
    }

    #[test]
    fn test_dot_takes_local_color() {
        let img = RgbImage::from_fn(60, 60, |x, _| {
            if x < 30 {
                Rgb([250, 0, 0])
            } else {
                Rgb([0, 0, 250])
            }
        });
        let out = pointillism(&img);
        assert_eq!(out.get_pixel(4, 0), &Rgb([250, 0, 0]));
        assert_eq!(out.get_pixel(56, 0), &Rgb([0, 0, 250]));
    }
}
