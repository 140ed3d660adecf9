/// Edge-preserving smoothing with the domain transform
///
/// Each row (and each column) is mapped onto a 1-D domain where the distance
/// between neighbours is `1 + sigma_s / sigma_r * |color difference|`. A box
/// filter in that domain averages flat regions but never reaches across a
/// strong edge, because the edge is "far away" in the transformed domain.
///
/// This is the normalized-convolution variant: three iterations, each one a
/// horizontal pass over rows followed by a vertical pass over columns, with
/// a shrinking box radius.
///
/// The width of each box window is also exposed. It is small where the
/// image has detail, which is what the pencil sketch renders as strokes.
use image::RgbImage;
use rayon::prelude::*;

/// Number of horizontal + vertical pass pairs
pub const ITERATIONS: u32 = 3;

const CHANNELS: usize = 3;

/// Interleaved RGB image with channels in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl FloatImage {
    pub fn from_rgb(img: &RgbImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.as_raw().iter().map(|&v| v as f32 / 255.0).collect(),
        }
    }

    /// Scale back to 8 bits, rounding and saturating
    pub fn to_rgb(&self) -> RgbImage {
        let raw: Vec<u8> = self.data.iter().map(|&v| to_u8(v)).collect();
        RgbImage::from_raw(self.width as u32, self.height as u32, raw)
            .unwrap_or_else(|| RgbImage::new(self.width as u32, self.height as u32))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let i = (y * self.width + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.data.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let src = (y * self.width + x) * CHANNELS;
                let dst = (x * self.height + y) * CHANNELS;
                data[dst..dst + CHANNELS].copy_from_slice(&self.data[src..src + CHANNELS]);
            }
        }
        Self {
            width: self.height,
            height: self.width,
            data,
        }
    }
}

/// Float in [0, 1] to a saturated u8
pub fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Box radius used by iteration `i` (0-based)
pub fn box_radius(sigma_s: f32, i: u32) -> f32 {
    let n = ITERATIONS as f64;
    let sigma_h = sigma_s as f64 * 3f64.sqrt() * 2f64.powf(n - (i as f64 + 1.0))
        / (4f64.powf(n) - 1.0).sqrt();
    (3f64.sqrt() * sigma_h) as f32
}

/// Cumulative domain coordinates for every row and every column
#[derive(Debug, Clone)]
pub struct DomainTransform {
    width: usize,
    height: usize,
    /// Row-major, one row of `width` coordinates per image row
    rows: Vec<f32>,
    /// Column-major, one run of `height` coordinates per image column
    columns: Vec<f32>,
}

impl DomainTransform {
    pub fn new(img: &FloatImage, sigma_s: f32, sigma_r: f32) -> Self {
        let (w, h) = (img.width, img.height);
        let ratio = sigma_s / sigma_r;

        let mut rows = vec![0.0; w * h];
        for y in 0..h {
            let mut acc = 0.0;
            for x in 0..w {
                let dist = if x == 0 { 0.0 } else { l1(img.pixel(x, y), img.pixel(x - 1, y)) };
                acc += 1.0 + ratio * dist;
                rows[y * w + x] = acc;
            }
        }

        let mut columns = vec![0.0; w * h];
        for x in 0..w {
            let mut acc = 0.0;
            for y in 0..h {
                let dist = if y == 0 { 0.0 } else { l1(img.pixel(x, y), img.pixel(x, y - 1)) };
                acc += 1.0 + ratio * dist;
                columns[x * h + y] = acc;
            }
        }

        Self {
            width: w,
            height: h,
            rows,
            columns,
        }
    }

    /// Run the full edge-preserving filter on `img`
    pub fn filter(&self, img: &FloatImage, sigma_s: f32) -> FloatImage {
        if img.is_empty() {
            return img.clone();
        }

        let mut out = img.clone();
        for i in 0..ITERATIONS {
            let radius = box_radius(sigma_s, i);
            out = box_pass(&out, &self.rows, radius);
            out = box_pass(&out.transpose(), &self.columns, radius).transpose();
        }
        out
    }

    /// Horizontal plus vertical box window width for every pixel (row-major)
    pub fn window_widths(&self, radius: f32) -> Vec<f32> {
        let (w, h) = (self.width, self.height);
        let mut widths = vec![0.0; w * h];
        if w == 0 || h == 0 {
            return widths;
        }

        for (y, domain) in self.rows.chunks(w).enumerate() {
            for (x, (lo, hi)) in windows(domain, radius).into_iter().enumerate() {
                widths[y * w + x] += (hi - lo) as f32;
            }
        }
        for (x, domain) in self.columns.chunks(h).enumerate() {
            for (y, (lo, hi)) in windows(domain, radius).into_iter().enumerate() {
                widths[y * w + x] += (hi - lo) as f32;
            }
        }
        widths
    }
}

fn l1(a: [f32; 3], b: [f32; 3]) -> f32 {
    (a[0] - b[0]).abs() + (a[1] - b[1]).abs() + (a[2] - b[2]).abs()
}

/// Half-open window `[lo, hi)` of every sample within `radius` in the domain
///
/// `domain` must be strictly increasing, which holds because every step
/// adds at least 1. Every window contains its own sample.
fn windows(domain: &[f32], radius: f32) -> Vec<(usize, usize)> {
    let n = domain.len();
    let mut bounds = Vec::with_capacity(n);
    let (mut lo, mut hi) = (0, 0);
    for &d in domain {
        while lo < n && domain[lo] <= d - radius {
            lo += 1;
        }
        while hi < n && domain[hi] <= d + radius {
            hi += 1;
        }
        bounds.push((lo, hi));
    }
    bounds
}

/// Box filter every row of `img` in its transformed domain
fn box_pass(img: &FloatImage, domain: &[f32], radius: f32) -> FloatImage {
    let stride = img.width * CHANNELS;
    let mut data = vec![0.0; img.data.len()];

    data.par_chunks_mut(stride)
        .zip(img.data.par_chunks(stride))
        .zip(domain.par_chunks(img.width))
        .for_each(|((dst, src), row_domain)| filter_row(src, row_domain, radius, dst));

    FloatImage {
        width: img.width,
        height: img.height,
        data,
    }
}

fn filter_row(src: &[f32], domain: &[f32], radius: f32, dst: &mut [f32]) {
    let n = domain.len();

    // prefix[k] = sum of the first k samples, per channel
    let mut prefix = vec![[0.0f64; CHANNELS]; n + 1];
    for k in 0..n {
        for c in 0..CHANNELS {
            prefix[k + 1][c] = prefix[k][c] + src[k * CHANNELS + c] as f64;
        }
    }

    for (j, (lo, hi)) in windows(domain, radius).into_iter().enumerate() {
        let count = (hi - lo) as f64;
        for c in 0..CHANNELS {
            dst[j * CHANNELS + c] = ((prefix[hi][c] - prefix[lo][c]) / count) as f32;
        }
    }
}
