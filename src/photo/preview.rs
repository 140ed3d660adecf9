/// Display-sized previews
///
/// The preview frame is 800x500. Landscape photos are fitted to the frame
/// width, portrait and square photos to the frame height.
use iced::widget::image::Handle;
use image::{imageops::FilterType, DynamicImage, RgbImage};

/// Width used for landscape photos
pub const FRAME_WIDTH: u32 = 800;
/// Height used for portrait and square photos
pub const FRAME_HEIGHT: u32 = 500;

/// Compute the preview size for a photo of `width` x `height`.
///
/// The scaled dimension is truncated, never rounded. Smaller photos are
/// scaled up to the frame as well.
pub fn display_size(width: u32, height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }

    if width > height {
        let scale = FRAME_WIDTH as f64 / width as f64;
        let h = (height as f64 * scale) as u32;
        (FRAME_WIDTH, h.max(1))
    } else {
        let scale = FRAME_HEIGHT as f64 / height as f64;
        let w = (width as f64 * scale) as u32;
        (w.max(1), FRAME_HEIGHT)
    }
}

/// Resize a photo to fit the preview frame (Lanczos3)
pub fn resize_for_display(img: &RgbImage) -> RgbImage {
    let (w, h) = display_size(img.width(), img.height());
    image::imageops::resize(img, w, h, FilterType::Lanczos3)
}

/// Upload a preview as an iced image handle
pub fn to_handle(img: &RgbImage) -> Handle {
    let rgba = DynamicImage::ImageRgb8(img.clone()).into_rgba8();
    Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_fits_width() {
        assert_eq!(display_size(1600, 900), (800, 450));
        assert_eq!(display_size(4000, 3000), (800, 600));
    }

    #[test]
    fn test_portrait_and_square_fit_height() {
        assert_eq!(display_size(1000, 1000), (500, 500));
        assert_eq!(display_size(3000, 4000), (375, 500));
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        // 999 * 800 / 1000 = 799.2, 333 * 800 / 1000 = 266.4
        assert_eq!(display_size(1000, 999), (800, 799));
        assert_eq!(display_size(1000, 333), (800, 266));
    }

    #[test]
    fn test_small_images_are_scaled_up() {
        assert_eq!(display_size(200, 100), (800, 400));
        assert_eq!(display_size(50, 100), (250, 500));
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        assert_eq!(display_size(10_000, 1), (800, 1));
        assert_eq!(display_size(1, 10_000), (1, 500));
    }

    #[test]
    fn test_resize_for_display_dimensions() {
        let img = RgbImage::new(160, 90);
        let resized = resize_for_display(&img);
        assert_eq!(resized.dimensions(), (800, 450));
    }
}
