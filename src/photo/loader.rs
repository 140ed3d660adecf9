/// Photo loader
///
/// Decodes a JPEG or PNG on a blocking thread and prepares the preview
/// shown in the frame. Alpha is dropped; all filters work on RGB8.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbImage;
use tokio::task;

use super::{preview, validate};
use crate::error::{ConverterError, Result};

/// A decoded source photo
#[derive(Debug, Clone)]
pub struct LoadedPhoto {
    /// Where the photo came from
    pub path: PathBuf,
    /// Full resolution pixels, shared with conversion jobs
    pub image: Arc<RgbImage>,
    /// Frame-sized copy for display
    pub preview: RgbImage,
}

impl LoadedPhoto {
    /// Wrap an already decoded image (used by tests and by the loader)
    pub fn from_image(path: PathBuf, image: RgbImage) -> Self {
        let preview = preview::resize_for_display(&image);
        Self {
            path,
            image: Arc::new(image),
            preview,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Load a photo from disk
///
/// # Returns
/// * `Ok(LoadedPhoto)` - decoded photo plus display preview
/// * `Err(ConverterError::UnsupportedExtension)` - not a jpg/jpeg/png
/// * `Err(ConverterError::Decode)` - the file could not be decoded
pub async fn load_photo(path: PathBuf) -> Result<LoadedPhoto> {
    // Decoding a large JPEG is CPU bound
    task::spawn_blocking(move || load_photo_blocking(&path))
        .await
        .map_err(|e| ConverterError::TaskJoin(e.to_string()))?
}

/// Blocking implementation of photo loading
pub fn load_photo_blocking(path: &Path) -> Result<LoadedPhoto> {
    if !validate::check_path_extension(path) {
        return Err(ConverterError::UnsupportedExtension(path.to_path_buf()));
    }

    let decoded = image::open(path).map_err(|source| ConverterError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = decoded.into_rgb8();
    tracing::info!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        "📷 Loaded photo"
    );

    Ok(LoadedPhoto::from_image(path.to_path_buf(), rgb))
}
