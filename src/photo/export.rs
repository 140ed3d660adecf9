/// Writing converted photos to disk
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

use crate::error::{ConverterError, Result};

/// Extension appended when the user typed a name without one
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Append `.jpg` when the chosen path has no extension
pub fn with_default_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if !ext.is_empty() => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_os_string();
            if !name.to_string_lossy().ends_with('.') {
                name.push(".");
            }
            name.push(DEFAULT_EXTENSION);
            PathBuf::from(name)
        }
    }
}

/// Save an RGB image, choosing the format from the extension
///
/// JPEG is written with `jpeg_quality` (1-100), PNG losslessly. Returns the
/// final path, which may have gained the default extension.
pub fn save_photo(img: &RgbImage, path: &Path, jpeg_quality: u8) -> Result<PathBuf> {
    let path = with_default_extension(path);

    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
        Some("png") => ImageFormat::Png,
        _ => return Err(ConverterError::UnsupportedExtension(path)),
    };

    // Encode in memory so a failed encode never leaves a truncated file
    let mut encoded = Cursor::new(Vec::new());
    let written = match format {
        ImageFormat::Jpeg => {
            let quality = jpeg_quality.clamp(1, 100);
            let encoder = JpegEncoder::new_with_quality(&mut encoded, quality);
            img.write_with_encoder(encoder)
        }
        _ => img.write_to(&mut encoded, format),
    };
    written.map_err(|source| ConverterError::Encode {
        path: path.clone(),
        source,
    })?;

    fs::write(&path, encoded.into_inner()).map_err(|source| ConverterError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "💾 Saved converted photo");
    Ok(path)
}
