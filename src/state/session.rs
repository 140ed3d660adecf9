/// The editing session: one source photo and at most one conversion of it
///
/// A conversion always belongs to the photo it was made from. Opening a
/// new photo discards the previous conversion and bumps the generation,
/// so a conversion still running in the background for the old photo is
/// dropped when it finishes.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbImage;

use crate::error::{ConverterError, Result};
use crate::filters::FilterKind;
use crate::photo::{export, preview, LoadedPhoto};

/// Output of one conversion
#[derive(Debug, Clone)]
pub struct ConvertedPhoto {
    pub filter: FilterKind,
    pub image: Arc<RgbImage>,
    pub preview: RgbImage,
}

/// Everything a background task needs to run a conversion
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub generation: u64,
    pub filter: FilterKind,
    pub source: Arc<RgbImage>,
}

impl ConversionJob {
    /// Apply the filter and build the display preview (blocking)
    pub fn run(self) -> ConvertedPhoto {
        let started = std::time::Instant::now();
        let image = self.filter.apply(&self.source);
        let preview = preview::resize_for_display(&image);

        tracing::info!(
            filter = %self.filter,
            width = image.width(),
            height = image.height(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "🎨 Conversion finished"
        );

        ConvertedPhoto {
            filter: self.filter,
            image: Arc::new(image),
            preview,
        }
    }

    /// Run the conversion on a blocking thread
    pub async fn run_async(self) -> Result<ConvertedPhoto> {
        tokio::task::spawn_blocking(move || self.run())
            .await
            .map_err(|e| ConverterError::TaskJoin(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct Session {
    source: Option<LoadedPhoto>,
    converted: Option<ConvertedPhoto>,
    selected: FilterKind,
    generation: u64,
}

impl Session {
    pub fn new(selected: FilterKind) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    /// Replace the source photo; any previous conversion is discarded
    pub fn install_source(&mut self, photo: LoadedPhoto) {
        self.source = Some(photo);
        self.converted = None;
        self.generation += 1;
    }

    pub fn select(&mut self, filter: FilterKind) {
        self.selected = filter;
    }

    pub fn selected(&self) -> FilterKind {
        self.selected
    }

    pub fn converted(&self) -> Option<&ConvertedPhoto> {
        self.converted.as_ref()
    }

    /// Prepare a conversion of the current photo with the selected filter
    pub fn begin_conversion(&self) -> Result<ConversionJob> {
        let source = self.source.as_ref().ok_or(ConverterError::NoImageLoaded)?;
        Ok(ConversionJob {
            generation: self.generation,
            filter: self.selected,
            source: Arc::clone(&source.image),
        })
    }

    /// Accept a finished conversion if it still belongs to the current photo
    pub fn finish_conversion(&mut self, generation: u64, converted: ConvertedPhoto) -> bool {
        if generation != self.generation || self.source.is_none() {
            tracing::debug!(
                job = generation,
                current = self.generation,
                "Dropping stale conversion"
            );
            return false;
        }
        self.converted = Some(converted);
        true
    }

    /// Write the conversion to `path`
    ///
    /// Without a conversion nothing is written and `NothingToSave` is
    /// returned.
    pub fn save_converted(&self, path: &Path, jpeg_quality: u8) -> Result<PathBuf> {
        let converted = self.converted.as_ref().ok_or(ConverterError::NothingToSave)?;
        export::save_photo(&converted.image, path, jpeg_quality)
    }

    /// Suggested file name for the save dialog, e.g. `beach_cartoon.jpg`
    pub fn suggested_file_name(&self) -> String {
        let filter = self
            .converted
            .as_ref()
            .map(|c| c.filter)
            .unwrap_or(self.selected);
        let stem = self
            .source
            .as_ref()
            .and_then(|s| s.path.file_stem())
            .map(|s| s.to_string_lossy().into_owned());
        match stem {
            Some(stem) => format!("{stem}_{}.{}", filter.slug(), export::DEFAULT_EXTENSION),
            None => format!("converted.{}", export::DEFAULT_EXTENSION),
        }
    }

    /// Preview currently on screen: the conversion if any, else the photo
    pub fn displayed(&self) -> Option<&RgbImage> {
        self.converted
            .as_ref()
            .map(|c| &c.preview)
            .or_else(|| self.source.as_ref().map(|s| &s.preview))
    }
}
