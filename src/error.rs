/// Error types shared by the loader, the filters and the session
///
/// Three variants are user-facing guards (unsupported extension, converting
/// without a photo, saving without a conversion). They are shown as info
/// dialogs. Everything else is an operational failure that gets logged.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConverterError {
    /// The chosen file is not a jpg, jpeg or png
    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    /// Convert was pressed before a photo was opened
    #[error("no image loaded")]
    NoImageLoaded,

    /// Save was pressed before anything was converted
    #[error("nothing to save, convert an image first")]
    NothingToSave,

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// Neither a config nor a home directory is known for this user
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl ConverterError {
    /// Title and message of the notification shown for user-facing guards.
    ///
    /// Returns `None` for operational errors, which are reported as errors
    /// rather than as gentle hints.
    pub fn notice(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::UnsupportedExtension(_) => Some(("Invalid File", "Please select an image file")),
            Self::NoImageLoaded => Some(("No File", "Please select an image file")),
            Self::NothingToSave => Some(("No File", "Please convert an image first")),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards_have_notices() {
        assert_eq!(
            ConverterError::NothingToSave.notice(),
            Some(("No File", "Please convert an image first"))
        );
        assert_eq!(
            ConverterError::NoImageLoaded.notice(),
            Some(("No File", "Please select an image file"))
        );
        assert_eq!(
            ConverterError::UnsupportedExtension(PathBuf::from("a.gif")).notice(),
            Some(("Invalid File", "Please select an image file"))
        );
    }

    #[test]
    fn test_operational_errors_have_no_notice() {
        let err = ConverterError::TaskJoin("cancelled".to_string());
        assert!(err.notice().is_none());
        assert_eq!(err.to_string(), "background task failed: cancelled");
    }
}
