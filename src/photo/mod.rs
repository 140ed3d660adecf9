/// Photo file handling
///
/// This module handles:
/// - Validating file extensions before opening (validate.rs)
/// - Decoding photos off the UI thread (loader.rs)
/// - Resizing for the 800x500 preview frame (preview.rs)
/// - Writing converted photos to disk (export.rs)

pub mod validate;
pub mod loader;
pub mod preview;
pub mod export;

pub use loader::{load_photo, LoadedPhoto};
