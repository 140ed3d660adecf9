/// State management module
///
/// This module handles all application state, including:
/// - The loaded photo, its conversion and the selected filter (session.rs)
/// - Settings persisted between runs (settings.rs)

pub mod session;
pub mod settings;

pub use session::{ConvertedPhoto, Session};
pub use settings::Settings;
