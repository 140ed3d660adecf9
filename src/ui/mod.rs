/// Custom widgets drawn on iced canvases

pub mod radio;

pub use radio::RadioButton;
