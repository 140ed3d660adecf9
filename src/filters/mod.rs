/// Stylized conversions
///
/// Every filter takes an RGB8 photo and returns a new image of the same
/// size:
/// - Oil painting: morphological opening + normalization (oil.rs)
/// - Cartoon: edge-preserving stylization (stylize.rs)
/// - Sketch and Crayons: pencil sketches (sketch.rs)
/// - Pointillist Art: dot painting (pointillism.rs)
///
/// The cartoon and sketch filters share the domain transform in domain.rs.

pub mod domain;
pub mod oil;
pub mod pointillism;
pub mod sketch;
pub mod stylize;

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Spatial extent of the edge-preserving filters
pub const SIGMA_S: f32 = 60.0;
/// Color range of the edge-preserving filters
pub const SIGMA_R: f32 = 0.07;
/// Brightness lift of the pencil sketches
pub const SHADE_FACTOR: f32 = 0.05;

/// The conversion picked with the radio buttons
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    #[default]
    OilPainting,
    Cartoon,
    PencilSketch,
    ColoredPencil,
    Pointillism,
}

impl FilterKind {
    /// In radio-button order
    pub const ALL: [FilterKind; 5] = [
        FilterKind::OilPainting,
        FilterKind::Cartoon,
        FilterKind::PencilSketch,
        FilterKind::ColoredPencil,
        FilterKind::Pointillism,
    ];

    /// Label shown next to the radio button
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::OilPainting => "Oil painting",
            FilterKind::Cartoon => "Cartoon",
            FilterKind::PencilSketch => "Sketch",
            FilterKind::ColoredPencil => "Crayons",
            FilterKind::Pointillism => "Pointillist Art",
        }
    }

    /// Short name used in suggested file names
    pub fn slug(self) -> &'static str {
        match self {
            FilterKind::OilPainting => "oil",
            FilterKind::Cartoon => "cartoon",
            FilterKind::PencilSketch => "sketch",
            FilterKind::ColoredPencil => "crayons",
            FilterKind::Pointillism => "pointillist",
        }
    }

    /// 1-based position in the radio group
    pub fn option_value(self) -> u8 {
        match self {
            FilterKind::OilPainting => 1,
            FilterKind::Cartoon => 2,
            FilterKind::PencilSketch => 3,
            FilterKind::ColoredPencil => 4,
            FilterKind::Pointillism => 5,
        }
    }

    pub fn from_option_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.option_value() == value)
    }

    /// Run the conversion. CPU bound; call it off the UI thread.
    pub fn apply(self, img: &RgbImage) -> RgbImage {
        match self {
            FilterKind::OilPainting => oil::oil_painting(img),
            FilterKind::Cartoon => stylize::stylization(img, SIGMA_S, SIGMA_R),
            FilterKind::PencilSketch => sketch::pencil_sketch(img, SIGMA_S, SIGMA_R, SHADE_FACTOR),
            FilterKind::ColoredPencil => {
                sketch::colored_pencil_sketch(img, SIGMA_S, SIGMA_R, SHADE_FACTOR)
            }
            FilterKind::Pointillism => pointillism::pointillism(img),
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
