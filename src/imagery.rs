//! Imagery source classification.
//!
//! Maps the free-text `imagery` field of a project onto a closed set of
//! source categories used by the dashboard filters.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized imagery source of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageryCategory {
    #[serde(rename = "Not specified")]
    NotSpecified,
    Bing,
    Esri,
    Mapbox,
    Maxar,
    Custom,
    Other,
}

impl ImageryCategory {
    /// Every category, in display order
    pub const ALL: [ImageryCategory; 7] = [
        ImageryCategory::NotSpecified,
        ImageryCategory::Bing,
        ImageryCategory::Esri,
        ImageryCategory::Mapbox,
        ImageryCategory::Maxar,
        ImageryCategory::Custom,
        ImageryCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageryCategory::NotSpecified => "Not specified",
            ImageryCategory::Bing => "Bing",
            ImageryCategory::Esri => "Esri",
            ImageryCategory::Mapbox => "Mapbox",
            ImageryCategory::Maxar => "Maxar",
            ImageryCategory::Custom => "Custom",
            ImageryCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ImageryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

lazy_static! {
    // Evaluated top to bottom, first match wins.
    static ref IMAGERY_RULES: Vec<(Regex, ImageryCategory)> = vec![
        (Regex::new(r"(?i)bing").unwrap(), ImageryCategory::Bing),
        (
            Regex::new(r"(?i)esri|arcgis|world.imagery").unwrap(),
            ImageryCategory::Esri,
        ),
        (Regex::new(r"(?i)mapbox").unwrap(), ImageryCategory::Mapbox),
        (
            Regex::new(r"(?i)maxar|digitalglobe|vivid|securewatch").unwrap(),
            ImageryCategory::Maxar,
        ),
        (
            Regex::new(r"(?i)openaerialmap|oam|open.aerial").unwrap(),
            ImageryCategory::Custom,
        ),
        (Regex::new(r"(?i)custom").unwrap(), ImageryCategory::Custom),
    ];
}

/// Classify a raw imagery descriptor.
///
/// Blank or missing text is `NotSpecified`; anything no rule recognises,
/// URLs and `tms[...]` templates included, is `Other`.
pub fn classify_imagery(raw: Option<&str>) -> ImageryCategory {
    let text = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return ImageryCategory::NotSpecified,
    };

    IMAGERY_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, category)| *category)
        .unwrap_or(ImageryCategory::Other)
}
