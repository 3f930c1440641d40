//! Filename heuristics for uploaded garment photos
//!
//! When no image model is available the upload's filename is the only
//! signal. These heuristics turn "navy_formal-blazer.jpg" into a tagged
//! [`GarmentAnalysis`].

use crate::garment::ColorDetector;
use crate::matcher::KeywordMatcher;
use fitcheck_core::{Result, Style, WeatherBand};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Display name used when nothing readable survives cleanup
pub const DEFAULT_ITEM_NAME: &str = "Stylish Item";

/// Confidence reported by heuristic and normalized analyses
pub const HEURISTIC_CONFIDENCE: f32 = 0.8;

/// Coarse wardrobe category used by photo analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentCategory {
    Tops,
    Bottoms,
    Dresses,
    Shoes,
    Accessories,
}

impl GarmentCategory {
    pub const ALL: [GarmentCategory; 5] = [
        Self::Tops,
        Self::Bottoms,
        Self::Dresses,
        Self::Shoes,
        Self::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tops => "tops",
            Self::Bottoms => "bottoms",
            Self::Dresses => "dresses",
            Self::Shoes => "shoes",
            Self::Accessories => "accessories",
        }
    }

    /// Exact category token, case-insensitive
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == token)
    }

    /// Weather suitability assumed for this category
    pub fn default_weather(&self) -> Vec<WeatherBand> {
        match self {
            Self::Tops | Self::Dresses => vec![WeatherBand::Mild, WeatherBand::Warm],
            _ => vec![WeatherBand::Mild, WeatherBand::Cool],
        }
    }
}

impl fmt::Display for GarmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged description of a garment photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentAnalysis {
    pub name: String,
    pub category: GarmentCategory,
    pub color: String,
    pub style: Style,
    pub weather_suitability: Vec<WeatherBand>,
    pub occasions: Vec<String>,
    pub confidence: f32,
    pub description: String,
}

/// Occasions implied by a style
pub fn default_occasions(style: Style) -> Vec<String> {
    match style {
        Style::Casual => vec!["casual".to_string(), "everyday".to_string()],
        other => vec![other.as_str().to_string(), "special".to_string()],
    }
}

/// Turn a filename into a title-cased display name.
///
/// The extension is dropped, `_` and `-` become spaces, anything that is not
/// alphanumeric or whitespace is removed and runs of whitespace collapse.
pub fn clean_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let spaced: String = stem
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let name = spaced
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        DEFAULT_ITEM_NAME.to_string()
    } else {
        name
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Filename-based garment analysis
#[derive(Debug, Clone)]
pub struct FilenameAnalyzer {
    colors: ColorDetector,
    categories: Vec<(GarmentCategory, KeywordMatcher)>,
    styles: Vec<(Style, KeywordMatcher)>,
}

impl FilenameAnalyzer {
    pub fn new(colors: ColorDetector) -> Result<Self> {
        let categories = [
            (
                GarmentCategory::Tops,
                &[
                    "shirt", "tee", "t-shirt", "top", "blouse", "hoodie", "sweater", "tank",
                    "jacket", "coat",
                ][..],
            ),
            (GarmentCategory::Bottoms, &["jean", "pant", "trouser", "short", "skirt"][..]),
            (GarmentCategory::Dresses, &["dress", "gown", "frock"][..]),
            (GarmentCategory::Shoes, &["shoe", "boot", "sneaker", "sandal", "heel"][..]),
        ];
        let styles = [
            (Style::Formal, &["formal", "dress", "business", "suit"][..]),
            (Style::Sporty, &["sport", "athletic", "gym", "running"][..]),
            (Style::Vintage, &["vintage", "retro", "classic"][..]),
            (Style::Trendy, &["trendy", "fashion", "designer"][..]),
        ];

        Ok(Self {
            colors,
            categories: categories
                .into_iter()
                .map(|(category, words)| KeywordMatcher::new(words).map(|m| (category, m)))
                .collect::<Result<Vec<_>>>()?,
            styles: styles
                .into_iter()
                .map(|(style, words)| KeywordMatcher::new(words).map(|m| (style, m)))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ColorDetector::with_defaults()?)
    }

    /// First category with a hit, else accessories
    pub fn category(&self, text: &str) -> GarmentCategory {
        self.categories
            .iter()
            .find(|(_, matcher)| matcher.is_match(text))
            .map_or(GarmentCategory::Accessories, |(category, _)| *category)
    }

    /// First style with a hit, else casual
    pub fn style(&self, text: &str) -> Style {
        self.styles
            .iter()
            .find(|(_, matcher)| matcher.is_match(text))
            .map_or(Style::Casual, |(style, _)| *style)
    }

    /// First color hint with a hit, else the detector's default
    pub fn color(&self, text: &str) -> &str {
        self.colors.detect(text)
    }

    /// Analyze a filename
    pub fn analyze(&self, filename: &str) -> GarmentAnalysis {
        let lower = filename.to_lowercase();
        let category = self.category(&lower);
        let style = self.style(&lower);

        GarmentAnalysis {
            name: clean_name(filename),
            category,
            color: self.color(&lower).to_string(),
            style,
            weather_suitability: category.default_weather(),
            occasions: default_occasions(style),
            confidence: HEURISTIC_CONFIDENCE,
            description: "Filename-based analysis".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> FilenameAnalyzer {
        FilenameAnalyzer::with_defaults().unwrap()
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("navy_formal-blazer.jpg"), "Navy Formal Blazer");
        assert_eq!(clean_name("  my   FAVOURITE__tee!!.png"), "My Favourite Tee");
        assert_eq!(clean_name("___.jpg"), DEFAULT_ITEM_NAME);
        assert_eq!(clean_name(""), DEFAULT_ITEM_NAME);
    }

    #[test]
    fn test_formal_blazer() {
        let analysis = analyzer().analyze("navy_formal-blazer.jpg");

        assert_eq!(analysis.name, "Navy Formal Blazer");
        assert_eq!(analysis.color, "blue");
        // "blazer" is not a filename category cue
        assert_eq!(analysis.category, GarmentCategory::Accessories);
        assert_eq!(analysis.style, Style::Formal);
        assert_eq!(analysis.weather_suitability, vec![WeatherBand::Mild, WeatherBand::Cool]);
        assert_eq!(analysis.occasions, vec!["formal".to_string(), "special".to_string()]);
        assert_eq!(analysis.confidence, HEURISTIC_CONFIDENCE);
    }

    #[test]
    fn test_casual_top() {
        let analysis = analyzer().analyze("IMG_yellow_hoodie.jpeg");

        assert_eq!(analysis.category, GarmentCategory::Tops);
        assert_eq!(analysis.color, "yellow");
        assert_eq!(analysis.style, Style::Casual);
        assert_eq!(analysis.weather_suitability, vec![WeatherBand::Mild, WeatherBand::Warm]);
        assert_eq!(analysis.occasions, vec!["casual".to_string(), "everyday".to_string()]);
    }

    #[test]
    fn test_category_order() {
        let a = analyzer();

        // "dress shirt" hits the tops cue first
        assert_eq!(a.category("white dress shirt"), GarmentCategory::Tops);
        assert_eq!(a.category("red dress"), GarmentCategory::Dresses);
        assert_eq!(a.category("running shoes"), GarmentCategory::Shoes);
        assert_eq!(a.category("cargo shorts"), GarmentCategory::Bottoms);
        assert_eq!(a.category("silver watch"), GarmentCategory::Accessories);
    }

    #[test]
    fn test_category_tokens() {
        assert_eq!(GarmentCategory::from_token(" Shoes "), Some(GarmentCategory::Shoes));
        assert_eq!(GarmentCategory::from_token("shoe"), None);
        assert_eq!(
            serde_json::to_string(&GarmentCategory::Dresses).unwrap(),
            "\"dresses\""
        );
    }
}
